use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use crossterm::style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize};
use cubeida::cancel::CancellationToken;
use cubeida::constants::DEFAULT_PALETTE;
use cubeida::cube::Cube;
use cubeida::heuristic::{self, HeuristicTable};
use cubeida::scramble::scramble_to_str;
use cubeida::solver::solve as run_solver;
use spinners::{Spinner, Spinners};
use thiserror::Error;

/// Shuffles and solves an N x N x N Rubik's cube using IDA* over a
/// precomputed BFS heuristic table.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cube dimension.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..=6))]
    size: u64,

    /// Minimum number of shuffle moves.
    #[arg(long = "shuffle-lower-bound", default_value_t = 1)]
    shuffle_lower_bound: i64,

    /// Maximum number of shuffle moves.
    #[arg(long = "shuffle-upper-bound", default_value_t = 5)]
    shuffle_upper_bound: i64,

    /// BFS heuristic table depth.
    #[arg(long = "max-depth", default_value_t = 5)]
    max_depth: u32,

    /// Print a colored preview of the scrambled cube before solving.
    #[arg(short, long)]
    preview: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] cubeida::Error),
    #[error("could not read or write the heuristic table: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed heuristic table: {0}")]
    Json(#[from] serde_json::Error),
}

fn heuristic_path(size: usize) -> PathBuf {
    PathBuf::from(heuristic::directory_name(size)).join("heuristic.json")
}

fn load_or_build_table(size: usize, max_depth: u32) -> Result<HeuristicTable, CliError> {
    let path = heuristic_path(size);
    if let Ok(bytes) = fs::read(&path) {
        return Ok(serde_json::from_slice(&bytes)?);
    }

    println!("No heuristic table at {}; building one.", path.display());
    let mut spinner = Spinner::new(Spinners::Dots, "Building heuristic table".to_owned());
    let table = heuristic::build(
        size,
        DEFAULT_PALETTE,
        max_depth,
        |visited| {
            if visited % 5_000 == 0 {
                print!(".");
            }
        },
        &CancellationToken::new(),
    )?;
    spinner.stop_with_newline();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, serde_json::to_vec(&table)?)?;
    println!("Built {} states, saved to {}.", table.len(), path.display());
    Ok(table)
}

fn color_for(c: char) -> TermColor {
    match c {
        'W' => TermColor::White,
        'G' => TermColor::Green,
        'O' => TermColor::DarkYellow,
        'B' => TermColor::Blue,
        'R' => TermColor::Red,
        'Y' => TermColor::Yellow,
        _ => TermColor::Grey,
    }
}

fn print_preview(cube: &Cube) {
    let palette = cube.palette();
    for (name, face) in cubeida::constants::FACE_NAMES.iter().zip(cube.faces()) {
        println!("{name} face:");
        for row in face {
            let line: String = row
                .iter()
                .map(|&idx| {
                    format!(
                        "{} {}  ",
                        SetBackgroundColor(color_for(palette[idx as usize])),
                        SetBackgroundColor(TermColor::Reset)
                    )
                })
                .collect();
            println!("{line}");
        }
        println!();
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let size = cli.size as usize;
    let mut cube = Cube::new(size, DEFAULT_PALETTE);
    let mut rng = rand::thread_rng();
    let history = cube.shuffle(cli.shuffle_lower_bound, cli.shuffle_upper_bound, &mut rng)?;
    let scramble: Vec<_> = history.iter().map(|(m, _)| *m).collect();
    println!("Scramble: {}", scramble_to_str(&scramble));

    if cli.preview {
        print_preview(&cube);
    }

    let table = load_or_build_table(size, cli.max_depth)?;

    let mut spinner = Spinner::new(Spinners::Dots, "Solving".to_owned());
    let start = Instant::now();
    let solution = run_solver(&cube, &table, 6 * size as u32 * 4, &CancellationToken::new())?;
    let elapsed = start.elapsed();
    spinner.stop_with_newline();

    println!("Solution: {}", scramble_to_str(&solution));
    println!("Move count: {}", solution.len());
    println!("Solve time: {elapsed:?}");

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        eprintln!("{styled} {error}");
        std::process::exit(1);
    }
}
