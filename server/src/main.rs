use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use cubeida::cancel::CancellationToken;
use cubeida::constants::DEFAULT_PALETTE;
use cubeida::cube::Cube;
use cubeida::heuristic::{self, HeuristicTable};
use cubeida::solver;

/// Per-process heuristic cache keyed by cube size, behind a `Mutex`.
/// Unlike the reference HTTP adapter, the server keeps no "current cube":
/// every request carries its own full state string.
struct AppState {
    tables: Mutex<HashMap<usize, Arc<HeuristicTable>>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[derive(Deserialize)]
struct ScrambleParams {
    lower: Option<i64>,
    upper: Option<i64>,
}

#[derive(Serialize)]
struct ScrambleResponse {
    moves: Vec<String>,
    state: String,
}

async fn scramble_handler(
    Path(n): Path<usize>,
    Query(params): Query<ScrambleParams>,
) -> Result<Json<ScrambleResponse>, (StatusCode, Json<ErrorResponse>)> {
    let lower = params.lower.unwrap_or(1);
    let upper = params.upper.unwrap_or(5);
    let mut cube = Cube::new(n, DEFAULT_PALETTE);
    let mut rng = rand::thread_rng();
    let history = cube
        .shuffle(lower, upper, &mut rng)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
    let moves: Vec<String> = history.iter().map(|(m, _)| m.to_string()).collect();
    Ok(Json(ScrambleResponse {
        moves,
        state: cube.state(),
    }))
}

#[derive(Deserialize)]
struct SolveParams {
    max_depth: Option<u32>,
}

#[derive(Serialize)]
struct SolveResponse {
    moves: Vec<String>,
    solved: bool,
    elapsed_ms: u128,
}

async fn table_for(
    app: &AppState,
    n: usize,
    max_depth: u32,
) -> Result<Arc<HeuristicTable>, cubeida::Error> {
    if let Some(table) = app.tables.lock().expect("heuristic cache poisoned").get(&n) {
        return Ok(table.clone());
    }

    let built = tokio::task::spawn_blocking(move || {
        heuristic::build(
            n,
            DEFAULT_PALETTE,
            max_depth,
            |_| {},
            &CancellationToken::new(),
        )
    })
    .await
    .expect("heuristic build task panicked")?;

    let built = Arc::new(built);
    app.tables
        .lock()
        .expect("heuristic cache poisoned")
        .insert(n, built.clone());
    Ok(built)
}

async fn solve_handler(
    Path((n, state)): Path<(usize, String)>,
    Query(params): Query<SolveParams>,
    State(app): State<Arc<AppState>>,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ErrorResponse>)> {
    let max_depth = params.max_depth.unwrap_or(5);

    let cube = Cube::from_state(&state, DEFAULT_PALETTE)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
    if cube.n() != n {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "state does not match requested size",
        ));
    }

    let table = table_for(&app, n, max_depth)
        .await
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let start = Instant::now();
    let moves = solver::solve(&cube, &table, 6 * n as u32 * 4, &CancellationToken::new())
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
    let elapsed_ms = start.elapsed().as_millis();

    Ok(Json(SolveResponse {
        moves: moves.iter().map(|m| m.to_string()).collect(),
        solved: true,
        elapsed_ms,
    }))
}

async fn index() -> Html<&'static str> {
    Html(
        "<p>Scramble an N-cube: <a href=\"/scramble/3\">/scramble/3?lower=1&upper=5</a></p>\
         <p>Solve a state: GET /solve/:n/:state?max_depth=5</p>",
    )
}

#[tokio::main]
async fn main() {
    let state = Arc::new(AppState {
        tables: Mutex::new(HashMap::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);

    let app = Router::new()
        .route("/", get(index))
        .route("/scramble/:n", get(scramble_handler))
        .route("/solve/:n/:state", get(solve_handler))
        .with_state(state)
        .layer(cors)
        .fallback(index);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    println!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
