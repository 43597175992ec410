//! # cubeida
//! IDA* solver for the N x N x N Rubik's cube, guided by a BFS heuristic
//! database. The core never does I/O: persistence, CLI parsing, and HTTP
//! serving are external collaborators built on top of these types.

/// Error type shared across the core.
pub mod error;

/// Canonical face indices, names, and the default color palette.
pub mod constants;

/// The cube model: face grids, canonical state string, rotation formulas.
pub mod cube;

/// The move catalog: family/direction/slice triples and their inverses.
pub mod moves;

/// Converting move lists to and from human-readable scramble notation.
pub mod scramble;

/// The BFS heuristic database builder.
pub mod heuristic;

/// Cooperative cancellation for the builder and solver.
pub mod cancel;

/// The IDA* solver.
pub mod solver;

pub use cube::Cube;
pub use error::Error;
pub use moves::Move;
