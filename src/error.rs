use thiserror::Error;

/// Errors surfaced by the core. None are recovered internally; callers
/// receive them as-is and the cube/solver state is never left corrupted.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A state string was malformed: wrong length, or a symbol outside the palette.
    #[error("invalid state string: {0}")]
    InvalidState(String),

    /// A move's slice index was outside `0..n`.
    #[error("slice index {index} out of range for a {n}x{n}x{n} cube")]
    OutOfRange { index: usize, n: usize },

    /// A direction did not match its move family (e.g. `Positive` for a `Horizontal` move).
    #[error("direction {0} is not valid for this move family")]
    InvalidDirection(String),

    /// `shuffle` bounds were negative or inverted.
    #[error("invalid shuffle bounds: lower {lo}, upper {hi}")]
    InvalidBounds { lo: i64, hi: i64 },

    /// The caller's cancellation token fired mid-search.
    #[error("operation cancelled")]
    Cancelled,
}
