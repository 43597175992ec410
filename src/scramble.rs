use std::str::FromStr;

use crate::error::Error;
use crate::moves::Move;

/// Parses a space-separated scramble string (e.g. `"H0L V2U S1P"`) into moves.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

/// Renders a move list back to the same space-separated notation.
pub fn scramble_to_str(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
