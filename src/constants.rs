/// Canonical face order. Load-bearing: every rotation formula in [`crate::cube`]
/// assumes this indexing.
pub const UP: usize = 0;
pub const LEFT: usize = 1;
pub const FRONT: usize = 2;
pub const RIGHT: usize = 3;
pub const BACK: usize = 4;
pub const DOWN: usize = 5;

/// Number of faces on any cube, regardless of `n`.
pub const FACE_COUNT: usize = 6;

/// Face names in canonical order, used for error messages and the CLI preview.
pub const FACE_NAMES: [&str; FACE_COUNT] = ["Up", "Left", "Front", "Right", "Back", "Down"];

/// Default six-symbol palette, one letter per canonical face in canonical
/// order (`W`hite Up, `G`reen Left, `O`range Front, `B`lue Right, `R`ed Back, `Y`ellow Down).
pub const DEFAULT_PALETTE: [char; FACE_COUNT] = ['W', 'G', 'O', 'B', 'R', 'Y'];
