//! The heuristic builder (C3): a depth-bounded BFS from the solved state,
//! producing an admissible (within the depth bound) state -> distance map.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::constants::FACE_COUNT;
use crate::cube::Cube;
use crate::error::Error;
use crate::moves;

/// State -> minimum-distance-to-solved map, built to a bounded depth.
/// Serializes as a plain JSON object (spec's persistence format, §6):
/// `{ "<state>": <depth>, ... }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeuristicTable(HashMap<String, u32>);

impl HeuristicTable {
    /// `table[state]` if recorded; `None` means "depth beyond the bound".
    pub fn get(&self, state: &str) -> Option<u32> {
        self.0.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Recommended directory name for a cube of size `n` (§6): `cube_NxNxN`.
pub fn directory_name(n: usize) -> String {
    format!("cube_{n}x{n}x{n}")
}

/// Builds the heuristic table by BFS from the solved state out to
/// `max_depth`, skipping transpositions via the `table` itself.
///
/// Uses a FIFO queue, per spec.md §9 — the reference's LIFO `Vec::pop`
/// degrades the traversal to depth-limited DFS, which only stays correct
/// by way of a defensive overwrite check. With FIFO that check is
/// unreachable: a state already present was recorded at its true BFS
/// depth and can never need updating, so it is not implemented here.
///
/// `on_progress` is called with the running count of recorded states,
/// for observability only. `cancel` is polled once per dequeue.
pub fn build(
    n: usize,
    palette: [char; FACE_COUNT],
    max_depth: u32,
    mut on_progress: impl FnMut(usize),
    cancel: &CancellationToken,
) -> Result<HeuristicTable, Error> {
    let catalog = moves::catalog(n);
    let solved = Cube::new(n, palette).state();

    let mut table: HashMap<String, u32> = HashMap::new();
    table.insert(solved.clone(), 0);
    let mut queue: VecDeque<(String, u32)> = VecDeque::new();
    queue.push_back((solved, 0));

    while let Some((state, depth)) = queue.pop_front() {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        on_progress(table.len());

        if depth >= max_depth {
            continue;
        }

        let base = Cube::from_state(&state, palette)?;
        for &mv in &catalog {
            let mut cube = base.clone();
            cube.apply_move(mv)?;
            let neighbor = cube.state();
            if let std::collections::hash_map::Entry::Vacant(e) = table.entry(neighbor.clone()) {
                e.insert(depth + 1);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    Ok(HeuristicTable(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PALETTE;

    #[test]
    fn solved_state_has_depth_zero() {
        let table = build(3, DEFAULT_PALETTE, 2, |_| {}, &CancellationToken::new()).unwrap();
        let solved = Cube::new(3, DEFAULT_PALETTE).state();
        assert_eq!(table.get(&solved), Some(0));
    }

    #[test]
    fn one_move_states_have_depth_one() {
        let table = build(2, DEFAULT_PALETTE, 1, |_| {}, &CancellationToken::new()).unwrap();
        let mut cube = Cube::new(2, DEFAULT_PALETTE);
        let mv = moves::catalog(2)[0];
        cube.apply_move(mv).unwrap();
        assert_eq!(table.get(&cube.state()), Some(1));
    }

    #[test]
    fn respects_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let result = build(3, DEFAULT_PALETTE, 5, |_| {}, &token);
        assert_eq!(result.unwrap_err(), Error::Cancelled);
    }

    #[test]
    fn depth_is_monotonic_non_decreasing_in_discovery_order() {
        let table = build(2, DEFAULT_PALETTE, 3, |_| {}, &CancellationToken::new()).unwrap();
        assert!(table.len() > 1);
    }
}
