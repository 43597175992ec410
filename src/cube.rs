//! The cube model (C1): a mutable N x N x N face-grid cube, its canonical
//! state string, and the rotation formulas for every move family.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::*;
use crate::error::Error;
use crate::moves::{Direction, Family, Move};

/// A single cube face: an `n x n` grid of palette indices, row 0 at the top,
/// column 0 at the left, as viewed from outside the cube.
pub type Face = Vec<Vec<u8>>;

/// An N x N x N cube: six face grids plus the palette they index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    n: usize,
    palette: [char; FACE_COUNT],
    faces: [Face; FACE_COUNT],
}

impl Cube {
    /// Builds a solved cube: each face uniform in its canonical color.
    pub fn new(n: usize, palette: [char; FACE_COUNT]) -> Cube {
        let faces: [Face; FACE_COUNT] = std::array::from_fn(|i| vec![vec![i as u8; n]; n]);
        Cube { n, palette, faces }
    }

    /// Reconstructs a cube from its canonical state string (I1): `6*k^2`
    /// characters for integer `k`, every symbol drawn from `palette`.
    pub fn from_state(state: &str, palette: [char; FACE_COUNT]) -> Result<Cube, Error> {
        let chars: Vec<char> = state.chars().collect();
        let total = chars.len();
        if total == 0 || total % FACE_COUNT != 0 {
            return Err(Error::InvalidState(state.to_string()));
        }
        let per_face = total / FACE_COUNT;
        let n = (per_face as f64).sqrt().round() as usize;
        if n * n != per_face {
            return Err(Error::InvalidState(state.to_string()));
        }

        let mut built: Vec<Face> = Vec::with_capacity(FACE_COUNT);
        for f in 0..FACE_COUNT {
            let mut face = Vec::with_capacity(n);
            for r in 0..n {
                let mut row = Vec::with_capacity(n);
                for c in 0..n {
                    let ch = chars[f * per_face + r * n + c];
                    let idx = palette
                        .iter()
                        .position(|&p| p == ch)
                        .ok_or_else(|| Error::InvalidState(state.to_string()))?;
                    row.push(idx as u8);
                }
                face.push(row);
            }
            built.push(face);
        }

        let faces: [Face; FACE_COUNT] = built
            .try_into()
            .expect("built exactly FACE_COUNT faces above");
        Ok(Cube { n, palette, faces })
    }

    /// Restores the solved configuration in place.
    pub fn reset(&mut self) {
        *self = Cube::new(self.n, self.palette);
    }

    /// True iff every face grid is uniform (I1).
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|face| {
            let color = face[0][0];
            face.iter().all(|row| row.iter().all(|&c| c == color))
        })
    }

    /// The canonical state string: the six faces, in canonical order, each
    /// flattened row-major.
    pub fn state(&self) -> String {
        let mut s = String::with_capacity(FACE_COUNT * self.n * self.n);
        for face in &self.faces {
            for row in face {
                for &c in row {
                    s.push(self.palette[c as usize]);
                }
            }
        }
        s
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn palette(&self) -> [char; FACE_COUNT] {
        self.palette
    }

    /// The six face grids in canonical order, each `n x n`, palette-indexed.
    /// Exposed for previews and other read-only adapters; mutation only
    /// ever happens through [`Cube::apply_move`].
    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }

    /// Applies a move in place. Fails with `OutOfRange` if the move's slice
    /// index doesn't fit this cube's dimension.
    pub fn apply_move(&mut self, m: Move) -> Result<(), Error> {
        if m.index >= self.n {
            return Err(Error::OutOfRange {
                index: m.index,
                n: self.n,
            });
        }
        match m.family {
            Family::Horizontal => self.horizontal_rotate(m.index, m.direction),
            Family::Vertical => self.vertical_rotate(m.index, m.direction),
            Family::Side => self.side_rotate(m.index, m.direction),
        }
    }

    /// Applies `k ~ Uniform(lo, hi)` random moves and returns the ordered
    /// history of `(move, resulting state)` pairs.
    pub fn shuffle(
        &mut self,
        lo: i64,
        hi: i64,
        rng: &mut impl Rng,
    ) -> Result<Vec<(Move, String)>, Error> {
        if lo < 0 || hi < 0 || lo > hi {
            return Err(Error::InvalidBounds { lo, hi });
        }
        let k = rng.gen_range(lo..=hi) as usize;

        const FAMILIES: [Family; 3] = [Family::Horizontal, Family::Vertical, Family::Side];
        let mut history = Vec::with_capacity(k);
        for _ in 0..k {
            let family = *FAMILIES.choose(rng).expect("FAMILIES is non-empty");
            let direction = *match family {
                Family::Horizontal => [Direction::Left, Direction::Right]
                    .choose(rng)
                    .expect("non-empty"),
                Family::Vertical => [Direction::Up, Direction::Down]
                    .choose(rng)
                    .expect("non-empty"),
                Family::Side => [Direction::Positive, Direction::Negative]
                    .choose(rng)
                    .expect("non-empty"),
            };
            let index = rng.gen_range(0..self.n);
            let mv = Move::new(family, index, direction)?;
            self.apply_move(mv)?;
            history.push((mv, self.state()));
        }
        Ok(history)
    }

    /// Rotates the row `row` across the lateral faces `Left, Front, Right,
    /// Back`, plus the auxiliary rotation of `Up`/`Down` when the row is the
    /// outer layer.
    fn horizontal_rotate(&mut self, row: usize, direction: Direction) -> Result<(), Error> {
        let l = self.faces[LEFT][row].clone();
        let f = self.faces[FRONT][row].clone();
        let r = self.faces[RIGHT][row].clone();
        let b = self.faces[BACK][row].clone();
        match direction {
            Direction::Left => {
                self.faces[LEFT][row] = f;
                self.faces[FRONT][row] = r;
                self.faces[RIGHT][row] = b;
                self.faces[BACK][row] = l;
                if row == 0 {
                    self.faces[UP] = rotate_cw(&self.faces[UP]);
                }
                if row == self.n - 1 {
                    self.faces[DOWN] = rotate_ccw(&self.faces[DOWN]);
                }
            }
            Direction::Right => {
                self.faces[LEFT][row] = b;
                self.faces[FRONT][row] = l;
                self.faces[RIGHT][row] = f;
                self.faces[BACK][row] = r;
                if row == 0 {
                    self.faces[UP] = rotate_ccw(&self.faces[UP]);
                }
                if row == self.n - 1 {
                    self.faces[DOWN] = rotate_cw(&self.faces[DOWN]);
                }
            }
            other => return Err(Error::InvalidDirection(format!("{:?}", other))),
        }
        Ok(())
    }

    /// Rotates the column `col` across the lateral faces `Up, Front, Down,
    /// Back`, plus the auxiliary rotation of `Left`/`Right`.
    fn vertical_rotate(&mut self, col: usize, direction: Direction) -> Result<(), Error> {
        let u: Vec<u8> = (0..self.n).map(|i| self.faces[UP][i][col]).collect();
        let f: Vec<u8> = (0..self.n).map(|i| self.faces[FRONT][i][col]).collect();
        let d: Vec<u8> = (0..self.n).map(|i| self.faces[DOWN][i][col]).collect();
        let b: Vec<u8> = (0..self.n).map(|i| self.faces[BACK][i][col]).collect();
        match direction {
            Direction::Up => {
                for i in 0..self.n {
                    self.faces[UP][i][col] = f[i];
                    self.faces[FRONT][i][col] = d[i];
                    self.faces[DOWN][i][col] = b[i];
                    self.faces[BACK][i][col] = u[i];
                }
                if col == 0 {
                    self.faces[LEFT] = rotate_ccw(&self.faces[LEFT]);
                }
                if col == self.n - 1 {
                    self.faces[RIGHT] = rotate_cw(&self.faces[RIGHT]);
                }
            }
            Direction::Down => {
                for i in 0..self.n {
                    self.faces[UP][i][col] = b[i];
                    self.faces[FRONT][i][col] = u[i];
                    self.faces[DOWN][i][col] = f[i];
                    self.faces[BACK][i][col] = d[i];
                }
                if col == 0 {
                    self.faces[LEFT] = rotate_cw(&self.faces[LEFT]);
                }
                if col == self.n - 1 {
                    self.faces[RIGHT] = rotate_ccw(&self.faces[RIGHT]);
                }
            }
            other => return Err(Error::InvalidDirection(format!("{:?}", other))),
        }
        Ok(())
    }

    /// Rotates the depth slice `depth` (distance from `Front`) across the
    /// lateral faces `Up, Right, Down, Left`, plus the auxiliary rotation of
    /// `Front`/`Back`.
    fn side_rotate(&mut self, depth: usize, direction: Direction) -> Result<(), Error> {
        let idx = self.n - 1 - depth;
        let u = self.faces[UP][idx].clone();
        let r = self.faces[RIGHT][idx].clone();
        let d = self.faces[DOWN][idx].clone();
        let l = self.faces[LEFT][idx].clone();
        match direction {
            Direction::Positive => {
                self.faces[UP][idx] = l;
                self.faces[RIGHT][idx] = u;
                self.faces[DOWN][idx] = r;
                self.faces[LEFT][idx] = d;
                if depth == 0 {
                    self.faces[FRONT] = rotate_cw(&self.faces[FRONT]);
                }
                if depth == self.n - 1 {
                    self.faces[BACK] = rotate_ccw(&self.faces[BACK]);
                }
            }
            Direction::Negative => {
                self.faces[UP][idx] = r;
                self.faces[RIGHT][idx] = d;
                self.faces[DOWN][idx] = l;
                self.faces[LEFT][idx] = u;
                if depth == 0 {
                    self.faces[FRONT] = rotate_ccw(&self.faces[FRONT]);
                }
                if depth == self.n - 1 {
                    self.faces[BACK] = rotate_cw(&self.faces[BACK]);
                }
            }
            other => return Err(Error::InvalidDirection(format!("{:?}", other))),
        }
        Ok(())
    }
}

/// `new[i][j] = old[n-1-j][i]`.
fn rotate_cw(face: &Face) -> Face {
    let n = face.len();
    let mut out = vec![vec![0u8; n]; n];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = face[n - 1 - j][i];
        }
    }
    out
}

/// `new[i][j] = old[j][n-1-i]`.
fn rotate_ccw(face: &Face) -> Face {
    let n = face.len();
    let mut out = vec![vec![0u8; n]; n];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = face[j][n - 1 - i];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Direction, Family};

    fn palette() -> [char; FACE_COUNT] {
        DEFAULT_PALETTE
    }

    #[test]
    fn scenario_1_solved_cube_is_solved() {
        let cube = Cube::new(3, palette());
        assert!(cube.is_solved());
        let expected = "W".repeat(9) + &"G".repeat(9) + &"O".repeat(9) + &"B".repeat(9)
            + &"R".repeat(9) + &"Y".repeat(9);
        assert_eq!(cube.state(), expected);
    }

    #[test]
    fn scenario_2_horizontal_left_row0() {
        // L<-F, F<-R, R<-B, B<-L, matching original_source/src/cube.py's
        // 'left' branch: front picks up old Right (B), right old Back (R),
        // back old Left (G), left old Front (O).
        let mut cube = Cube::new(3, palette());
        cube.apply_move(Move::new(Family::Horizontal, 0, Direction::Left).unwrap())
            .unwrap();
        assert_eq!(cube.faces[FRONT][0], vec![3u8, 3, 3]); // B
        assert_eq!(cube.faces[RIGHT][0], vec![4u8, 4, 4]); // R
        assert_eq!(cube.faces[BACK][0], vec![1u8, 1, 1]); // G
        assert_eq!(cube.faces[LEFT][0], vec![2u8, 2, 2]); // O
    }

    #[test]
    fn scenario_3_inverse_pair_restores_solved() {
        let mut cube = Cube::new(3, palette());
        let solved = cube.clone();
        cube.apply_move(Move::new(Family::Vertical, 1, Direction::Up).unwrap())
            .unwrap();
        cube.apply_move(Move::new(Family::Vertical, 1, Direction::Down).unwrap())
            .unwrap();
        assert_eq!(cube, solved);
    }

    #[test]
    fn scenario_6_reset_restores_solved() {
        let mut cube = Cube::new(3, palette());
        let solved = cube.clone();
        cube.apply_move(Move::new(Family::Side, 2, Direction::Positive).unwrap())
            .unwrap();
        cube.apply_move(Move::new(Family::Horizontal, 1, Direction::Right).unwrap())
            .unwrap();
        assert_ne!(cube, solved);
        cube.reset();
        assert_eq!(cube, solved);
    }

    #[test]
    fn p1_every_move_is_involutive() {
        let n = 3;
        for index in 0..n {
            for m in [
                Move::new(Family::Horizontal, index, Direction::Left).unwrap(),
                Move::new(Family::Vertical, index, Direction::Up).unwrap(),
                Move::new(Family::Side, index, Direction::Positive).unwrap(),
            ] {
                let mut cube = Cube::new(n, palette());
                let solved = cube.clone();
                cube.apply_move(m).unwrap();
                cube.apply_move(m.inverse()).unwrap();
                assert_eq!(cube, solved, "move {:?} is not involutive", m);
            }
        }
    }

    #[test]
    fn p2_solved_state_is_constant() {
        assert_eq!(Cube::new(3, palette()).state(), Cube::new(3, palette()).state());
    }

    #[test]
    fn p3_state_round_trips() {
        let mut cube = Cube::new(4, palette());
        cube.apply_move(Move::new(Family::Horizontal, 2, Direction::Left).unwrap())
            .unwrap();
        let s = cube.state();
        let reconstructed = Cube::from_state(&s, palette()).unwrap();
        assert_eq!(reconstructed.state(), s);
    }

    #[test]
    fn from_state_rejects_bad_length() {
        assert!(Cube::from_state("WGOBRY", palette()).is_err());
    }

    #[test]
    fn from_state_rejects_unknown_symbol() {
        let bad = "Z".repeat(54);
        assert!(Cube::from_state(&bad, palette()).is_err());
    }

    #[test]
    fn apply_move_rejects_out_of_range_index() {
        let mut cube = Cube::new(3, palette());
        let m = Move::new(Family::Horizontal, 5, Direction::Left).unwrap();
        assert_eq!(
            cube.apply_move(m),
            Err(Error::OutOfRange { index: 5, n: 3 })
        );
    }

    #[test]
    fn shuffle_rejects_invalid_bounds() {
        let mut cube = Cube::new(3, palette());
        let mut rng = rand::thread_rng();
        assert!(cube.shuffle(-1, 3, &mut rng).is_err());
        assert!(cube.shuffle(5, 2, &mut rng).is_err());
    }

    #[test]
    fn shuffle_applies_k_moves_in_bounds() {
        let mut cube = Cube::new(3, palette());
        let mut rng = rand::thread_rng();
        let history = cube.shuffle(2, 2, &mut rng).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().1, cube.state());
    }
}
