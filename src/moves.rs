//! The move catalog (C2): the six `(family, direction)` pairs, crossed with
//! every slice index `0..n`, in a stable enumeration order.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which set of lateral faces a move acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Rotates a row across `Left, Front, Right, Back`.
    Horizontal,
    /// Rotates a column across `Up, Front, Down, Back`.
    Vertical,
    /// Rotates a depth slice across `Up, Right, Down, Left`.
    Side,
}

/// Which way a move turns its slice. Only two of the six variants are
/// valid for any given [`Family`]; [`Move::new`] checks this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Positive,
    Negative,
}

impl Direction {
    /// The direction that undoes this one. Same pairing regardless of family:
    /// `Left<->Right`, `Up<->Down`, `Positive<->Negative`.
    pub fn inverse(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    fn matches(self, family: Family) -> bool {
        matches!(
            (family, self),
            (Family::Horizontal, Direction::Left | Direction::Right)
                | (Family::Vertical, Direction::Up | Direction::Down)
                | (Family::Side, Direction::Positive | Direction::Negative)
        )
    }

    fn char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Positive => 'P',
            Direction::Negative => 'N',
        }
    }

    fn from_char(c: char) -> Option<Direction> {
        match c {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'P' => Some(Direction::Positive),
            'N' => Some(Direction::Negative),
            _ => None,
        }
    }
}

/// The six `(family, direction)` pairs, in the order the catalog expands them.
const PAIRS: [(Family, Direction); 6] = [
    (Family::Horizontal, Direction::Left),
    (Family::Horizontal, Direction::Right),
    (Family::Vertical, Direction::Up),
    (Family::Vertical, Direction::Down),
    (Family::Side, Direction::Positive),
    (Family::Side, Direction::Negative),
];

/// A single cube move: which family, which slice, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub family: Family,
    pub index: usize,
    pub direction: Direction,
}

impl Move {
    /// Builds a move, rejecting a direction that doesn't belong to `family`.
    /// Slice range is validated separately by [`crate::cube::Cube::apply_move`],
    /// since it depends on `n`.
    pub fn new(family: Family, index: usize, direction: Direction) -> Result<Move, Error> {
        if !direction.matches(family) {
            return Err(Error::InvalidDirection(format!("{:?}", direction)));
        }
        Ok(Move {
            family,
            index,
            direction,
        })
    }

    /// The move that undoes this one: same family and slice, opposite direction.
    pub fn inverse(self) -> Move {
        Move {
            family: self.family,
            index: self.index,
            direction: self.direction.inverse(),
        }
    }

    /// True if `other` exactly undoes `self`: same family, same slice, opposite direction.
    pub fn is_inverse_of(&self, other: &Move) -> bool {
        self.family == other.family
            && self.index == other.index
            && self.direction == other.direction.inverse()
    }
}

impl fmt::Display for Move {
    /// `H0L`, `V2U`, `S1P`: family letter, slice index, direction letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family {
            Family::Horizontal => 'H',
            Family::Vertical => 'V',
            Family::Side => 'S',
        };
        write!(f, "{}{}{}", family, self.index, self.direction.char())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Move, Error> {
        let mut chars = s.chars();
        let family = match chars.next() {
            Some('H') => Family::Horizontal,
            Some('V') => Family::Vertical,
            Some('S') => Family::Side,
            _ => return Err(Error::InvalidState(s.to_string())),
        };
        let direction_char = s
            .chars()
            .last()
            .ok_or_else(|| Error::InvalidState(s.to_string()))?;
        let direction = Direction::from_char(direction_char)
            .ok_or_else(|| Error::InvalidState(s.to_string()))?;
        let index_str = &s[1..s.len() - 1];
        let index: usize = index_str
            .parse()
            .map_err(|_| Error::InvalidState(s.to_string()))?;
        Move::new(family, index, direction)
    }
}

/// Every `(family, index, direction)` triple for an `n`-cube: `6n` moves total (P7).
pub fn catalog(n: usize) -> Vec<Move> {
    let mut moves = Vec::with_capacity(6 * n);
    for (family, direction) in PAIRS {
        for index in 0..n {
            moves.push(Move {
                family,
                index,
                direction,
            });
        }
    }
    moves
}
