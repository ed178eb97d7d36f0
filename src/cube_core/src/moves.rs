//! Move notation.
//!
//! A token is a layer letter followed by an optional modifier: nothing for a
//! clockwise quarter turn, `i` (or `'`) for a counter-clockwise quarter turn,
//! and `2` for a half turn. Letters are case-insensitive.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::facelet::Face;

/// A layer that can be turned, or a whole-cube reorientation.
///
/// - U, D, F, B, L, R: outer faces, clockwise as seen from that face
/// - M: middle slice between L and R, turning like L
/// - E: equatorial slice between U and D, turning like D
/// - S: standing slice between F and B, turning like F
/// - X, Y, Z: the whole cube, turning like R, U, and F respectively
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BaseMove {
    U,
    D,
    F,
    B,
    L,
    R,
    M,
    E,
    S,
    X,
    Y,
    Z,
}

impl BaseMove {
    pub const FACE_TURNS: [Self; 6] = {
        use BaseMove::*;
        [U, D, F, B, L, R]
    };

    pub const LAYERS: [Self; 9] = {
        use BaseMove::*;
        [U, D, F, B, L, R, M, E, S]
    };

    #[must_use]
    pub const fn from_face(face: Face) -> BaseMove {
        match face {
            Face::F => BaseMove::F,
            Face::R => BaseMove::R,
            Face::B => BaseMove::B,
            Face::L => BaseMove::L,
            Face::U => BaseMove::U,
            Face::D => BaseMove::D,
        }
    }

    /// The outer face this move turns, if it is a face turn
    #[must_use]
    pub const fn face(self) -> Option<Face> {
        Some(match self {
            BaseMove::F => Face::F,
            BaseMove::R => Face::R,
            BaseMove::B => Face::B,
            BaseMove::L => Face::L,
            BaseMove::U => Face::U,
            BaseMove::D => Face::D,
            _ => return None,
        })
    }

    /// The face whose clockwise direction a slice or rotation follows
    #[must_use]
    pub const fn follows(self) -> Face {
        match self {
            BaseMove::M => Face::L,
            BaseMove::E => Face::D,
            BaseMove::S => Face::F,
            BaseMove::X => Face::R,
            BaseMove::Y => Face::U,
            BaseMove::Z => Face::F,
            _ => match self.face() {
                Some(face) => face,
                None => unreachable!(),
            },
        }
    }

    #[must_use]
    pub const fn is_slice(self) -> bool {
        matches!(self, BaseMove::M | BaseMove::E | BaseMove::S)
    }

    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(self, BaseMove::X | BaseMove::Y | BaseMove::Z)
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            BaseMove::U => 'U',
            BaseMove::D => 'D',
            BaseMove::F => 'F',
            BaseMove::B => 'B',
            BaseMove::L => 'L',
            BaseMove::R => 'R',
            BaseMove::M => 'M',
            BaseMove::E => 'E',
            BaseMove::S => 'S',
            BaseMove::X => 'X',
            BaseMove::Y => 'Y',
            BaseMove::Z => 'Z',
        }
    }

    fn from_letter(letter: char) -> Option<BaseMove> {
        Some(match letter.to_ascii_uppercase() {
            'U' => BaseMove::U,
            'D' => BaseMove::D,
            'F' => BaseMove::F,
            'B' => BaseMove::B,
            'L' => BaseMove::L,
            'R' => BaseMove::R,
            'M' => BaseMove::M,
            'E' => BaseMove::E,
            'S' => BaseMove::S,
            'X' => BaseMove::X,
            'Y' => BaseMove::Y,
            'Z' => BaseMove::Z,
            _ => return None,
        })
    }
}

impl Display for BaseMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// How far to turn. `Prime` is a counter-clockwise quarter turn and `Double` a
/// half turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Normal,
    Prime,
    Double,
}

impl Direction {
    /// Number of clockwise quarter turns
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Direction::Normal => 1,
            Direction::Double => 2,
            Direction::Prime => 3,
        }
    }

    /// The direction for `turns` clockwise quarter turns, or `None` when the
    /// turns cancel out.
    #[must_use]
    pub const fn from_quarter_turns(turns: i32) -> Option<Direction> {
        match turns.rem_euclid(4) {
            1 => Some(Direction::Normal),
            2 => Some(Direction::Double),
            3 => Some(Direction::Prime),
            _ => None,
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::Normal => Direction::Prime,
            Direction::Prime => Direction::Normal,
            Direction::Double => Direction::Double,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Normal => write!(f, ""),
            Direction::Prime => write!(f, "i"),
            Direction::Double => write!(f, "2"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub base: BaseMove,
    pub dir: Direction,
}

impl Move {
    #[must_use]
    pub const fn new(base: BaseMove, dir: Direction) -> Move {
        Move { base, dir }
    }

    /// A move turning `base` by `turns` clockwise quarter turns, if that is not
    /// the identity
    #[must_use]
    pub const fn from_quarter_turns(base: BaseMove, turns: i32) -> Option<Move> {
        match Direction::from_quarter_turns(turns) {
            Some(dir) => Some(Move { base, dir }),
            None => None,
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move {
            base: self.base,
            dir: self.dir.inverse(),
        }
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.dir.quarter_turns()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.dir)
    }
}

impl FromStr for Move {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let base = chars.next().and_then(BaseMove::from_letter).ok_or(())?;
        let dir = match chars.as_str() {
            "" => Direction::Normal,
            "2" => Direction::Double,
            "i" | "I" | "'" => Direction::Prime,
            _ => return Err(()),
        };
        Ok(Move { base, dir })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized move `{token}` at position {position}")]
pub struct NotationError {
    pub token: String,
    /// Zero-based index of the token in its sequence
    pub position: usize,
}

/// Parses a whitespace separated move sequence. Nothing is returned unless
/// every token is valid.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, NotationError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<Move>().map_err(|()| NotationError {
                token: token.to_owned(),
                position,
            })
        })
        .collect()
}

/// The sequence undoing `moves`
#[must_use]
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[must_use]
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// A random face-turn scramble of `len` moves
pub fn random_sequence(rng: &mut fastrand::Rng, len: usize) -> Vec<Move> {
    random_sequence_from(rng, &BaseMove::FACE_TURNS, len)
}

/// A random sequence over `alphabet` where no two consecutive moves turn the
/// same layer
///
/// # Panics
///
/// Panics if `alphabet` has fewer than two moves and `len > 1`
pub fn random_sequence_from(
    rng: &mut fastrand::Rng,
    alphabet: &[BaseMove],
    len: usize,
) -> Vec<Move> {
    const DIRECTIONS: [Direction; 3] = [Direction::Normal, Direction::Prime, Direction::Double];

    assert!(alphabet.len() > 1 || len <= 1, "alphabet too small");
    if len == 0 {
        return Vec::new();
    }

    let mut out: Vec<Move> = Vec::with_capacity(len);
    while out.len() < len {
        let base = alphabet[rng.usize(..alphabet.len())];
        if out.last().is_some_and(|prev| prev.base == base) {
            continue;
        }
        out.push(Move::new(base, DIRECTIONS[rng.usize(..3)]));
    }
    out
}
