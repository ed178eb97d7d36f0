//! Facelet-level model of a 3x3x3 cube: the state, the move notation that
//! acts on it, and the table of physical pieces.

mod cube;
mod cubies;
mod engine;
mod facelet;
mod moves;

pub use cube::{CubeState, StateInvariantError, StateParseError, moved_facelets, orientations};
pub use cubies::{CUBIES, CubieId, CubieIndex, CubieKind, CubieParseError, UnknownCubie};
pub use engine::MoveEngine;
pub use facelet::{Face, FaceSet, Facelet, at};
pub use moves::{
    BaseMove, Direction, Move, NotationError, format_sequence, invert_sequence, parse_sequence,
    random_sequence, random_sequence_from,
};
