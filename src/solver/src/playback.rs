use std::fmt::Display;

use cube_core::{Move, MoveEngine};
use log::info;

/// Steps through a solution one move at a time. Pacing is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    moves: Vec<Move>,
    position: usize,
}

impl Playback {
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Playback {
        Playback { moves, position: 0 }
    }

    /// The next move to apply
    #[must_use]
    pub fn peek(&self) -> Option<Move> {
        self.moves.get(self.position).copied()
    }

    /// Applies the next move to `engine`, returning it, or `None` once every
    /// move has been played.
    pub fn apply_next(&mut self, engine: &mut MoveEngine) -> Option<Move> {
        let mv = self.peek()?;
        engine.apply(mv);
        self.position += 1;
        info!(target: "playback", "{self}");
        Some(mv)
    }

    /// Number of moves played so far
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position == self.moves.len()
    }
}

impl Display for Playback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position.checked_sub(1).map(|i| self.moves[i]) {
            Some(mv) => write!(f, "Current Move: {mv} ({}/{})", self.position, self.len()),
            None => write!(f, "Current Move: none (0/{})", self.len()),
        }
    }
}
