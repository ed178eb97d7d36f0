use log::{debug, trace};

use crate::{
    cube::CubeState,
    moves::{Move, NotationError, parse_sequence},
};

/// Applies moves to an owned [`CubeState`], keeping a log of everything applied
/// and a running move count.
#[derive(Debug, Clone, Default)]
pub struct MoveEngine {
    state: CubeState,
    log: Vec<Move>,
    move_count: usize,
}

impl MoveEngine {
    #[must_use]
    pub fn new(state: CubeState) -> MoveEngine {
        MoveEngine {
            state,
            log: Vec::new(),
            move_count: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CubeState {
        &self.state
    }

    /// Every move applied so far, oldest first
    #[must_use]
    pub fn log(&self) -> &[Move] {
        &self.log
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn apply(&mut self, mv: Move) {
        trace!(target: "engine", "Move {}: {mv}", self.move_count + 1);
        self.state.apply(mv);
        self.log.push(mv);
        self.move_count += 1;
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for mv in moves {
            self.apply(*mv);
        }
    }

    /// Parses `text` and applies every move in it. If any token is invalid,
    /// nothing is applied.
    pub fn apply_notation(&mut self, text: &str) -> Result<Vec<Move>, NotationError> {
        let moves = parse_sequence(text)?;
        debug!(target: "engine", "Applying {} moves: {text}", moves.len());
        self.apply_all(&moves);
        Ok(moves)
    }
}
