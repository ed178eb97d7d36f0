//! Solving scanned cubes while keeping chosen pieces in place.
//!
//! The [`Solver`] asks a [`SolvingOracle`] for an ordinary solution and then
//! has the [`SolutionAdapter`] rewrite it so that no face carrying a fixed
//! piece is ever turned and no fixed piece is carried along by a slice.

mod adapter;
mod config;
mod frame;
mod oracle;
mod playback;
mod scan;

use std::panic::{AssertUnwindSafe, catch_unwind};

use cube_core::{
    CUBIES, CubeState, CubieId, FaceSet, Move, StateInvariantError, format_sequence,
    parse_sequence,
};
use log::{debug, info, warn};
use thiserror::Error;

pub use adapter::{AdaptError, Adaptation, SolutionAdapter};
pub use config::{ColorScheme, ConfigError, OracleConfig, SolverConfig};
pub use frame::ReferenceFrame;
pub use oracle::{OracleError, SolvingOracle, TwophaseOracle, normalize_solution};
pub use playback::Playback;
pub use scan::{Scan, ScanError};

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    InvalidState(#[from] StateInvariantError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Adapt(#[from] AdaptError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Whole-cube rotation bringing every centre home before the oracle saw
    /// the cube
    pub reorientation: Vec<Move>,
    /// The oracle's solution for the reoriented cube
    pub raw: Vec<Move>,
    /// The moves to actually perform, starting from the scanned cube
    pub adapted: Vec<Move>,
    pub restricted: FaceSet,
    /// Orientation the cube is left in relative to home
    pub frame: ReferenceFrame,
}

impl Solution {
    fn already_solved(restricted: FaceSet) -> Solution {
        Solution {
            reorientation: Vec::new(),
            raw: Vec::new(),
            adapted: Vec::new(),
            restricted,
            frame: ReferenceFrame::identity(),
        }
    }

    #[must_use]
    pub fn playback(&self) -> Playback {
        Playback::new(self.adapted.clone())
    }
}

pub struct Solver<O> {
    oracle: O,
}

impl<O: SolvingOracle> Solver<O> {
    pub fn new(oracle: O) -> Solver<O> {
        Solver { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Finds moves that solve `state` without turning any face that carries a
    /// facelet of one of the `fixed` pieces. `state` itself is never changed.
    pub fn solve(&mut self, state: &CubeState, fixed: &[CubieId]) -> Result<Solution, SolveError> {
        state.validate()?;

        let restricted = CUBIES.restricted_faces(fixed);
        info!(
            target: "solver",
            "Solving {} with restricted faces {restricted}",
            state.canonical_string()
        );

        if state.is_solved_in_any_orientation() {
            info!(target: "solver", "Cube is already solved");
            return Ok(Solution::already_solved(restricted));
        }

        let reorientation = state
            .reorientation_to_home()
            .ok_or(StateInvariantError::CentersNotDistinct)?;
        let mut normalized = state.clone();
        normalized.apply_all(&reorientation);
        if !reorientation.is_empty() {
            debug!(target: "solver", "Reoriented with {}", format_sequence(&reorientation));
        }

        let reply = self.ask_oracle(&normalized.canonical_string())?;
        let text = normalize_solution(&reply);
        let raw = parse_sequence(&text).map_err(OracleError::MalformedSolution)?;

        let mut check = normalized;
        check.apply_all(&raw);
        if !check.is_solved() {
            return Err(OracleError::IncorrectSolution(text).into());
        }
        info!(target: "solver", "Raw solution ({} moves): {text}", raw.len());

        let mut full = reorientation.clone();
        full.extend_from_slice(&raw);
        let Adaptation { moves, frame } = SolutionAdapter::for_pieces(fixed).adapt(&full)?;
        info!(
            target: "solver",
            "Adapted solution ({} moves): {}",
            moves.len(),
            format_sequence(&moves)
        );

        Ok(Solution {
            reorientation,
            raw,
            adapted: moves,
            restricted,
            frame,
        })
    }

    /// Calls the oracle, turning a panic into an error
    fn ask_oracle(&mut self, encoding: &str) -> Result<String, OracleError> {
        debug!(target: "solver", "Asking the oracle to solve {encoding}");
        match catch_unwind(AssertUnwindSafe(|| self.oracle.solve(encoding))) {
            Ok(result) => result,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_owned());
                warn!(target: "solver", "The oracle panicked: {message}");
                Err(OracleError::Panicked(message))
            }
        }
    }
}
