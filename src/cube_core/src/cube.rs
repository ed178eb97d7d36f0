use std::fmt::Display;

use itertools::Itertools;
use log::trace;
use thiserror::Error;

use crate::{
    facelet::{Face, Facelet, at},
    moves::{BaseMove, Direction, Move},
};

/// A clockwise turn of one layer, expressed as 4-cycles of facelet indices.
/// The sticker at `cycle[0]` moves to `cycle[1]`, and so on around.
type Cycles = &'static [[usize; 4]];

/// A whole-cube rotation as `(from, to, spin)` transfers: the stickers of face
/// `from` end up on face `to`, spun clockwise `spin` quarter turns.
type Reorientation = [(Face, Face, u8); 6];

enum Primitive {
    Cycles(Cycles),
    Reorient(&'static Reorientation),
}

const U_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(U, 0, 0), at(U, 0, 2), at(U, 2, 2), at(U, 2, 0)],
        [at(U, 0, 1), at(U, 1, 2), at(U, 2, 1), at(U, 1, 0)],
        [at(F, 0, 0), at(L, 0, 0), at(B, 0, 0), at(R, 0, 0)],
        [at(F, 0, 1), at(L, 0, 1), at(B, 0, 1), at(R, 0, 1)],
        [at(F, 0, 2), at(L, 0, 2), at(B, 0, 2), at(R, 0, 2)],
    ]
};

const D_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(D, 0, 0), at(D, 0, 2), at(D, 2, 2), at(D, 2, 0)],
        [at(D, 0, 1), at(D, 1, 2), at(D, 2, 1), at(D, 1, 0)],
        [at(F, 2, 0), at(R, 2, 0), at(B, 2, 0), at(L, 2, 0)],
        [at(F, 2, 1), at(R, 2, 1), at(B, 2, 1), at(L, 2, 1)],
        [at(F, 2, 2), at(R, 2, 2), at(B, 2, 2), at(L, 2, 2)],
    ]
};

const F_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(F, 0, 0), at(F, 0, 2), at(F, 2, 2), at(F, 2, 0)],
        [at(F, 0, 1), at(F, 1, 2), at(F, 2, 1), at(F, 1, 0)],
        [at(R, 0, 0), at(D, 0, 2), at(L, 2, 2), at(U, 2, 0)],
        [at(R, 1, 0), at(D, 0, 1), at(L, 1, 2), at(U, 2, 1)],
        [at(R, 2, 0), at(D, 0, 0), at(L, 0, 2), at(U, 2, 2)],
    ]
};

const B_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(B, 0, 0), at(B, 0, 2), at(B, 2, 2), at(B, 2, 0)],
        [at(B, 0, 1), at(B, 1, 2), at(B, 2, 1), at(B, 1, 0)],
        [at(R, 0, 2), at(U, 0, 0), at(L, 2, 0), at(D, 2, 2)],
        [at(R, 1, 2), at(U, 0, 1), at(L, 1, 0), at(D, 2, 1)],
        [at(R, 2, 2), at(U, 0, 2), at(L, 0, 0), at(D, 2, 0)],
    ]
};

const L_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(L, 0, 0), at(L, 0, 2), at(L, 2, 2), at(L, 2, 0)],
        [at(L, 0, 1), at(L, 1, 2), at(L, 2, 1), at(L, 1, 0)],
        [at(F, 0, 0), at(D, 0, 0), at(B, 2, 2), at(U, 0, 0)],
        [at(F, 1, 0), at(D, 1, 0), at(B, 1, 2), at(U, 1, 0)],
        [at(F, 2, 0), at(D, 2, 0), at(B, 0, 2), at(U, 2, 0)],
    ]
};

const R_CYCLES: [[usize; 4]; 5] = {
    use Face::*;
    [
        [at(R, 0, 0), at(R, 0, 2), at(R, 2, 2), at(R, 2, 0)],
        [at(R, 0, 1), at(R, 1, 2), at(R, 2, 1), at(R, 1, 0)],
        [at(F, 0, 2), at(U, 0, 2), at(B, 2, 0), at(D, 0, 2)],
        [at(F, 1, 2), at(U, 1, 2), at(B, 1, 0), at(D, 1, 2)],
        [at(F, 2, 2), at(U, 2, 2), at(B, 0, 0), at(D, 2, 2)],
    ]
};

const M_CYCLES: [[usize; 4]; 3] = {
    use Face::*;
    [
        [at(F, 0, 1), at(D, 0, 1), at(B, 2, 1), at(U, 0, 1)],
        [at(F, 1, 1), at(D, 1, 1), at(B, 1, 1), at(U, 1, 1)],
        [at(F, 2, 1), at(D, 2, 1), at(B, 0, 1), at(U, 2, 1)],
    ]
};

const E_CYCLES: [[usize; 4]; 3] = {
    use Face::*;
    [
        [at(F, 1, 0), at(R, 1, 0), at(B, 1, 0), at(L, 1, 0)],
        [at(F, 1, 1), at(R, 1, 1), at(B, 1, 1), at(L, 1, 1)],
        [at(F, 1, 2), at(R, 1, 2), at(B, 1, 2), at(L, 1, 2)],
    ]
};

const S_CYCLES: [[usize; 4]; 3] = {
    use Face::*;
    [
        [at(R, 0, 1), at(D, 1, 2), at(L, 2, 1), at(U, 1, 0)],
        [at(R, 1, 1), at(D, 1, 1), at(L, 1, 1), at(U, 1, 1)],
        [at(R, 2, 1), at(D, 1, 0), at(L, 0, 1), at(U, 1, 2)],
    ]
};

const X_ROTATION: Reorientation = {
    use Face::*;
    [
        (F, U, 0),
        (R, R, 1),
        (B, D, 2),
        (L, L, 3),
        (U, B, 2),
        (D, F, 0),
    ]
};

const Y_ROTATION: Reorientation = {
    use Face::*;
    [
        (F, L, 0),
        (R, F, 0),
        (B, R, 0),
        (L, B, 0),
        (U, U, 1),
        (D, D, 3),
    ]
};

const Z_ROTATION: Reorientation = {
    use Face::*;
    [
        (F, F, 1),
        (R, D, 1),
        (B, B, 3),
        (L, U, 1),
        (U, R, 1),
        (D, L, 1),
    ]
};

const fn primitive(base: BaseMove) -> Primitive {
    match base {
        BaseMove::U => Primitive::Cycles(&U_CYCLES),
        BaseMove::D => Primitive::Cycles(&D_CYCLES),
        BaseMove::F => Primitive::Cycles(&F_CYCLES),
        BaseMove::B => Primitive::Cycles(&B_CYCLES),
        BaseMove::L => Primitive::Cycles(&L_CYCLES),
        BaseMove::R => Primitive::Cycles(&R_CYCLES),
        BaseMove::M => Primitive::Cycles(&M_CYCLES),
        BaseMove::E => Primitive::Cycles(&E_CYCLES),
        BaseMove::S => Primitive::Cycles(&S_CYCLES),
        BaseMove::X => Primitive::Reorient(&X_ROTATION),
        BaseMove::Y => Primitive::Reorient(&Y_ROTATION),
        BaseMove::Z => Primitive::Reorient(&Z_ROTATION),
    }
}

/// Every facelet position a turn of `base` carries a sticker away from, in
/// storage order
#[must_use]
pub fn moved_facelets(base: BaseMove) -> Vec<Facelet> {
    match primitive(base) {
        Primitive::Cycles(cycles) => cycles
            .iter()
            .flatten()
            .sorted()
            .map(|index| Facelet::from_index(*index))
            .collect(),
        Primitive::Reorient(_) => (0..54).map(Facelet::from_index).collect(),
    }
}

/// The whole-cube orientations reachable from home, as rotation sequences.
/// Every one of the 24 orientations appears exactly once.
pub fn orientations() -> impl Iterator<Item = Vec<Move>> {
    const TILTS: [&[Move]; 6] = [
        &[],
        &[Move::new(BaseMove::X, Direction::Normal)],
        &[Move::new(BaseMove::X, Direction::Double)],
        &[Move::new(BaseMove::X, Direction::Prime)],
        &[Move::new(BaseMove::Z, Direction::Normal)],
        &[Move::new(BaseMove::Z, Direction::Prime)],
    ];
    const SPINS: [Option<Direction>; 4] = [
        None,
        Some(Direction::Normal),
        Some(Direction::Double),
        Some(Direction::Prime),
    ];

    TILTS
        .into_iter()
        .cartesian_product(SPINS)
        .map(|(tilt, spin)| {
            let mut moves = tilt.to_vec();
            moves.extend(spin.map(|dir| Move::new(BaseMove::Y, dir)));
            moves
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateInvariantError {
    #[error("Expected 9 facelets labelled {label} but found {count}; the cube was scanned incorrectly")]
    WrongLabelCount { label: Face, count: usize },
    #[error("The six centre facelets do not carry six different labels")]
    CentersNotDistinct,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateParseError {
    #[error("Expected 54 facelets but found {0}")]
    WrongLength(usize),
    #[error("Unknown facelet label `{label}` at index {index}")]
    UnknownLabel { label: char, index: usize },
}

/// The labels of all 54 facelets, stored face by face in `Face::ALL` order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    facelets: [Face; 54],
}

impl CubeState {
    #[must_use]
    pub fn solved() -> CubeState {
        CubeState {
            facelets: std::array::from_fn(|i| Face::ALL[i / 9]),
        }
    }

    /// Builds a state from per-face labels in `Face::ALL` order, each face in
    /// row-major order.
    #[must_use]
    pub fn from_faces(faces: [[Face; 9]; 6]) -> CubeState {
        CubeState {
            facelets: std::array::from_fn(|i| faces[i / 9][i % 9]),
        }
    }

    /// Parses the 54 character encoding produced by
    /// [`CubeState::canonical_string`].
    pub fn from_canonical(encoding: &str) -> Result<CubeState, StateParseError> {
        let labels = encoding.trim().chars().collect_vec();
        if labels.len() != 54 {
            return Err(StateParseError::WrongLength(labels.len()));
        }

        let mut facelets = [Face::U; 54];
        for (index, label) in labels.into_iter().enumerate() {
            let face = Face::CANONICAL_ORDER[index / 9];
            facelets[at(face, 0, 0) + index % 9] =
                Face::from_letter(label).ok_or(StateParseError::UnknownLabel { label, index })?;
        }

        Ok(CubeState { facelets })
    }

    #[must_use]
    pub fn facelet(&self, facelet: Facelet) -> Face {
        self.facelets[facelet.index()]
    }

    #[must_use]
    pub fn face(&self, face: Face) -> [Face; 9] {
        let start = at(face, 0, 0);
        std::array::from_fn(|i| self.facelets[start + i])
    }

    #[must_use]
    pub fn center(&self, face: Face) -> Face {
        self.facelets[at(face, 1, 1)]
    }

    pub fn apply(&mut self, mv: Move) {
        trace!(target: "engine", "Applying {mv}");

        for _ in 0..mv.quarter_turns() {
            match primitive(mv.base) {
                Primitive::Cycles(cycles) => {
                    for cycle in cycles {
                        self.cycle(*cycle);
                    }
                }
                Primitive::Reorient(transfers) => self.reorient(transfers),
            }
        }
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for mv in moves {
            self.apply(*mv);
        }
    }

    fn cycle(&mut self, [a, b, c, d]: [usize; 4]) {
        let f = &mut self.facelets;
        let tmp = f[d];
        f[d] = f[c];
        f[c] = f[b];
        f[b] = f[a];
        f[a] = tmp;
    }

    fn reorient(&mut self, transfers: &Reorientation) {
        let old = self.facelets;
        for &(from, to, spin) in transfers {
            let start = at(from, 0, 0);
            let mut stickers: [Face; 9] = std::array::from_fn(|i| old[start + i]);
            for _ in 0..spin {
                stickers = spin_clockwise(stickers);
            }
            self.facelets[at(to, 0, 0)..at(to, 0, 0) + 9].copy_from_slice(&stickers);
        }
    }

    /// The 54 character encoding in `U R F D L B` face order, as understood by
    /// two-phase solvers.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        Face::CANONICAL_ORDER
            .into_iter()
            .flat_map(|face| self.face(face))
            .map(Face::letter)
            .collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == CubeState::solved()
    }

    /// Whether every face is a single colour, regardless of which colour sits
    /// where. A solved cube that has been reoriented passes this check.
    #[must_use]
    pub fn is_solved_in_any_orientation(&self) -> bool {
        Face::ALL
            .into_iter()
            .all(|face| self.face(face).iter().all_equal())
    }

    /// Checks that every label occurs exactly nine times.
    pub fn validate(&self) -> Result<(), StateInvariantError> {
        let counts = self.facelets.iter().copied().counts();
        for label in Face::ALL {
            let count = counts.get(&label).copied().unwrap_or(0);
            if count != 9 {
                return Err(StateInvariantError::WrongLabelCount { label, count });
            }
        }
        Ok(())
    }

    /// The whole-cube rotation that puts every centre on its home face, or
    /// `None` if the centres are not six different labels.
    #[must_use]
    pub fn reorientation_to_home(&self) -> Option<Vec<Move>> {
        orientations().find(|rotation| {
            let mut rotated = self.clone();
            rotated.apply_all(rotation);
            Face::ALL
                .into_iter()
                .all(|face| rotated.center(face) == face)
        })
    }

    /// Whether `other` is this state seen from a different orientation
    #[must_use]
    pub fn matches_up_to_rotation(&self, other: &CubeState) -> bool {
        orientations().any(|rotation| {
            let mut rotated = self.clone();
            rotated.apply_all(&rotation);
            rotated == *other
        })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}

impl std::fmt::Debug for CubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CubeState({})", self.canonical_string())
    }
}

impl Display for CubeState {
    /// Draws the unfolded net with U on top, L F R B across, and D below.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = |face: Face, row: usize| -> String {
            self.face(face)[row * 3..row * 3 + 3]
                .iter()
                .map(|label| label.letter())
                .collect()
        };

        for r in 0..3 {
            writeln!(f, "    {}", row(Face::U, r))?;
        }
        for r in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                row(Face::L, r),
                row(Face::F, r),
                row(Face::R, r),
                row(Face::B, r)
            )?;
        }
        for r in 0..3 {
            writeln!(f, "    {}", row(Face::D, r))?;
        }
        Ok(())
    }
}

fn spin_clockwise(stickers: [Face; 9]) -> [Face; 9] {
    std::array::from_fn(|i| {
        let (r, c) = (i / 3, i % 3);
        stickers[(2 - c) * 3 + r]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{format_sequence, invert_sequence, parse_sequence, random_sequence_from};

    fn applied(text: &str) -> CubeState {
        let mut state = CubeState::solved();
        state.apply_all(&parse_sequence(text).unwrap());
        state
    }

    #[test]
    fn every_layer_has_order_four() {
        for base in BaseMove::LAYERS.into_iter().chain([BaseMove::X, BaseMove::Y, BaseMove::Z]) {
            let mut state = applied("R U Fi D2 L B2 M E S");
            let before = state.clone();
            for i in 0..4 {
                state.apply(Move::new(base, Direction::Normal));
                assert_eq!(state == before, i == 3, "{base} after {} turns", i + 1);
            }
        }
    }

    #[test]
    fn prime_and_double_repeat_the_quarter_turn() {
        for base in BaseMove::LAYERS {
            let mut three = CubeState::solved();
            let mut two = CubeState::solved();
            for _ in 0..3 {
                three.apply(Move::new(base, Direction::Normal));
            }
            for _ in 0..2 {
                two.apply(Move::new(base, Direction::Normal));
            }

            let mut prime = CubeState::solved();
            prime.apply(Move::new(base, Direction::Prime));
            let mut double = CubeState::solved();
            double.apply(Move::new(base, Direction::Double));

            assert_eq!(three, prime);
            assert_eq!(two, double);
        }
    }

    #[test_log::test]
    fn random_sequences_are_undone_by_their_inverse() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..50 {
            let moves = random_sequence_from(&mut rng, &BaseMove::LAYERS, 40);
            let mut state = CubeState::solved();
            state.apply_all(&moves);
            state.apply_all(&invert_sequence(&moves));
            assert!(state.is_solved(), "{}", format_sequence(&moves));
        }
    }

    #[test]
    fn canonical_string_has_nine_of_each_label() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..20 {
            let mut state = CubeState::solved();
            state.apply_all(&random_sequence_from(&mut rng, &BaseMove::LAYERS, 30));
            let encoding = state.canonical_string();
            assert_eq!(encoding.len(), 54);
            for face in Face::ALL {
                assert_eq!(encoding.chars().filter(|c| *c == face.letter()).count(), 9);
            }
            assert_eq!(state.validate(), Ok(()));
        }
    }

    #[test]
    fn solved_encoding() {
        assert_eq!(
            CubeState::solved().canonical_string(),
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
        );
    }

    #[test]
    fn single_turn_encodings() {
        assert_eq!(
            applied("R").canonical_string(),
            "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
        );
        assert_eq!(
            applied("U").canonical_string(),
            "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB"
        );
    }

    #[test]
    fn sexy_move_encoding() {
        let state = applied("R U Ri Ui");
        assert!(!state.is_solved());
        assert_eq!(
            state.canonical_string(),
            "UULUUFUUFRRUBRRURRFFDFFUFFFDDRDDDDDDBLLLLLLLLBRRBBBBBB"
        );
    }

    #[test]
    fn canonical_encoding_parses_back() {
        let state = applied("R U Ri Ui F2 M E2 Si");
        assert_eq!(
            CubeState::from_canonical(&state.canonical_string()),
            Ok(state)
        );
        assert_eq!(
            CubeState::from_canonical("UUU"),
            Err(StateParseError::WrongLength(3))
        );
        let mut bad = CubeState::solved().canonical_string();
        bad.replace_range(10..11, "Q");
        assert_eq!(
            CubeState::from_canonical(&bad),
            Err(StateParseError::UnknownLabel {
                label: 'Q',
                index: 10
            })
        );
    }

    #[test]
    fn slices_are_rotations_with_opposite_faces() {
        for (slice, expansion) in [("M", "Xi R Li"), ("E", "Yi U Di"), ("S", "Z Fi B")] {
            assert_eq!(applied(slice), applied(expansion), "{slice}");
        }
    }

    #[test]
    fn slices_leave_outer_faces_unturned() {
        let state = applied("M E S");
        for face in Face::ALL {
            for corner in [0, 2, 6, 8] {
                assert_eq!(state.face(face)[corner], face);
            }
        }
    }

    #[test]
    fn moved_facelets_are_the_ones_that_change() {
        let scrambled = applied("R U2 Fi L D B2 M E S");
        for base in BaseMove::LAYERS {
            let moved = moved_facelets(base);
            let mut state = scrambled.clone();
            state.apply(Move::new(base, Direction::Normal));
            for index in 0..54 {
                let facelet = Facelet::from_index(index);
                if !moved.contains(&facelet) {
                    assert_eq!(state.facelet(facelet), scrambled.facelet(facelet), "{base}");
                }
            }
        }

        assert_eq!(moved_facelets(BaseMove::U).len(), 20);
        assert!(!moved_facelets(BaseMove::U).contains(&Facelet::new(Face::U, 1, 1)));
        let equator = moved_facelets(BaseMove::E);
        assert_eq!(equator.len(), 12);
        assert!(equator.contains(&Facelet::new(Face::F, 1, 1)));
        assert!(equator.contains(&Facelet::new(Face::L, 1, 2)));
    }

    #[test]
    fn validation_counts_labels() {
        let mut faces = [[Face::F; 9]; 6];
        for (i, face) in Face::ALL.into_iter().enumerate() {
            faces[i] = [face; 9];
        }
        faces[0][0] = Face::U;
        assert_eq!(
            CubeState::from_faces(faces).validate(),
            Err(StateInvariantError::WrongLabelCount {
                label: Face::F,
                count: 8
            })
        );
    }

    #[test]
    fn there_are_24_distinct_orientations() {
        let states = orientations()
            .map(|rotation| {
                let mut state = CubeState::solved();
                state.apply_all(&rotation);
                state
            })
            .unique()
            .count();
        assert_eq!(states, 24);
    }

    #[test]
    fn reorientation_undoes_rotations() {
        let scrambled = applied("R U2 Fi L D");
        for rotation in orientations() {
            let mut state = scrambled.clone();
            state.apply_all(&rotation);
            let home = state.reorientation_to_home().unwrap();
            state.apply_all(&home);
            assert_eq!(state, scrambled);
            assert!(state.matches_up_to_rotation(&scrambled));
        }
    }

    #[test]
    fn rotated_solved_cube_counts_as_solved() {
        let state = applied("R Li Mi");
        assert!(!state.is_solved());
        assert!(state.is_solved_in_any_orientation());
        assert!(!applied("R").is_solved_in_any_orientation());
    }

    #[test]
    fn duplicate_centres_have_no_home() {
        let mut faces = [[Face::F; 9]; 6];
        for (i, face) in Face::ALL.into_iter().enumerate() {
            faces[i] = [face; 9];
        }
        faces[1][4] = Face::F;
        assert_eq!(CubeState::from_faces(faces).reorientation_to_home(), None);
    }
}
