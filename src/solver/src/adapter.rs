use cube_core::{BaseMove, CUBIES, CubieId, Face, FaceSet, Facelet, Move, moved_facelets};
use log::{debug, trace};
use thiserror::Error;

use crate::frame::ReferenceFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdaptError {
    #[error(
        "Cannot avoid turning {face}: the opposite face {opposite} may not be turned either"
    )]
    OpposingFacesRestricted { face: Face, opposite: Face },
    #[error("Cannot turn {mv}: it would carry the fixed facelet {facelet} away")]
    MovesFixedFacelet { mv: Move, facelet: Facelet },
}

/// A solution rewritten to avoid restricted faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adaptation {
    pub moves: Vec<Move>,
    /// How the cube ends up reoriented relative to the raw solution
    pub frame: ReferenceFrame,
}

/// The slice that, together with a turn of the opposite face, has the same
/// effect on the pieces as turning `face`. The sign is the slice's turning
/// sense relative to `face`.
///
/// ```text
/// U -> D E     D -> U Ei
/// F -> B Si    B -> F S
/// L -> R Mi    R -> L M
/// ```
const fn substitute_slice(face: Face) -> (BaseMove, i32) {
    match face {
        Face::U => (BaseMove::E, 1),
        Face::D => (BaseMove::E, -1),
        Face::F => (BaseMove::S, -1),
        Face::B => (BaseMove::S, 1),
        Face::L => (BaseMove::M, -1),
        Face::R => (BaseMove::M, 1),
    }
}

/// The whole-cube rotation a slice turn amounts to once the outer layers are
/// disregarded
const fn slice_rotation(slice: BaseMove) -> (BaseMove, i32) {
    match slice {
        BaseMove::M => (BaseMove::X, -1),
        BaseMove::E => (BaseMove::Y, -1),
        BaseMove::S => (BaseMove::Z, 1),
        _ => panic!("not a slice"),
    }
}

/// Rewrites solutions so that no restricted face is ever turned.
///
/// A turn of a restricted face is replaced by a turn of the opposite face plus
/// the parallel slice. Both together move the pieces exactly like the original
/// turn would, except that the whole cube ends up rotated. The adapter tracks
/// that rotation in a [`ReferenceFrame`] and redirects every later move to the
/// physical face now playing its part.
///
/// With more than one piece fixed, a substituted slice can run through
/// another fixed piece. Every emitted move is checked against the fixed
/// facelets and the adaptation fails rather than move one of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionAdapter {
    restricted: FaceSet,
    fixed: Vec<Facelet>,
}

impl SolutionAdapter {
    /// An adapter that only avoids turning the `restricted` faces
    #[must_use]
    pub fn new(restricted: FaceSet) -> SolutionAdapter {
        SolutionAdapter {
            restricted,
            fixed: Vec::new(),
        }
    }

    /// An adapter that keeps every facelet of the given pieces in place
    #[must_use]
    pub fn for_pieces(ids: &[CubieId]) -> SolutionAdapter {
        SolutionAdapter {
            fixed: CUBIES.fixed_facelets(ids),
            ..SolutionAdapter::new(CUBIES.restricted_faces(ids))
        }
    }

    fn emit(&self, moves: &mut Vec<Move>, mv: Move) -> Result<(), AdaptError> {
        let moved = moved_facelets(mv.base);
        if let Some(facelet) = self.fixed.iter().find(|facelet| moved.contains(*facelet)) {
            return Err(AdaptError::MovesFixedFacelet {
                mv,
                facelet: *facelet,
            });
        }
        moves.push(mv);
        Ok(())
    }

    pub fn adapt(&self, raw: &[Move]) -> Result<Adaptation, AdaptError> {
        let mut frame = ReferenceFrame::identity();
        let mut moves = Vec::with_capacity(raw.len());

        for &mv in raw {
            if mv.base.is_rotation() {
                frame.absorb(mv);
                trace!(target: "adapter", "Absorbed {mv}: {frame}");
                continue;
            }

            let translated = frame.translate(mv);
            let face = match translated.base.face() {
                Some(face) if self.restricted.contains_face(face) => face,
                _ => {
                    trace!(target: "adapter", "{mv} -> {translated}");
                    self.emit(&mut moves, translated)?;
                    continue;
                }
            };

            let opposite = face.opposite();
            if self.restricted.contains_face(opposite) {
                return Err(AdaptError::OpposingFacesRestricted { face, opposite });
            }

            let turns = i32::from(translated.quarter_turns());
            let (slice, sense) = substitute_slice(face);
            let (Some(slice_move), Some(opposite_move)) = (
                Move::from_quarter_turns(slice, sense * turns),
                Move::from_quarter_turns(BaseMove::from_face(opposite), turns),
            ) else {
                unreachable!("a quarter or half turn never cancels out");
            };

            debug!(
                target: "adapter",
                "{mv} -> {translated} is restricted; substituting {opposite_move} {slice_move}"
            );
            self.emit(&mut moves, opposite_move)?;
            self.emit(&mut moves, slice_move)?;

            let (rotation, rotation_sense) = slice_rotation(slice);
            frame.rotate_by(rotation, rotation_sense * sense * turns);
            trace!(target: "adapter", "Frame is now {frame}");
        }

        Ok(Adaptation { moves, frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{CubeState, format_sequence, parse_sequence, random_sequence};

    fn id(n: u32) -> CubieId {
        CubieId::new(n).unwrap()
    }

    fn adapt(raw: &str, restricted: FaceSet) -> Result<Adaptation, AdaptError> {
        SolutionAdapter::new(restricted).adapt(&parse_sequence(raw).unwrap())
    }

    fn end_state(start: &CubeState, moves: &[Move]) -> CubeState {
        let mut state = start.clone();
        state.apply_all(moves);
        state
    }

    /// The adapted moves reach the raw result, viewed from the final frame
    fn assert_equivalent(start: &CubeState, raw: &[Move], adaptation: &Adaptation) {
        let mut expected = end_state(start, raw);
        expected.apply_all(&adaptation.frame.as_rotation());
        assert_eq!(
            end_state(start, &adaptation.moves),
            expected,
            "raw {} adapted {}",
            format_sequence(raw),
            format_sequence(&adaptation.moves)
        );
    }

    #[test_log::test]
    fn unrestricted_solutions_pass_through() {
        let raw = parse_sequence("R U Ri Ui F2 M E2 Si D B L").unwrap();
        let adaptation = SolutionAdapter::new(FaceSet::empty()).adapt(&raw).unwrap();
        assert_eq!(adaptation.moves, raw);
        assert!(adaptation.frame.is_identity());
    }

    #[test_log::test]
    fn empty_solution_on_solved_cube() {
        let adaptation = adapt("", FaceSet::U).unwrap();
        assert!(adaptation.moves.is_empty());
        assert!(end_state(&CubeState::solved(), &adaptation.moves).is_solved());
    }

    #[test_log::test]
    fn restricted_top_face() {
        let raw = parse_sequence("U F U2").unwrap();
        let adaptation = SolutionAdapter::new(FaceSet::U).adapt(&raw).unwrap();

        assert_eq!(format_sequence(&adaptation.moves), "D E R D2 E2");
        assert!(
            adaptation
                .moves
                .iter()
                .all(|mv| !mv.to_string().starts_with('U'))
        );

        // The E turns leave the old left face in front
        assert_eq!(adaptation.frame.physical_face(Face::F), Face::L);
        assert_eq!(adaptation.frame.physical_face(Face::R), Face::F);
        assert_eq!(adaptation.frame.physical_face(Face::U), Face::U);

        let start = end_state(&CubeState::solved(), &parse_sequence("L F2 Bi D R2").unwrap());
        assert_equivalent(&start, &raw, &adaptation);
        assert!(end_state(&start, &raw).matches_up_to_rotation(&end_state(&start, &adaptation.moves)));
    }

    #[test_log::test]
    fn every_substitution_is_equivalent() {
        for face in Face::ALL {
            for suffix in ["", "i", "2"] {
                let raw = parse_sequence(&format!("{face}{suffix} R U F")).unwrap();
                let adaptation = SolutionAdapter::new(FaceSet::of(face)).adapt(&raw).unwrap();
                assert_eq!(adaptation.moves[0].base, BaseMove::from_face(face.opposite()));
                assert_equivalent(&CubeState::solved(), &raw, &adaptation);
            }
        }
    }

    #[test_log::test]
    fn opposite_faces_cannot_both_be_restricted() {
        assert_eq!(
            adapt("R U", FaceSet::U | FaceSet::D),
            Err(AdaptError::OpposingFacesRestricted {
                face: Face::U,
                opposite: Face::D
            })
        );
        // Moves that never need a substitute are fine
        assert!(adapt("R F L", FaceSet::U | FaceSet::D).is_ok());
    }

    #[test_log::test]
    fn adjacent_restrictions_compose() {
        let raw = parse_sequence("F R U Li B2").unwrap();
        let restricted = FaceSet::F | FaceSet::U | FaceSet::L;
        let adaptation = SolutionAdapter::new(restricted).adapt(&raw).unwrap();
        assert!(adaptation.moves.iter().all(|mv| {
            mv.base
                .face()
                .is_none_or(|face| !restricted.contains_face(face))
        }));
        assert_equivalent(&CubeState::solved(), &raw, &adaptation);
    }

    #[test_log::test]
    fn raw_slices_and_rotations_are_redirected() {
        let raw = parse_sequence("U M Y F E2 Xi R S").unwrap();
        let adaptation = SolutionAdapter::new(FaceSet::U).adapt(&raw).unwrap();
        assert!(adaptation.moves.iter().all(|mv| !mv.base.is_rotation()));
        assert_equivalent(&CubeState::solved(), &raw, &adaptation);
    }

    /// Fixing any single piece keeps its stickers in place through a random
    /// face-turn solution.
    #[test_log::test]
    fn fixed_pieces_never_move() {
        let mut rng = fastrand::Rng::with_seed(0xc0be);
        for _ in 0..300 {
            let id = CubieId::new(rng.u32(1..=54)).unwrap();
            let restricted = CUBIES.restricted_faces(&[id]);
            let start = end_state(&CubeState::solved(), &random_sequence(&mut rng, 20));
            let raw = random_sequence(&mut rng, 25);

            let adaptation = SolutionAdapter::for_pieces(&[id]).adapt(&raw).unwrap();
            assert!(
                adaptation
                    .moves
                    .iter()
                    .filter_map(|mv| mv.base.face())
                    .all(|face| !restricted.contains_face(face))
            );
            assert_equivalent(&start, &raw, &adaptation);

            let end = end_state(&start, &adaptation.moves);
            for facelet in CUBIES.facelets_for(id) {
                assert_eq!(end.facelet(facelet), start.facelet(facelet), "{id}");
            }
        }
    }

    #[test_log::test]
    fn substitutes_may_not_carry_other_fixed_pieces() {
        // The UF and FL edges: U becomes D E, and E runs through FL
        let err = SolutionAdapter::for_pieces(&[id(2), id(4)])
            .adapt(&parse_sequence("U").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            AdaptError::MovesFixedFacelet {
                mv: "E".parse().unwrap(),
                facelet: Facelet::new(Face::F, 1, 0)
            }
        );

        // The F and U centres: E carries the F centre away
        let err = SolutionAdapter::for_pieces(&[id(5), id(41)])
            .adapt(&parse_sequence("R U").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            AdaptError::MovesFixedFacelet { facelet, .. } if facelet == Facelet::new(Face::F, 1, 1)
        ));
    }

    /// With two pieces fixed, every accepted adaptation keeps all of their
    /// facelets in place.
    #[test_log::test]
    fn accepted_adaptations_keep_every_fixed_piece() {
        let mut rng = fastrand::Rng::with_seed(0xf1ed);
        let mut accepted = 0;
        for _ in 0..2000 {
            let ids = [id(rng.u32(1..=54)), id(rng.u32(1..=54))];
            let start = end_state(&CubeState::solved(), &random_sequence(&mut rng, 20));
            let raw = random_sequence(&mut rng, 6);

            let Ok(adaptation) = SolutionAdapter::for_pieces(&ids).adapt(&raw) else {
                continue;
            };
            accepted += 1;
            assert_equivalent(&start, &raw, &adaptation);

            let mut state = start.clone();
            for mv in &adaptation.moves {
                state.apply(*mv);
                for facelet in CUBIES.fixed_facelets(&ids) {
                    assert_eq!(
                        state.facelet(facelet),
                        start.facelet(facelet),
                        "{facelet} of {} {} after {}",
                        ids[0],
                        ids[1],
                        format_sequence(&adaptation.moves)
                    );
                }
            }
        }
        assert!(accepted > 50, "only {accepted} adaptations were accepted");
    }
}
