use std::fmt::Display;

use cube_core::{BaseMove, CubeState, Face, Move, orientations};

/// Which physical face currently plays each canonical face's role.
///
/// Substituting a slice turn for a face turn leaves the cube reoriented
/// relative to the solution being followed. The frame records that drift so
/// later moves can be redirected to the faces that now play their part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceFrame {
    physical: [Face; 6],
}

/// Where each face ends up after one clockwise quarter turn of a whole-cube
/// rotation
const fn rotation_target(rotation: BaseMove, face: Face) -> Face {
    use Face::*;
    match rotation {
        BaseMove::X => match face {
            F => U,
            U => B,
            B => D,
            D => F,
            _ => face,
        },
        BaseMove::Y => match face {
            F => L,
            L => B,
            B => R,
            R => F,
            _ => face,
        },
        BaseMove::Z => match face {
            U => R,
            R => D,
            D => L,
            L => U,
            _ => face,
        },
        _ => panic!("not a whole-cube rotation"),
    }
}

/// The slice lying next to `face` and its turning sense relative to `face`
const fn slice_beside(face: Face) -> (BaseMove, i32) {
    match face {
        Face::L => (BaseMove::M, 1),
        Face::R => (BaseMove::M, -1),
        Face::D => (BaseMove::E, 1),
        Face::U => (BaseMove::E, -1),
        Face::F => (BaseMove::S, 1),
        Face::B => (BaseMove::S, -1),
    }
}

fn rotate_face(rotation: BaseMove, turns: i32, mut face: Face) -> Face {
    for _ in 0..turns.rem_euclid(4) {
        face = rotation_target(rotation, face);
    }
    face
}

impl ReferenceFrame {
    #[must_use]
    pub fn identity() -> ReferenceFrame {
        ReferenceFrame {
            physical: Face::ALL,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == ReferenceFrame::identity()
    }

    #[must_use]
    pub fn physical_face(&self, role: Face) -> Face {
        self.physical[role as usize]
    }

    /// The role played by a physical face
    #[must_use]
    pub fn role_of(&self, physical: Face) -> Face {
        Face::ALL
            .into_iter()
            .find(|role| self.physical_face(*role) == physical)
            .unwrap_or(physical)
    }

    /// Rewrites a face or slice move in terms of the physical layers that
    /// currently play its part.
    ///
    /// # Panics
    ///
    /// Panics when given a whole-cube rotation; those are absorbed with
    /// [`ReferenceFrame::absorb`] instead.
    #[must_use]
    pub fn translate(&self, mv: Move) -> Move {
        let turns = i32::from(mv.quarter_turns());
        if let Some(face) = mv.base.face() {
            return Move::new(BaseMove::from_face(self.physical_face(face)), mv.dir);
        }

        assert!(mv.base.is_slice(), "cannot translate rotation {mv}");
        let (slice, sense) = slice_beside(self.physical_face(mv.base.follows()));
        match Move::from_quarter_turns(slice, sense * turns) {
            Some(mv) => mv,
            None => unreachable!(),
        }
    }

    /// Records that the cube was physically turned by `turns` clockwise
    /// quarter turns of `rotation`. Every role follows its physical face.
    pub fn rotate_by(&mut self, rotation: BaseMove, turns: i32) {
        for physical in &mut self.physical {
            *physical = rotate_face(rotation, turns, *physical);
        }
    }

    /// Takes a rotation from the solution being followed into the frame.
    /// Afterwards a role refers to the face that the rotation brought into its
    /// position.
    pub fn absorb(&mut self, rotation: Move) {
        let turns = i32::from(rotation.quarter_turns());
        let old = self.physical;
        for role in Face::ALL {
            let source = rotate_face(rotation.base, -turns, role);
            self.physical[role as usize] = old[source as usize];
        }
    }

    /// The whole-cube rotation that turns a home-oriented cube into this
    /// frame: afterwards the centre of each role sits on its physical face.
    #[must_use]
    pub fn as_rotation(&self) -> Vec<Move> {
        orientations()
            .find(|rotation| {
                let mut state = CubeState::solved();
                state.apply_all(rotation);
                Face::ALL
                    .into_iter()
                    .all(|role| state.center(self.physical_face(role)) == role)
            })
            .unwrap_or_default()
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        ReferenceFrame::identity()
    }
}

impl Display for ReferenceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, role) in Face::ALL.into_iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{role}->{}", self.physical_face(role))?;
        }
        Ok(())
    }
}
