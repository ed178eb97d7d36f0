use std::{fmt::Display, str::FromStr};

use bitflags::bitflags;

/// A face of the cube. The discriminants double as the storage order of the
/// facelet array, so `Face::ALL[face as usize] == face` always holds.
///
/// A face letter is also used as a sticker label: the label of a facelet names
/// the face whose centre carries that colour when the cube is in its home
/// orientation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    F,
    R,
    B,
    L,
    U,
    D,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [F, R, B, L, U, D];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Face order of the 54 character encoding understood by two-phase solvers
    pub const CANONICAL_ORDER: [Self; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[must_use]
    pub const fn opposite(self) -> Face {
        match self {
            Face::F => Face::B,
            Face::B => Face::F,
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::F => 'F',
            Face::R => 'R',
            Face::B => 'B',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        Some(match letter.to_ascii_uppercase() {
            'F' => Face::F,
            'R' => Face::R,
            'B' => Face::B,
            'L' => Face::L,
            'U' => Face::U,
            'D' => Face::D,
            _ => return None,
        })
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Face::from_letter(c).ok_or(()),
            _ => Err(()),
        }
    }
}

/// One sticker position, addressed by face, row, and column.
///
/// Rows and columns follow the usual net: U is seen from above with B at its
/// top edge, D is seen from below with F at its top edge, and the four side
/// faces are seen from outside with U at their top edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Facelet {
    pub face: Face,
    pub row: u8,
    pub col: u8,
}

impl Facelet {
    #[must_use]
    pub const fn new(face: Face, row: u8, col: u8) -> Facelet {
        assert!(row < 3 && col < 3);
        Facelet { face, row, col }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        at(self.face, self.row, self.col)
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Facelet {
        assert!(index < 54);
        Facelet {
            face: Face::ALL[index / 9],
            row: ((index % 9) / 3) as u8,
            col: (index % 3) as u8,
        }
    }

    #[must_use]
    pub const fn is_center(self) -> bool {
        self.row == 1 && self.col == 1
    }
}

impl Display for Facelet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{},{}]", self.face, self.row, self.col)
    }
}

/// Flat index of a facelet in the 54 element storage array
#[must_use]
pub const fn at(face: Face, row: u8, col: u8) -> usize {
    face as usize * 9 + row as usize * 3 + col as usize
}

bitflags! {
    /// A set of faces, used for the faces that must never be turned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceSet: u8 {
        const F = 1 << Face::F as u8;
        const R = 1 << Face::R as u8;
        const B = 1 << Face::B as u8;
        const L = 1 << Face::L as u8;
        const U = 1 << Face::U as u8;
        const D = 1 << Face::D as u8;
    }
}

impl FaceSet {
    #[must_use]
    pub const fn of(face: Face) -> FaceSet {
        FaceSet::from_bits_retain(1 << face as u8)
    }

    #[must_use]
    pub const fn contains_face(self, face: Face) -> bool {
        self.contains(FaceSet::of(face))
    }

    pub fn insert_face(&mut self, face: Face) {
        self.insert(FaceSet::of(face));
    }

    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL
            .into_iter()
            .filter(move |face| self.contains_face(*face))
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<T: IntoIterator<Item = Face>>(iter: T) -> Self {
        let mut set = FaceSet::empty();
        for face in iter {
            set.insert_face(face);
        }
        set
    }
}

impl Display for FaceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, face) in self.faces().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{face}")?;
        }
        write!(f, "}}")
    }
}
