//! The physical pieces of the cube and the facelets each one carries.
//!
//! A cubie is addressed by the UI number of any of its facelets. Facelets are
//! numbered `1..=54` face by face in `Face::ALL` order, row-major within a
//! face, so F is 1 to 9, R is 10 to 18, and so on down to D at 46 to 54.

use std::{fmt::Display, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use thiserror::Error;

use crate::facelet::{FaceSet, Facelet};

/// Facelet numbers of every piece. Pieces are listed once, each by all of its
/// facelet numbers.
const PIECES: [&[u8]; 26] = [
    // Centers
    &[5],
    &[14],
    &[23],
    &[32],
    &[41],
    &[50],
    // Edges
    &[2, 44],
    &[4, 33],
    &[6, 13],
    &[8, 47],
    &[11, 42],
    &[15, 22],
    &[17, 51],
    &[20, 38],
    &[24, 31],
    &[26, 53],
    &[29, 40],
    &[35, 49],
    // Corners
    &[1, 30, 43],
    &[3, 10, 45],
    &[7, 36, 46],
    &[9, 16, 48],
    &[12, 19, 39],
    &[18, 25, 54],
    &[21, 28, 37],
    &[27, 34, 52],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("There is no facelet numbered {0}; facelets are numbered 1 to 54")]
pub struct UnknownCubie(pub u32);

/// A cubie, selected by one of its facelets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(u8);

impl CubieId {
    pub fn new(id: u32) -> Result<CubieId, UnknownCubie> {
        match u8::try_from(id) {
            Ok(v @ 1..=54) => Ok(CubieId(v)),
            _ => Err(UnknownCubie(id)),
        }
    }

    #[must_use]
    pub fn from_facelet(facelet: Facelet) -> CubieId {
        CubieId(facelet.index() as u8 + 1)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The facelet that was selected
    #[must_use]
    pub fn facelet(self) -> Facelet {
        Facelet::from_index(usize::from(self.0) - 1)
    }
}

impl Display for CubieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubieParseError {
    #[error("`{0}` is not a facelet number")]
    NotANumber(String),
    #[error(transparent)]
    Unknown(#[from] UnknownCubie),
}

impl FromStr for CubieId {
    type Err = CubieParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|_| CubieParseError::NotANumber(s.to_owned()))?;
        Ok(CubieId::new(id)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubieKind {
    Center,
    Edge,
    Corner,
}

impl Display for CubieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CubieKind::Center => write!(f, "center"),
            CubieKind::Edge => write!(f, "edge"),
            CubieKind::Corner => write!(f, "corner"),
        }
    }
}

/// Maps each facelet to the piece it belongs to
pub struct CubieIndex {
    pieces: Vec<Vec<Facelet>>,
    piece_of: [usize; 54],
}

pub static CUBIES: LazyLock<CubieIndex> = LazyLock::new(|| {
    let pieces = PIECES
        .iter()
        .map(|piece| {
            piece
                .iter()
                .map(|number| Facelet::from_index(usize::from(*number) - 1))
                .collect_vec()
        })
        .collect_vec();

    let mut piece_of = [usize::MAX; 54];
    for (i, piece) in pieces.iter().enumerate() {
        for facelet in piece {
            piece_of[facelet.index()] = i;
        }
    }
    debug_assert!(piece_of.iter().all(|i| *i != usize::MAX));

    CubieIndex { pieces, piece_of }
});

impl CubieIndex {
    /// Every facelet of the piece `id` selects, starting with the selected one
    #[must_use]
    pub fn facelets_for(&self, id: CubieId) -> Vec<Facelet> {
        let selected = id.facelet();
        let mut facelets = vec![selected];
        facelets.extend(
            self.pieces[self.piece_of[selected.index()]]
                .iter()
                .filter(|facelet| **facelet != selected),
        );
        facelets
    }

    #[must_use]
    pub fn kind(&self, id: CubieId) -> CubieKind {
        match self.pieces[self.piece_of[id.facelet().index()]].len() {
            1 => CubieKind::Center,
            2 => CubieKind::Edge,
            _ => CubieKind::Corner,
        }
    }

    /// Whether two ids select the same physical piece
    #[must_use]
    pub fn same_piece(&self, a: CubieId, b: CubieId) -> bool {
        self.piece_of[a.facelet().index()] == self.piece_of[b.facelet().index()]
    }

    /// All facelets of all the given pieces, in storage order and without
    /// duplicates
    #[must_use]
    pub fn fixed_facelets(&self, ids: &[CubieId]) -> Vec<Facelet> {
        ids.iter()
            .flat_map(|id| self.facelets_for(*id))
            .sorted()
            .dedup()
            .collect()
    }

    /// The faces that may not be turned while the given pieces stay fixed:
    /// every face carrying a facelet of one of them.
    #[must_use]
    pub fn restricted_faces(&self, ids: &[CubieId]) -> FaceSet {
        ids.iter()
            .flat_map(|id| self.facelets_for(*id))
            .map(|facelet| facelet.face)
            .collect()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &[Facelet]> {
        self.pieces.iter().map(Vec::as_slice)
    }
}
