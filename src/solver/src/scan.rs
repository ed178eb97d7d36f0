use std::path::Path;

use cube_core::{CubeState, Face};
use internment::ArcIntern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ColorScheme;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Facelet {index} of face {face} has unknown colour `{color}`")]
    UnknownColor {
        face: Face,
        index: usize,
        color: String,
    },
    #[error("Failed to read the scan: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse the scan: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Sticker colours as reported by the camera, nine per face in row-major
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScanRepr", into = "ScanRepr")]
pub struct Scan([[ArcIntern<str>; 9]; 6]);

impl Scan {
    /// Colours per face in `Face::ALL` order
    #[must_use]
    pub fn new(faces: [[ArcIntern<str>; 9]; 6]) -> Scan {
        Scan(faces)
    }

    pub fn load(path: &Path) -> Result<Scan, ScanError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    #[must_use]
    pub fn colors(&self, face: Face) -> &[ArcIntern<str>; 9] {
        &self.0[face as usize]
    }

    /// Labels every facelet with the face whose centre carries its colour in
    /// `scheme`. The result is not validated.
    pub fn to_state(&self, scheme: &ColorScheme) -> Result<CubeState, ScanError> {
        let mut faces = [[Face::U; 9]; 6];
        for face in Face::ALL {
            for (index, color) in self.colors(face).iter().enumerate() {
                faces[face as usize][index] =
                    scheme
                        .face_for(color)
                        .ok_or_else(|| ScanError::UnknownColor {
                            face,
                            index,
                            color: color.to_string(),
                        })?;
            }
        }
        Ok(CubeState::from_faces(faces))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[allow(non_snake_case)]
struct ScanRepr {
    U: [String; 9],
    R: [String; 9],
    F: [String; 9],
    D: [String; 9],
    L: [String; 9],
    B: [String; 9],
}

impl From<ScanRepr> for Scan {
    fn from(value: ScanRepr) -> Self {
        Scan(Face::ALL.map(|face| {
            let colors = match face {
                Face::U => &value.U,
                Face::R => &value.R,
                Face::F => &value.F,
                Face::D => &value.D,
                Face::L => &value.L,
                Face::B => &value.B,
            };
            colors.each_ref().map(|color| ArcIntern::from(color.as_str()))
        }))
    }
}

impl From<Scan> for ScanRepr {
    fn from(value: Scan) -> Self {
        let colors = |face: Face| value.colors(face).clone().map(|color| color.to_string());
        ScanRepr {
            U: colors(Face::U),
            R: colors(Face::R),
            F: colors(Face::F),
            D: colors(Face::D),
            L: colors(Face::L),
            B: colors(Face::B),
        }
    }
}
