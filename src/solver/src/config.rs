use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use cube_core::Face;
use internment::ArcIntern;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Global solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub oracle: OracleConfig,
    pub colors: ColorScheme,
}

impl SolverConfig {
    /// Reads a TOML configuration file, falling back to the defaults if it
    /// does not exist.
    pub fn load(path: &Path) -> Result<SolverConfig, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(target: "config", "{} not found; using the default configuration", path.display());
                return Ok(SolverConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })
    }
}

/// How to run the two-phase solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// The solver executable
    pub program: PathBuf,
    /// Longest solution the solver may return
    pub max_length: u32,
    /// Search threads; defaults to the available parallelism
    pub threads: Option<usize>,
    /// Where the solver keeps its tables; defaults to a cache directory
    pub table_dir: Option<PathBuf>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            program: PathBuf::from("twophase"),
            max_length: 30,
            threads: None,
            table_dir: None,
        }
    }
}

/// The sticker colour of each face's centre in the home orientation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSchemeRepr", into = "ColorSchemeRepr")]
pub struct ColorScheme([ArcIntern<str>; 6]);

impl ColorScheme {
    pub fn new(colors: [ArcIntern<str>; 6]) -> Result<ColorScheme, String> {
        if let Some(color) = colors
            .iter()
            .map(|color| color.to_ascii_lowercase())
            .duplicates()
            .next()
        {
            return Err(format!("The colour {color} is used for more than one face"));
        }
        Ok(ColorScheme(colors))
    }

    #[must_use]
    pub fn color_of(&self, face: Face) -> &ArcIntern<str> {
        &self.0[face as usize]
    }

    /// The face label for a sticker colour, ignoring case
    #[must_use]
    pub fn face_for(&self, color: &str) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| self.color_of(*face).eq_ignore_ascii_case(color))
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme(Face::ALL.map(|face| {
            ArcIntern::from(match face {
                Face::U => "White",
                Face::R => "Red",
                Face::F => "Green",
                Face::D => "Yellow",
                Face::L => "Orange",
                Face::B => "Blue",
            })
        }))
    }
}

impl Debug for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ColorSchemeRepr::from(self.clone()).fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[allow(non_snake_case)]
struct ColorSchemeRepr {
    U: String,
    R: String,
    F: String,
    D: String,
    L: String,
    B: String,
}

impl TryFrom<ColorSchemeRepr> for ColorScheme {
    type Error = String;

    fn try_from(value: ColorSchemeRepr) -> Result<Self, Self::Error> {
        ColorScheme::new(Face::ALL.map(|face| {
            ArcIntern::from(match face {
                Face::U => value.U.as_str(),
                Face::R => value.R.as_str(),
                Face::F => value.F.as_str(),
                Face::D => value.D.as_str(),
                Face::L => value.L.as_str(),
                Face::B => value.B.as_str(),
            })
        }))
    }
}

impl From<ColorScheme> for ColorSchemeRepr {
    fn from(value: ColorScheme) -> Self {
        let color = |face: Face| value.color_of(face).to_string();
        ColorSchemeRepr {
            U: color(Face::U),
            R: color(Face::R),
            F: color(Face::F),
            D: color(Face::D),
            L: color(Face::L),
            B: color(Face::B),
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = Face::CANONICAL_ORDER
            .into_iter()
            .map(|face| format!("{face}={}", &**self.color_of(face)))
            .join(" ");
        write!(f, "{pairs}")
    }
}
