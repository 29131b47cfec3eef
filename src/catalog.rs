// src/catalog.rs
use crate::errors::{FukuwaraiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_PUZZLES: &str = include_str!("../data/puzzles.toml");

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = FukuwaraiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(FukuwaraiError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
struct Levels {
    easy: Vec<String>,
    normal: Vec<String>,
    hard: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Explanation {
    pub keyword: String,
    pub text: String,
}

/// Canonical snippets per difficulty plus the keyword explanation table.
/// Loaded once at startup and shared read-only.
#[derive(Deserialize, Debug, Clone)]
pub struct Catalog {
    levels: Levels,
    #[serde(default)]
    explanations: Vec<Explanation>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_PUZZLES)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(source)?;
        for level in Difficulty::ALL {
            if catalog.lines(level).is_empty() {
                return Err(FukuwaraiError::Config(format!(
                    "Puzzle catalog has no lines for '{}'",
                    level
                )));
            }
        }
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Uses `path` when given, otherwise the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading puzzle catalog from {}", path.display());
                Self::from_file(path)
            }
            None => Self::builtin(),
        }
    }

    /// The canonical, correctly ordered lines for `level`.
    pub fn lines(&self, level: Difficulty) -> &[String] {
        match level {
            Difficulty::Easy => &self.levels.easy,
            Difficulty::Normal => &self.levels.normal,
            Difficulty::Hard => &self.levels.hard,
        }
    }

    /// Explanations whose keyword occurs anywhere in `text`, in table order.
    ///
    /// Plain substring matching: `obj` also matches inside `object`.
    pub fn annotations(&self, text: &str) -> Vec<&str> {
        self.explanations
            .iter()
            .filter(|e| text.contains(e.keyword.as_str()))
            .map(|e| e.text.as_str())
            .collect()
    }

    pub fn explanations(&self) -> &[Explanation] {
        &self.explanations
    }
}
