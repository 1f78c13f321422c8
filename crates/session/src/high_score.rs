//! Persisted best score, one integer under a fixed key.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub const HIGH_SCORE_KEY: &str = "block-blast-highscore";

pub trait HighScoreStore: Send {
    /// Stored best, 0 when nothing has been saved yet.
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Keeps the score for the life of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryHighScore {
    best: u64,
}

impl MemoryHighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

/// JSON object of key to score on disk. Other keys in the file are kept.
#[derive(Clone, Debug)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self
            .read_map()?
            .get(HIGH_SCORE_KEY)
            .copied()
            .unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(HIGH_SCORE_KEY.to_string(), score);
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}
