//! High score persistence
//!
//! The record is a single decimal integer in a text file. Loading never fails
//! from the caller's point of view: a missing, unreadable or malformed file
//! reads as 0. Saving reports errors so the host can log them.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Default score file, relative to the working directory
pub const DEFAULT_HIGHSCORE_PATH: &str = "highscore.txt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold a score: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
}

/// Where the high score lives
pub trait ScoreStore {
    /// Stored record, or 0 when there is none
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Text file holding the record as one integer
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, keeping the failure reason
    pub fn try_load(&self) -> Result<u32, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        raw.trim().parse().map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_PATH)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score file yet");
                0
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, format!("{score}\n")).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}

/// In-memory store for tests and runs that should not touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    score: u32,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score, saves: 0 }
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}
