use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::num::NonZeroU32;
use std::path::Path;
use thiserror::Error;

/// The best score achieved on each grid size.
///
/// Stored on disk as a JSON object mapping grid sizes to scores, e.g.
/// `{"10": 7, "16": 23}`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HighScores {
    best: BTreeMap<u16, NonZeroU32>,
}

impl HighScores {
    /// Read high scores from `path`.  A missing file counts as having no high
    /// scores.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or parsed.
    pub fn load(path: &Path) -> Result<HighScores, HighScoresError> {
        match fs_err::read_to_string(path) {
            Ok(src) => serde_json::from_str(&src).map_err(HighScoresError::Parse),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HighScores::default()),
            Err(e) => Err(HighScoresError::Read(e)),
        }
    }

    /// Write the high scores to `path`, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns `Err` if the directories or the file could not be written.
    pub fn save(&self, path: &Path) -> Result<(), HighScoresError> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(dir).map_err(HighScoresError::Mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(HighScoresError::Encode)?;
        src.push('\n');
        fs_err::write(path, src).map_err(HighScoresError::Write)
    }

    pub fn get(&self, grid_size: u16) -> Option<NonZeroU32> {
        self.best.get(&grid_size).copied()
    }

    /// Record a final score.  Returns `true` if it beats the previous best
    /// for the grid size; a score of zero never does.
    pub fn record(&mut self, grid_size: u16, score: u32) -> bool {
        let Some(score) = NonZeroU32::new(score) else {
            return false;
        };
        match self.best.get(&grid_size) {
            Some(&best) if best >= score => false,
            _ => {
                log::debug!("New best of {score} for grid size {grid_size}");
                self.best.insert(grid_size, score);
                true
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum HighScoresError {
    #[error("failed to read high scores file")]
    Read(#[source] io::Error),
    #[error("high scores file is malformed")]
    Parse(#[source] serde_json::Error),
    #[error("failed to create directory for high scores file")]
    Mkdir(#[source] io::Error),
    #[error("failed to encode high scores")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write high scores file")]
    Write(#[source] io::Error),
}
