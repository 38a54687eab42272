//! JSON file backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ScoreStore;
use crate::error::PersistenceError;
use crate::highscores::{Leaderboard, LeaderboardEntry};

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    high_score: u64,
    #[serde(default)]
    leaderboard: Leaderboard,
}

/// Scores kept in a single JSON file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ScoreFile, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ScoreFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current contents for a read-modify-write. A file that no longer parses
    /// is moved aside to `*.json.bad` and replaced, so one bad write never
    /// blocks every later one.
    fn read_for_update(&self) -> Result<ScoreFile, PersistenceError> {
        match self.read() {
            Err(PersistenceError::Json(e)) => {
                let aside = self.path.with_extension("json.bad");
                log::warn!(
                    "{} is not a valid score file ({}); moving it to {}",
                    self.path.display(),
                    e,
                    aside.display()
                );
                if let Err(e) = fs::rename(&self.path, &aside) {
                    log::warn!("Could not move {} aside: {}", self.path.display(), e);
                }
                Ok(ScoreFile::default())
            }
            other => other,
        }
    }

    /// Write to a sibling tmp file, then rename over the real one
    fn write(&self, file: &ScoreFile) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn high_score(&self) -> Result<u64, PersistenceError> {
        Ok(self.read()?.high_score)
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        let mut file = self.read_for_update()?;
        file.high_score = score;
        self.write(&file)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }

    fn leaderboard(&self) -> Result<Leaderboard, PersistenceError> {
        Ok(self.read()?.leaderboard)
    }

    fn append_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> Result<(), PersistenceError> {
        let mut file = self.read_for_update()?;
        file.leaderboard.push(entry.clone());
        self.write(&file)?;
        log::info!("Leaderboard saved ({} entries)", file.leaderboard.len());
        Ok(())
    }
}
