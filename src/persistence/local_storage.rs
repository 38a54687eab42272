//! Browser LocalStorage backend (wasm32 only)

use super::ScoreStore;
use crate::error::PersistenceError;
use crate::highscores::{Leaderboard, LeaderboardEntry};

const HIGH_SCORE_KEY: &str = "asteroids-high-score";
const LEADERBOARD_KEY: &str = "asteroids-leaderboard";

/// Scores kept under two LocalStorage keys
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(context: &'static str) -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable { context })
    }

    fn get(key: &str, context: &'static str) -> Result<Option<String>, PersistenceError> {
        Self::storage(context)?
            .get_item(key)
            .map_err(|_| PersistenceError::Unavailable { context })
    }

    fn set(key: &str, value: &str, context: &'static str) -> Result<(), PersistenceError> {
        Self::storage(context)?
            .set_item(key, value)
            .map_err(|_| PersistenceError::Unavailable { context })
    }
}

impl ScoreStore for LocalStorageStore {
    fn high_score(&self) -> Result<u64, PersistenceError> {
        match Self::get(HIGH_SCORE_KEY, "read high score")? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| PersistenceError::InvalidHighScore { raw }),
            None => Ok(0),
        }
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        Self::set(HIGH_SCORE_KEY, &score.to_string(), "write high score")?;
        log::info!("High score {} saved", score);
        Ok(())
    }

    fn leaderboard(&self) -> Result<Leaderboard, PersistenceError> {
        match Self::get(LEADERBOARD_KEY, "read leaderboard")? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Leaderboard::new()),
        }
    }

    fn append_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> Result<(), PersistenceError> {
        let mut board = match self.leaderboard() {
            Err(PersistenceError::Json(e)) => {
                log::warn!("Stored leaderboard is malformed ({}); starting a new one", e);
                Leaderboard::new()
            }
            other => other?,
        };
        board.push(entry.clone());
        Self::set(LEADERBOARD_KEY, &serde_json::to_string(&board)?, "write leaderboard")?;
        log::info!("Leaderboard saved ({} entries)", board.len());
        Ok(())
    }
}
