//! High score and leaderboard persistence
//!
//! The game core talks to storage only through [`ScoreStore`]. Backends:
//! - [`MemoryStore`]: in-process, used by tests and as a fallback
//! - [`JsonFileStore`]: one JSON file with atomic tmp → rename writes (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)
//!
//! Callers treat every error as "no data": missing storage means a zero high
//! score and an empty leaderboard, never a failed run.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::PersistenceError;
use crate::highscores::{Leaderboard, LeaderboardEntry};

/// Storage for the best score and submitted leaderboard entries
pub trait ScoreStore {
    /// Best score recorded so far (0 when none)
    fn high_score(&self) -> Result<u64, PersistenceError>;

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistenceError>;

    /// All entries in stored order (may be empty)
    fn leaderboard(&self) -> Result<Leaderboard, PersistenceError>;

    /// Persist one entry immediately
    fn append_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> Result<(), PersistenceError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn high_score(&self) -> Result<u64, PersistenceError> {
        (**self).high_score()
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        (**self).set_high_score(score)
    }

    fn leaderboard(&self) -> Result<Leaderboard, PersistenceError> {
        (**self).leaderboard()
    }

    fn append_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> Result<(), PersistenceError> {
        (**self).append_leaderboard_entry(entry)
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u64,
    leaderboard: Leaderboard,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store
    pub fn with_data(high_score: u64, leaderboard: Leaderboard) -> Self {
        Self {
            high_score,
            leaderboard,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn high_score(&self) -> Result<u64, PersistenceError> {
        Ok(self.high_score)
    }

    fn set_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.high_score = score;
        Ok(())
    }

    fn leaderboard(&self) -> Result<Leaderboard, PersistenceError> {
        Ok(self.leaderboard.clone())
    }

    fn append_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> Result<(), PersistenceError> {
        self.leaderboard.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.high_score().unwrap(), 0);
        assert!(store.leaderboard().unwrap().is_empty());

        store.set_high_score(420).unwrap();
        let entry = LeaderboardEntry::new("ada", 420).unwrap();
        store.append_leaderboard_entry(&entry).unwrap();
        store.append_leaderboard_entry(&entry).unwrap();

        assert_eq!(store.high_score().unwrap(), 420);
        assert_eq!(store.leaderboard().unwrap().len(), 2);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::new());
        store.set_high_score(7).unwrap();
        assert_eq!(store.high_score().unwrap(), 7);
    }
}
