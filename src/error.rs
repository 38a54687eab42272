//! Error types for the non-simulation edges of the game.
//!
//! The simulation itself has no failure paths. Everything here comes from
//! storage, settings files, or leaderboard submissions, and none of it is
//! ever fatal to a run.

use std::fmt;

/// A high score / leaderboard store could not be read or written.
#[derive(Debug)]
pub enum PersistenceError {
    /// Filesystem read/write failed.
    Io(std::io::Error),
    /// Stored data exists but is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// Stored high score is not an integer.
    InvalidHighScore { raw: String },
    /// No backing storage (e.g. LocalStorage disabled in the browser).
    Unavailable { context: &'static str },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score store I/O failed: {}", e),
            Self::Json(e) => write!(f, "score store holds malformed JSON: {}", e),
            Self::InvalidHighScore { raw } => {
                write!(f, "stored high score '{}' is not an integer", raw)
            }
            Self::Unavailable { context } => write!(f, "storage unavailable during '{}'", context),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// A leaderboard submission was rejected. No state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Name was empty after trimming whitespace.
    EmptyName,
    /// Scores can only be submitted once the run is over.
    RunNotOver,
    /// This run's score was already submitted.
    AlreadySubmitted,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Please enter a username!"),
            Self::RunNotOver => write!(f, "scores can only be submitted after game over"),
            Self::AlreadySubmitted => write!(f, "score for this run was already submitted"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Settings could not be loaded.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings file unreadable: {}", e),
            Self::Json(e) => write!(f, "settings file is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_keeps_source() {
        let err: PersistenceError = std::io::Error::other("disk gone").into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn test_empty_name_prompt() {
        assert_eq!(LeaderboardError::EmptyName.to_string(), "Please enter a username!");
    }
}
