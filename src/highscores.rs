//! High score leaderboard
//!
//! Entries are kept in submission order, the order they are stored in.
//! Display order is by descending score, with ties keeping stored order.
//! Nothing is ever deduplicated or trimmed.

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    /// Validate and build an entry. The name is trimmed and must not be empty.
    pub fn new(name: &str, score: u64) -> Result<Self, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// Leaderboard in stored order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }

    /// Append in stored order
    pub fn push(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
    }

    /// Entries sorted for display (stable: ties keep stored order)
    pub fn ranked(&self) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Rank (1-indexed) a new score would get if submitted now.
    /// A new entry lands after existing entries with the same score.
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries.iter().filter(|e| e.score >= score).count() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score).unwrap()
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(LeaderboardEntry::new("", 10), Err(LeaderboardError::EmptyName));
        assert_eq!(LeaderboardEntry::new("   \t", 10), Err(LeaderboardError::EmptyName));
        assert_eq!(entry("  ada ", 10).name, "ada");
    }

    #[test]
    fn test_ranked_descending_with_stable_ties() {
        let board = Leaderboard::from_entries(vec![
            entry("a", 100),
            entry("b", 300),
            entry("c", 100),
            entry("d", 200),
        ]);
        let names: Vec<&str> = board.ranked().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "d", "a", "c"]);
        // Stored order untouched
        assert_eq!(board.entries[0].name, "a");
    }

    #[test]
    fn test_duplicates_kept() {
        let mut board = Leaderboard::new();
        board.push(entry("ada", 50));
        board.push(entry("ada", 50));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_potential_rank() {
        let board = Leaderboard::from_entries(vec![entry("a", 100), entry("b", 300)]);
        assert_eq!(board.potential_rank(500), 1);
        assert_eq!(board.potential_rank(300), 2);
        assert_eq!(board.potential_rank(0), 3);
        assert_eq!(Leaderboard::new().potential_rank(0), 1);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let board = Leaderboard::from_entries(vec![entry("a", 1)]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[{"name":"a","score":1}]"#);
        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
