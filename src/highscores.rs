//! Local high score leaderboard
//!
//! Keeps the top 10 finished sessions, stored as JSON.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Name recorded when the player leaves it blank
pub const ANONYMOUS: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    pub max_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score makes the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished session to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't make the board.
    pub fn add_score(
        &mut self,
        name: &str,
        score: u64,
        max_combo: u32,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let name = name.trim();
        let entry = HighScoreEntry {
            name: (if name.is_empty() { ANONYMOUS } else { name }).to_string(),
            score,
            max_combo,
            timestamp,
        };

        // Sorted descending by score; ties keep the earlier entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a leaderboard; accepts a bare entry list or the wrapped form
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading leaderboard {}", path.display()))?;
        let mut scores = match serde_json::from_str::<Vec<HighScoreEntry>>(&json) {
            Ok(entries) => Self { entries },
            Err(_) => serde_json::from_str::<HighScores>(&json)
                .with_context(|| format!("parsing leaderboard {}", path.display()))?,
        };
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Load a leaderboard, starting fresh if it is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::info!("No high scores loaded ({:#}), starting fresh", e);
            Self::new()
        })
    }

    /// Save as a bare entry list
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing leaderboard {}", path.display()))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
