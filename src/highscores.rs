//! Session leaderboard
//!
//! Tracks the top 10 runs since the page (or process) started. Nothing is
//! persisted.

use crate::controller::RunSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Ticks the run lasted
    pub ticks: u64,
    /// Speed reached when the run ended
    pub top_speed: f32,
}

impl From<&RunSummary> for HighScoreEntry {
    fn from(summary: &RunSummary) -> Self {
        Self {
            score: summary.final_score,
            ticks: summary.ticks,
            top_speed: summary.top_speed,
        }
    }
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default)]
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

    /// Index a run with this score would take, if it makes the board.
    ///
    /// Ties go after the runs already recorded. A zero score never places.
    fn slot(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Record a finished run.
    /// Returns the rank achieved (1-indexed) or None if it didn't place
    pub fn record(&mut self, summary: &RunSummary) -> Option<usize> {
        let slot = self.slot(summary.final_score)?;
        self.entries.insert(slot, HighScoreEntry::from(summary));
        self.entries.truncate(MAX_HIGH_SCORES);

        log::debug!("Run with score {} ranked #{}", summary.final_score, slot + 1);
        Some(slot + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
