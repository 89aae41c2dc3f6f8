//! Scoring module - points, levels and drop speed
//!
//! Classic table scoring: a clear of N rows in one merge is worth
//! `LINE_SCORES[N] * (level + 1)`, and the table grows faster than linearly
//! so simultaneous clears beat the same rows cleared one merge at a time.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, LINE_SCORES, ROWS_PER_LEVEL, SOFT_DROP_INTERVAL_MS,
    STARTING_LEVEL,
};

/// Calculate line clear score
/// rows: number of rows cleared by one merge (anything above 4 scores as 4)
/// level: level in effect when the merge happened (1-based)
pub fn line_score(rows: u32, level: u32) -> u32 {
    let idx = (rows as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level.saturating_add(1))
}

/// Level management
/// Level starts at 1 and increases every 10 rows cleared
pub fn level_for_rows(total_rows: u32) -> u32 {
    STARTING_LEVEL + total_rows / ROWS_PER_LEVEL
}

/// Get drop interval for a level (in milliseconds)
/// Inversely proportional to the level, never below the floor
pub fn drop_interval_ms(level: u32) -> u32 {
    (BASE_DROP_MS / level.max(STARTING_LEVEL)).saturating_add(DROP_INTERVAL_FLOOR_MS)
}

/// Interval to report for the current level and soft-drop input
pub fn effective_interval_ms(level: u32, soft_drop: bool) -> u32 {
    if soft_drop {
        SOFT_DROP_INTERVAL_MS
    } else {
        drop_interval_ms(level)
    }
}

/// Score, rows and level of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameProgress {
    pub score: u32,
    pub rows_cleared: u32,
    pub level: u32,
}

impl GameProgress {
    pub fn new() -> Self {
        Self {
            score: 0,
            rows_cleared: 0,
            level: STARTING_LEVEL,
        }
    }

    /// Account for one merge that cleared `rows` rows.
    ///
    /// Scores at the level in effect before the clear, then recomputes the
    /// level. Returns the points awarded.
    pub fn record_clear(&mut self, rows: u32) -> u32 {
        let points = line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.rows_cleared = self.rows_cleared.saturating_add(rows);
        self.level = level_for_rows(self.rows_cleared);
        points
    }
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}
