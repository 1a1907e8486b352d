//! Scoring module - score and level bookkeeping
//!
//! - Clearing rows awards a fixed bonus keyed by how many rows cleared at once
//!   (1 → 100, 2 → 300, 3 → 500, 4 → 800, anything else → 0).
//! - A piece dropped with `Fall` awards 2 points per row fallen.
//! - Every single-row move down awards 1 point.
//!
//! Both counters only grow during a game and are reset when a new game starts.

use crate::types::{FALL_POINTS_PER_ROW, MOVE_DOWN_POINTS, ROWS_PER_LEVEL, ROW_CLEAR_SCORES};

/// Bonus for clearing `rows` rows with a single piece
pub fn row_clear_score(rows: u32) -> u32 {
    ROW_CLEAR_SCORES.get(rows as usize).copied().unwrap_or(0)
}

/// Points for a piece that fell `rows` rows
pub fn fall_score(rows: u32) -> u32 {
    rows.saturating_mul(FALL_POINTS_PER_ROW)
}

/// Level reached after clearing `total_rows` rows
pub fn level_for_rows(total_rows: u32) -> u32 {
    total_rows / ROWS_PER_LEVEL
}

/// Running score of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn rows_cleared(&mut self, count: u32) {
        self.add(row_clear_score(count));
    }

    pub fn piece_finished_falling(&mut self, rows: u32) {
        self.add(fall_score(rows));
    }

    pub fn piece_moved_down(&mut self) {
        self.add(MOVE_DOWN_POINTS);
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }
}

/// Rows cleared so far and the level they amount to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Level {
    rows: u32,
    number: u32,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Record cleared rows. Returns the new level number if it went up.
    pub fn rows_cleared(&mut self, count: u32) -> Option<u32> {
        self.rows = self.rows.saturating_add(count);
        let number = level_for_rows(self.rows);
        if number > self.number {
            self.number = number;
            Some(number)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
