//! Scoring module - line clear points, drop points and level progression
//!
//! | Lines | Points |
//! |-------|--------|
//! | 1 | 200 x level |
//! | 2 | 500 x level |
//! | 3 | 700 x level |
//! | 4 | 1000 x level |
//!
//! Soft drop adds 1 point per row fallen, hard drop 2 per row skipped.
//!
//! Levels are earned with weighted lines (a double counts twice, a tetris four times). The
//! next level is reached once the weighted total hits `8 * (level + 1)`.

use crate::types::{HARD_DROP_POINTS, LEVEL_GOAL, LINE_SCORES, MUSIC_SAMPLE_RATES, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows at `level`
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Points for a piece moved down `rows` rows by the player
pub fn drop_score(rows: u32, hard_drop: bool) -> u32 {
    let per_row = if hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    rows.saturating_mul(per_row)
}

/// Weighted lines needed to leave `level`
pub fn level_goal(level: u32) -> u32 {
    LEVEL_GOAL.saturating_mul(level.saturating_add(1))
}

/// Music playback rate for the highest level in play
pub fn music_sample_rate(level: u32) -> u32 {
    let idx = (level as usize).min(MUSIC_SAMPLE_RATES.len() - 1);
    MUSIC_SAMPLE_RATES[idx]
}

/// Count of clears by size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineTally {
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetrises: u32,
}

impl LineTally {
    pub fn record(&mut self, lines: usize) {
        match lines {
            1 => self.singles += 1,
            2 => self.doubles += 1,
            3 => self.triples += 1,
            4 => self.tetrises += 1,
            _ => {}
        }
    }

    /// `singles + 2*doubles + 3*triples + 4*tetrises`
    pub fn weighted(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.tetrises
    }
}

/// Result of scoring one clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearResult {
    pub points: u32,
    pub leveled_up: bool,
}

/// Score, level and line tally of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    level: u32,
    tally: LineTally,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Score a clear of `lines` rows
    ///
    /// Points use the level in force before the clear; the tally is updated and then the
    /// level goes up by one if the weighted total reached the goal.
    pub fn apply_clear(&mut self, lines: usize) -> ClearResult {
        let points = line_clear_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.tally.record(lines);

        let leveled_up = lines > 0 && self.tally.weighted() >= level_goal(self.level);
        if leveled_up {
            self.level += 1;
        }
        ClearResult { points, leveled_up }
    }

    pub fn add_drop(&mut self, rows: u32, hard_drop: bool) {
        self.score = self.score.saturating_add(drop_score(rows, hard_drop));
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tally(&self) -> &LineTally {
        &self.tally
    }

    /// Total rows cleared
    pub fn lines(&self) -> u32 {
        self.tally.weighted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_score(0, 3), 0);
        assert_eq!(line_clear_score(1, 3), 600);
        assert_eq!(line_clear_score(2, 3), 1500);
        assert_eq!(line_clear_score(3, 3), 2100);
        assert_eq!(line_clear_score(4, 3), 3000);
        assert_eq!(line_clear_score(5, 3), 0);
    }

    #[test]
    fn test_level_zero_scores_nothing() {
        let mut board = ScoreBoard::new();
        let result = board.apply_clear(4);
        assert_eq!(result.points, 0);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_drop_points() {
        assert_eq!(drop_score(5, false), 5);
        assert_eq!(drop_score(5, true), 10);
    }

    #[test]
    fn test_two_tetrises_reach_level_one() {
        let mut board = ScoreBoard::new();
        assert!(!board.apply_clear(4).leveled_up);
        assert!(board.apply_clear(4).leveled_up);
        assert_eq!(board.level(), 1);

        // scored at the level in force before the clear
        assert_eq!(board.apply_clear(1).points, 200);
    }

    #[test]
    fn test_level_goal_grows() {
        assert_eq!(level_goal(0), 8);
        assert_eq!(level_goal(1), 16);
        assert_eq!(level_goal(4), 40);
    }

    #[test]
    fn test_music_rate_clamps() {
        assert_eq!(music_sample_rate(0), 22050);
        assert_eq!(music_sample_rate(9), 34206);
        assert_eq!(music_sample_rate(40), 34206);
    }
}
