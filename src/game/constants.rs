//! Game constants - grid layout and scoring policy
//!
//! Scoring values are fixed policy shared with the ledger-side contracts.
//! Changing any of them changes every attested score.

use crate::core::types::Difficulty;

/// Board layout and time limit for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub pairs: u32,
    pub timer_secs: u32,
}

pub const EASY_GRID: GridConfig = GridConfig {
    rows: 3,
    cols: 4,
    pairs: 6,
    timer_secs: 90,
};

pub const MEDIUM_GRID: GridConfig = GridConfig {
    rows: 4,
    cols: 4,
    pairs: 8,
    timer_secs: 120,
};

pub const HARD_GRID: GridConfig = GridConfig {
    rows: 4,
    cols: 6,
    pairs: 12,
    timer_secs: 180,
};

pub fn grid_config(difficulty: Difficulty) -> GridConfig {
    match difficulty {
        Difficulty::Easy => EASY_GRID,
        Difficulty::Medium => MEDIUM_GRID,
        Difficulty::Hard => HARD_GRID,
    }
}

pub fn pairs_for(difficulty: Difficulty) -> u32 {
    grid_config(difficulty).pairs
}

pub fn timer_for(difficulty: Difficulty) -> u32 {
    grid_config(difficulty).timer_secs
}

// Scoring
pub const BASE_POINTS: u64 = 100;
pub const TIME_BONUS_PER_SECOND: u64 = 10;
pub const MISTAKE_PENALTY: u64 = 20;
pub const PERFECT_GAME_BONUS: u64 = 1000;

// Streak bonuses, keyed by the minimum best streak
pub const STREAK_BONUS_2: u64 = 50;
pub const STREAK_BONUS_3: u64 = 100;
pub const STREAK_BONUS_4: u64 = 200;

pub fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 1.0,
        Difficulty::Medium => 1.5,
        Difficulty::Hard => 2.0,
    }
}

// Timing (milliseconds of session time)
pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
pub const MATCH_REVEAL_MS: u64 = 500;
pub const MISMATCH_REVEAL_MS: u64 = 1000;
