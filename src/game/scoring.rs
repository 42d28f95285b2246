//! Scoring - pure functions of a session outcome
//!
//! The total is ADDITIVE: difficulty points, time bonus, streak bonus and
//! perfect bonus, minus a flat penalty per mistake, floored at zero.

use serde::{Deserialize, Serialize};

use crate::core::types::Difficulty;
use crate::game::constants::{
    difficulty_multiplier, BASE_POINTS, MISTAKE_PENALTY, PERFECT_GAME_BONUS, STREAK_BONUS_2,
    STREAK_BONUS_3, STREAK_BONUS_4, TIME_BONUS_PER_SECOND,
};

/// Inputs to the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    pub matched_pairs: u32,
    pub difficulty: Difficulty,
    pub time_remaining: u32,
    pub best_streak: u32,
    pub mistakes: u32,
    pub is_perfect: bool,
}

/// Score components, before the zero floor is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub difficulty_score: u64,
    pub time_bonus: u64,
    pub streak_bonus: u64,
    pub mistake_penalty: u64,
    pub perfect_bonus: u64,
}

impl ScoreBreakdown {
    pub fn compute(input: &ScoreInput) -> Self {
        let base = input.matched_pairs as u64 * BASE_POINTS;
        let multiplier = difficulty_multiplier(input.difficulty);
        Self {
            difficulty_score: (base as f64 * multiplier).floor() as u64,
            time_bonus: input.time_remaining as u64 * TIME_BONUS_PER_SECOND,
            streak_bonus: streak_bonus(input.best_streak),
            mistake_penalty: input.mistakes as u64 * MISTAKE_PENALTY,
            perfect_bonus: if input.is_perfect { PERFECT_GAME_BONUS } else { 0 },
        }
    }

    /// Sum of the components, never below zero
    pub fn total(&self) -> u64 {
        let gains =
            self.difficulty_score + self.time_bonus + self.streak_bonus + self.perfect_bonus;
        gains.saturating_sub(self.mistake_penalty)
    }
}

/// Bonus for the best streak reached; only the highest tier counts
pub fn streak_bonus(best_streak: u32) -> u64 {
    match best_streak {
        s if s >= 4 => STREAK_BONUS_4,
        3 => STREAK_BONUS_3,
        2 => STREAK_BONUS_2,
        _ => 0,
    }
}

/// Final score for a finished session
pub fn calculate_score(
    matched_pairs: u32,
    difficulty: Difficulty,
    time_remaining: u32,
    best_streak: u32,
    mistakes: u32,
    is_perfect: bool,
) -> u64 {
    score(&ScoreInput {
        matched_pairs,
        difficulty,
        time_remaining,
        best_streak,
        mistakes,
        is_perfect,
    })
}

pub fn score(input: &ScoreInput) -> u64 {
    ScoreBreakdown::compute(input).total()
}

/// Points credited immediately for a single match
pub fn match_points(difficulty: Difficulty) -> u64 {
    (BASE_POINTS as f64 * difficulty_multiplier(difficulty)).floor() as u64
}
