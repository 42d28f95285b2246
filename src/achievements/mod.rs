//! Achievement evaluation
//!
//! Achievements are pure predicates over a finished game. `Streak7` needs
//! play history across days, which a single game cannot show, so it never
//! unlocks here.

pub mod drops;

use serde::{Deserialize, Serialize};

use crate::core::types::Difficulty;
use crate::game::session::SessionSummary;

pub use drops::{nft_drop_chance, should_drop_nft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstVictory,
    PerfectMemory,
    SpeedDemon,
    #[serde(rename = "streak_7")]
    Streak7,
    OnechainExpert,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 5] = [
        AchievementKind::FirstVictory,
        AchievementKind::PerfectMemory,
        AchievementKind::SpeedDemon,
        AchievementKind::Streak7,
        AchievementKind::OnechainExpert,
    ];

    /// Identifier used on the wire and in proof messages
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementKind::FirstVictory => "first_victory",
            AchievementKind::PerfectMemory => "perfect_memory",
            AchievementKind::SpeedDemon => "speed_demon",
            AchievementKind::Streak7 => "streak_7",
            AchievementKind::OnechainExpert => "onechain_expert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn info(self) -> &'static Achievement {
        &ACHIEVEMENTS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Display-only bonus; never added to a game score
    pub fn bonus_points(self) -> u64 {
        match self {
            Rarity::Common => 100,
            Rarity::Rare => 500,
            Rarity::Epic => 1000,
            Rarity::Legendary => 2500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub name: &'static str,
    pub rarity: Rarity,
    pub description: &'static str,
    #[serde(skip)]
    pub criteria: &'static str,
}

// Indexed by `AchievementKind as usize`
static ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        kind: AchievementKind::FirstVictory,
        name: "First Victory",
        rarity: Rarity::Common,
        description: "Complete your first game and begin your OneChain journey",
        criteria: "Complete any game",
    },
    Achievement {
        kind: AchievementKind::PerfectMemory,
        name: "Perfect Memory Badge",
        rarity: Rarity::Rare,
        description: "Zero mistakes, pure skill - achieved by only 8% of players",
        criteria: "Complete a game with 0 mistakes",
    },
    Achievement {
        kind: AchievementKind::SpeedDemon,
        name: "Speed Demon Medal",
        rarity: Rarity::Rare,
        description: "Lightning-fast reflexes and sharp memory combined",
        criteria: "Complete Easy under 60s, Medium under 90s, or Hard under 120s",
    },
    Achievement {
        kind: AchievementKind::Streak7,
        name: "7-Day Streak Trophy",
        rarity: Rarity::Epic,
        description: "Dedication and consistency - most people quit after day 1",
        criteria: "Play games on 7 consecutive days",
    },
    Achievement {
        kind: AchievementKind::OnechainExpert,
        name: "OneChain Expert Certificate",
        rarity: Rarity::Legendary,
        description: "Mastered the entire OneChain ecosystem - join the elite",
        criteria: "Complete Hard mode with a perfect game",
    },
];

pub fn all() -> &'static [Achievement] {
    &ACHIEVEMENTS
}

/// Game outcome as submitted for achievement checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub score: u64,
    /// Seconds
    pub time_elapsed: u32,
    pub mistakes: u32,
    pub matched_pairs: u32,
    pub perfect_game: bool,
}

impl From<&SessionSummary> for AchievementInput {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            wallet_address: None,
            difficulty: summary.difficulty,
            score: summary.score,
            time_elapsed: summary.time_taken,
            mistakes: summary.mistakes,
            matched_pairs: summary.matched_pairs,
            perfect_game: summary.is_perfect,
        }
    }
}

/// Time limit in seconds for `SpeedDemon`
pub fn speed_limit_secs(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 60,
        Difficulty::Medium => 90,
        Difficulty::Hard => 120,
    }
}

/// Check a single achievement against a game outcome
pub fn validate(kind: AchievementKind, input: &AchievementInput) -> bool {
    match kind {
        AchievementKind::FirstVictory => input.matched_pairs > 0,
        AchievementKind::PerfectMemory => input.mistakes == 0 && input.perfect_game,
        AchievementKind::SpeedDemon => {
            input.time_elapsed <= speed_limit_secs(input.difficulty) && input.perfect_game
        }
        AchievementKind::Streak7 => false,
        AchievementKind::OnechainExpert => {
            input.difficulty == Difficulty::Hard && input.perfect_game && input.mistakes == 0
        }
    }
}

/// All achievements a single game unlocks, in catalog order
pub fn evaluate(input: &AchievementInput) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.kind != AchievementKind::Streak7)
        .filter(|a| validate(a.kind, input))
        .collect()
}

/// Total rarity bonus for a set of achievements
pub fn achievement_bonus<'a>(achievements: impl IntoIterator<Item = &'a Achievement>) -> u64 {
    achievements
        .into_iter()
        .map(|a| a.rarity.bonus_points())
        .sum()
}
