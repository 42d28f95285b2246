//! Collectible drop odds after a game

use rand::Rng;

use crate::core::types::Difficulty;

/// Probability that a finished game drops a collectible
pub fn nft_drop_chance(score: u64, difficulty: Difficulty) -> f64 {
    if difficulty == Difficulty::Hard && score > 2000 {
        0.05
    } else if score > 1500 {
        0.15
    } else if score > 1000 {
        0.30
    } else {
        0.0
    }
}

pub fn should_drop_nft<R: Rng + ?Sized>(score: u64, difficulty: Difficulty, rng: &mut R) -> bool {
    rng.gen::<f64>() < nft_drop_chance(score, difficulty)
}
