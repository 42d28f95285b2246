//! Canonical proof messages
//!
//! The binary layouts match the ledger's canonical serialization of
//! `(address, u64, u8[, u8])`: a raw 32-byte address, the score as an 8-byte
//! little-endian integer, then single bytes. The contract rebuilds the same
//! bytes and checks the signature against them, so a single byte of drift
//! makes every proof invalid.

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementKind;
use crate::core::types::{Difficulty, PlayerAddress};

/// Application name in the auth message header
pub const AUTH_APP_NAME: &str = "OneMatch";

pub const GAME_RESULT_MESSAGE_LEN: usize = PlayerAddress::LEN + 8 + 1 + 1;
pub const LEADERBOARD_MESSAGE_LEN: usize = PlayerAddress::LEN + 8 + 1;

/// Result of one game, attested for `submit_game_result`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResultPayload {
    pub player: PlayerAddress,
    pub score: u64,
    pub difficulty: Difficulty,
    pub won: bool,
}

impl GameResultPayload {
    /// `address ++ score_le_u64 ++ difficulty ++ won`
    pub fn encode(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(GAME_RESULT_MESSAGE_LEN);
        message.extend_from_slice(self.player.as_bytes());
        message.extend_from_slice(&self.score.to_le_bytes());
        message.push(self.difficulty.code());
        message.push(u8::from(self.won));
        message
    }
}

/// Score attested for `submit_score` on a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardPayload {
    pub player: PlayerAddress,
    pub score: u64,
    pub difficulty: Difficulty,
}

impl LeaderboardPayload {
    /// `address ++ score_le_u64 ++ difficulty`
    pub fn encode(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(LEADERBOARD_MESSAGE_LEN);
        message.extend_from_slice(self.player.as_bytes());
        message.extend_from_slice(&self.score.to_le_bytes());
        message.push(self.difficulty.code());
        message
    }
}

/// Human-readable login challenge; signed as UTF-8, not packed
pub fn auth_message(wallet: &str, timestamp_ms: i64) -> String {
    format!(
        "{} Authentication\nWallet: {}\nTimestamp: {}",
        AUTH_APP_NAME, wallet, timestamp_ms
    )
}

/// Mint authorization for an achievement collectible
pub fn nft_message(wallet: &str, achievement: AchievementKind, timestamp_ms: i64) -> String {
    format!("{}:{}:{}", wallet, achievement.as_str(), timestamp_ms)
}

/// Signed auth challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProof {
    pub message: String,
    pub signature: String,
}

/// Signed mint authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftProof {
    pub message: String,
    pub signature: String,
    pub public_key: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_one() -> PlayerAddress {
        PlayerAddress::parse(&format!("0x{}01", "00".repeat(31))).unwrap()
    }

    #[test]
    fn test_game_result_layout() {
        let message = GameResultPayload {
            player: address_one(),
            score: 1234,
            difficulty: Difficulty::Medium,
            won: true,
        }
        .encode();

        assert_eq!(message.len(), 42);
        assert_eq!(message[31], 1);
        assert_eq!(&message[32..40], &[0xD2, 0x04, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&message[40..], &[2, 1]);
    }

    #[test]
    fn test_game_result_lost_flag() {
        let message = GameResultPayload {
            player: address_one(),
            score: 0,
            difficulty: Difficulty::Hard,
            won: false,
        }
        .encode();
        assert_eq!(&message[40..], &[3, 0]);
    }

    #[test]
    fn test_leaderboard_layout() {
        let message = LeaderboardPayload {
            player: address_one(),
            score: u64::MAX,
            difficulty: Difficulty::Easy,
        }
        .encode();

        assert_eq!(message.len(), LEADERBOARD_MESSAGE_LEN);
        assert!(message[32..40].iter().all(|&b| b == 0xFF));
        assert_eq!(message[40], 1);
    }

    #[test]
    fn test_auth_message_format() {
        assert_eq!(
            auth_message("0xabc", 1_700_000_000_000),
            "OneMatch Authentication\nWallet: 0xabc\nTimestamp: 1700000000000"
        );
    }

    #[test]
    fn test_nft_message_format() {
        assert_eq!(
            nft_message("0xabc", AchievementKind::SpeedDemon, 42),
            "0xabc:speed_demon:42"
        );
    }
}
