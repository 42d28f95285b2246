//! Request bodies
//!
//! Bodies are read as loosely-typed `*Body` structs with every field
//! optional, then checked into the typed requests the handlers use.
//! Empty strings count as missing.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::achievements::AchievementInput;
use crate::core::types::Difficulty;
use crate::server::error::ApiError;

pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthVerifyBody {
    pub wallet_address: Option<String>,
    pub signature: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthVerifyRequest {
    pub wallet_address: String,
    pub signature: String,
    pub message: String,
}

impl AuthVerifyBody {
    pub fn validate(self) -> Result<AuthVerifyRequest, ApiError> {
        match (present(self.wallet_address), present(self.signature), present(self.message)) {
            (Some(wallet_address), Some(signature), Some(message)) => Ok(AuthVerifyRequest {
                wallet_address,
                signature,
                message,
            }),
            _ => Err(ApiError::missing_fields("walletAddress, signature, message")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftProofBody {
    pub wallet_address: Option<String>,
    pub achievement_type: Option<String>,
    pub game_result: Option<AchievementInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftProofRequest {
    pub wallet_address: String,
    pub achievement_type: String,
    pub game_result: AchievementInput,
}

impl NftProofBody {
    pub fn validate(self) -> Result<NftProofRequest, ApiError> {
        match (
            present(self.wallet_address),
            present(self.achievement_type),
            self.game_result,
        ) {
            (Some(wallet_address), Some(achievement_type), Some(game_result)) => {
                Ok(NftProofRequest {
                    wallet_address,
                    achievement_type,
                    game_result,
                })
            }
            _ => Err(ApiError::missing_fields(
                "walletAddress, achievementType, gameResult",
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResultBody {
    pub player_address: Option<String>,
    pub score: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub won: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignResultRequest {
    pub player_address: String,
    pub score: u64,
    pub difficulty: Difficulty,
    pub won: bool,
}

impl SignResultBody {
    pub fn validate(self) -> Result<SignResultRequest, ApiError> {
        match (present(self.player_address), self.score, self.difficulty) {
            (Some(player_address), Some(score), Some(difficulty)) => Ok(SignResultRequest {
                player_address,
                score,
                difficulty,
                won: self.won.unwrap_or(false),
            }),
            _ => Err(ApiError::missing_fields("playerAddress, score, difficulty")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignScoreBody {
    pub player_address: Option<String>,
    pub score: Option<u64>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignScoreRequest {
    pub player_address: String,
    pub score: u64,
    pub difficulty: Difficulty,
}

impl SignScoreBody {
    pub fn validate(self) -> Result<SignScoreRequest, ApiError> {
        match (present(self.player_address), self.score, self.difficulty) {
            (Some(player_address), Some(score), Some(difficulty)) => Ok(SignScoreRequest {
                player_address,
                score,
                difficulty,
            }),
            _ => Err(ApiError::missing_fields("playerAddress, score, difficulty")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAchievementsBody {
    pub game_result: Option<AchievementInput>,
}

impl CheckAchievementsBody {
    pub fn validate(self) -> Result<AchievementInput, ApiError> {
        self.game_result
            .ok_or_else(|| ApiError::BadRequest("Missing gameResult in request body".into()))
    }
}
