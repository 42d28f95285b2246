//! Async client for a remote signing service
//!
//! Used by game front ends that hold no key themselves. Every call is a
//! single request: failures surface to the caller and are never retried,
//! so a result is never submitted unsigned.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementInput;
use crate::core::error::{MatchError, Result};
use crate::core::types::Difficulty;

pub struct ProofClient {
    client: Client,
    base_url: String,
}

impl ProofClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `SIGNER_URL` (defaults to a local service)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SIGNER_URL").unwrap_or_else(|_| "http://localhost:3001".into());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Signature for `submit_game_result`
    pub async fn sign_game_result(
        &self,
        player_address: &str,
        score: u64,
        difficulty: Difficulty,
        won: bool,
    ) -> Result<String> {
        let request = SignResultRequest {
            player_address,
            score,
            difficulty: difficulty.code(),
            won,
        };
        let response: SignatureResponse = self.post("/api/game/sign-result", &request).await?;
        Ok(response.signature)
    }

    /// Signature for a leaderboard `submit_score`
    pub async fn sign_leaderboard_score(
        &self,
        player_address: &str,
        score: u64,
        difficulty: Difficulty,
    ) -> Result<String> {
        let request = SignScoreRequest {
            player_address,
            score,
            difficulty: difficulty.code(),
        };
        let response: SignatureResponse =
            self.post("/api/leaderboard/sign-score", &request).await?;
        Ok(response.signature)
    }

    /// Achievement types the service reports as unlocked
    pub async fn check_achievements(&self, game_result: &AchievementInput) -> Result<Vec<String>> {
        let request = CheckRequest { game_result };
        let response: CheckResponse = self.post("/api/achievements/check", &request).await?;
        Ok(response.achievements.into_iter().map(|a| a.kind).collect())
    }

    async fn post<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| MatchError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Signer request {} failed with {}", path, status);
            return Err(MatchError::Remote(format!("{}: {}", status, error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| MatchError::Remote(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignResultRequest<'a> {
    player_address: &'a str,
    score: u64,
    difficulty: u8,
    won: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignScoreRequest<'a> {
    player_address: &'a str,
    score: u64,
    difficulty: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    game_result: &'a AchievementInput,
}

#[derive(Deserialize)]
struct SignatureResponse {
    signature: String,
}

#[derive(Deserialize)]
struct CheckResponse {
    achievements: Vec<CheckedAchievement>,
}

#[derive(Deserialize)]
struct CheckedAchievement {
    #[serde(rename = "type")]
    kind: String,
}
