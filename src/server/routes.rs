//! Route handlers

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::achievements::{self, AchievementKind};
use crate::core::error::MatchError;
use crate::core::types::PlayerAddress;
use crate::proof::{now_millis, GameResultPayload, LeaderboardPayload};
use crate::server::error::ApiError;
use crate::server::requests::{
    parse_body, AuthVerifyBody, CheckAchievementsBody, NftProofBody, SignResultBody, SignScoreBody,
};
use crate::server::AppState;

/// Lifetime of an auth token in seconds
pub const AUTH_TOKEN_TTL_SECS: u64 = 86_400;

type ApiResult = Result<Json<Value>, ApiError>;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "publicKey": state.signer.public_key_hex().ok(),
    }))
}

/// Issues a signed auth token for a wallet
///
/// The wallet's own signature is required but not checked here.
// TODO: verify `signature` over `message` against the wallet's scheme once
// wallets other than Ed25519 need supporting.
pub async fn auth_verify(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let request = parse_body::<AuthVerifyBody>(&body)?.validate()?;

    let proof = state
        .signer
        .auth_proof(&request.wallet_address, now_millis())
        .map_err(|e| ApiError::from_match("Authentication failed", e))?;

    Ok(Json(json!({
        "success": true,
        "authToken": proof.signature,
        "message": "Authentication successful",
        "expiresIn": AUTH_TOKEN_TTL_SECS,
    })))
}

pub async fn nft_proof(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let request = parse_body::<NftProofBody>(&body)?.validate()?;

    let eligible = AchievementKind::parse(&request.achievement_type)
        .filter(|&kind| achievements::validate(kind, &request.game_result));
    let Some(kind) = eligible else {
        tracing::info!(
            "Rejected {} proof for {}",
            request.achievement_type,
            request.wallet_address
        );
        return Err(ApiError::from_match(
            "Failed to generate NFT proof",
            MatchError::Ineligible(request.achievement_type),
        ));
    };

    let proof = state
        .signer
        .nft_proof(&request.wallet_address, kind, now_millis())
        .map_err(|e| ApiError::from_match("Failed to generate NFT proof", e))?;

    Ok(Json(json!({
        "success": true,
        "proof": proof,
        "achievementType": kind,
    })))
}

pub async fn sign_game_result(State(state): State<AppState>, body: Bytes) -> ApiResult {
    const CONTEXT: &str = "Failed to sign game result";
    let request = parse_body::<SignResultBody>(&body)?.validate()?;

    let payload = GameResultPayload {
        player: PlayerAddress::parse(&request.player_address)
            .map_err(|e| ApiError::from_match(CONTEXT, e))?,
        score: request.score,
        difficulty: request.difficulty,
        won: request.won,
    };
    let signature = state
        .signer
        .sign_game_result(&payload)
        .map_err(|e| ApiError::from_match(CONTEXT, e))?;

    Ok(Json(json!({ "success": true, "signature": signature })))
}

pub async fn sign_leaderboard_score(State(state): State<AppState>, body: Bytes) -> ApiResult {
    const CONTEXT: &str = "Failed to sign score";
    let request = parse_body::<SignScoreBody>(&body)?.validate()?;

    let payload = LeaderboardPayload {
        player: PlayerAddress::parse(&request.player_address)
            .map_err(|e| ApiError::from_match(CONTEXT, e))?,
        score: request.score,
        difficulty: request.difficulty,
    };
    let signature = state
        .signer
        .sign_leaderboard_score(&payload)
        .map_err(|e| ApiError::from_match(CONTEXT, e))?;

    Ok(Json(json!({ "success": true, "signature": signature })))
}

pub async fn check_achievements(body: Bytes) -> ApiResult {
    let game_result = parse_body::<CheckAchievementsBody>(&body)?.validate()?;
    let unlocked = achievements::evaluate(&game_result);

    Ok(Json(json!({
        "success": true,
        "achievements": unlocked,
        "count": unlocked.len(),
    })))
}

pub async fn public_key(State(state): State<AppState>) -> ApiResult {
    let bytes = state
        .signer
        .public_key_bytes()
        .map_err(|e| ApiError::from_match("Failed to retrieve public key", e))?;

    Ok(Json(json!({
        "publicKeyHex": hex::encode(bytes),
        "publicKeyBytes": bytes.to_vec(),
        "moveFormat": crate::proof::move_vector_literal(&bytes),
    })))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
