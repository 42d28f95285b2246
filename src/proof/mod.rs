//! Result attestation - canonical messages, the signing service, and a
//! client for signing services running elsewhere

pub mod client;
pub mod message;
pub mod signer;

pub use client::ProofClient;
pub use message::{
    auth_message, nft_message, AuthProof, GameResultPayload, LeaderboardPayload, NftProof,
    AUTH_APP_NAME, GAME_RESULT_MESSAGE_LEN, LEADERBOARD_MESSAGE_LEN,
};
pub use signer::{generate_keypair, move_vector_literal, SigningService};

/// Current Unix time in milliseconds, as stamped into proofs
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
