//! Proof integration tests
//!
//! From a finished session to a signature the ledger can check.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use onematch::core::error::MatchError;
use onematch::core::types::{Difficulty, PlayerAddress};
use onematch::game::constants::MATCH_REVEAL_MS;
use onematch::game::GameSession;
use onematch::proof::{GameResultPayload, LeaderboardPayload, SigningService};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SECRET: &str = "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb";

fn address_one() -> PlayerAddress {
    PlayerAddress::parse(&format!("0x{}01", "00".repeat(31))).unwrap()
}

fn verify(service: &SigningService, message: &[u8], signature_hex: &str) -> bool {
    let key = VerifyingKey::from_bytes(&service.public_key_bytes().unwrap()).unwrap();
    let bytes: [u8; 64] = hex::decode(signature_hex).unwrap().try_into().unwrap();
    key.verify(message, &Signature::from_bytes(&bytes)).is_ok()
}

#[test]
fn test_game_result_message_example() {
    let message = GameResultPayload {
        player: address_one(),
        score: 1234,
        difficulty: Difficulty::Medium,
        won: true,
    }
    .encode();

    assert_eq!(message.len(), 32 + 8 + 1 + 1);
    assert_eq!(&message[message.len() - 2..], &[2, 1]);
}

#[test]
fn test_messages_are_reproducible() {
    let payload = LeaderboardPayload {
        player: address_one(),
        score: 987_654,
        difficulty: Difficulty::Hard,
    };
    assert_eq!(payload.encode(), payload.encode());

    let service = SigningService::from_secret_hex(SECRET).unwrap();
    // Ed25519 is deterministic: same key and message, same signature
    assert_eq!(
        service.sign_leaderboard_score(&payload).unwrap(),
        service.sign_leaderboard_score(&payload).unwrap()
    );
}

#[test]
fn test_won_session_signature_verifies_with_published_key() {
    let mut session = GameSession::deal(Difficulty::Hard, &mut ChaCha8Rng::seed_from_u64(3));
    session.start();
    let cards = session.state().cards.clone();
    for card in cards.iter() {
        let partner = cards
            .iter()
            .find(|c| c.pair_id == card.pair_id && c.unique_id != card.unique_id)
            .unwrap();
        if session.card(card.unique_id).unwrap().is_matched {
            continue;
        }
        session.flip(card.unique_id);
        session.flip(partner.unique_id);
        session.advance(MATCH_REVEAL_MS);
    }
    let summary = session.summary().unwrap();
    assert!(summary.won);

    let service = SigningService::from_secret_hex(SECRET).unwrap();
    let payload = GameResultPayload {
        player: address_one(),
        score: summary.score,
        difficulty: summary.difficulty,
        won: summary.won,
    };
    let signature = service.sign_game_result(&payload).unwrap();
    assert!(verify(&service, &payload.encode(), &signature));
}

#[test]
fn test_auth_proof_signs_utf8_text() {
    let service = SigningService::from_secret_hex(SECRET).unwrap();
    let proof = service.auth_proof("0xbeef", 1_700_000_000_000).unwrap();
    assert!(proof.message.starts_with("OneMatch Authentication\n"));
    assert!(verify(&service, proof.message.as_bytes(), &proof.signature));
}

#[test]
fn test_uninitialized_service_never_signs() {
    let service = SigningService::new();
    let payload = GameResultPayload {
        player: address_one(),
        score: 1,
        difficulty: Difficulty::Easy,
        won: true,
    };
    assert!(matches!(
        service.sign_game_result(&payload),
        Err(MatchError::SignerUninitialized)
    ));
}

#[test]
fn test_short_address_rejected() {
    assert!(matches!(
        PlayerAddress::parse("0x0001"),
        Err(MatchError::InvalidAddress(2))
    ));
}
