//! Ed25519 signing service
//!
//! The service is constructed empty and loaded exactly once. Any signing or
//! key query before the key is loaded fails with `SignerUninitialized`.

use std::fmt;
use std::sync::OnceLock;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{CryptoRng, RngCore};

use crate::achievements::AchievementKind;
use crate::core::error::{MatchError, Result};
use crate::proof::message::{
    auth_message, nft_message, AuthProof, GameResultPayload, LeaderboardPayload, NftProof,
};

#[derive(Default)]
pub struct SigningService {
    key: OnceLock<SigningKey>,
}

impl fmt::Debug for SigningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningService")
            .field("public_key", &self.public_key_hex().ok())
            .finish()
    }
}

impl SigningService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and load in one step
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let service = Self::new();
        service.initialize(secret_hex)?;
        Ok(service)
    }

    /// Load the 32-byte seed. Fails if a key is already loaded.
    pub fn initialize(&self, secret_hex: &str) -> Result<()> {
        let key = parse_signing_key(secret_hex)?;
        self.key
            .set(key)
            .map_err(|_| MatchError::SignerAlreadyInitialized)?;
        tracing::info!("Signing service initialized, public key {}", self.public_key_hex()?);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.key.get().is_some()
    }

    fn key(&self) -> Result<&SigningKey> {
        self.key.get().ok_or(MatchError::SignerUninitialized)
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        Ok(self.key()?.verifying_key())
    }

    pub fn public_key_bytes(&self) -> Result<[u8; 32]> {
        Ok(self.verifying_key()?.to_bytes())
    }

    pub fn public_key_hex(&self) -> Result<String> {
        Ok(hex::encode(self.public_key_bytes()?))
    }

    /// Public key as a Move `vector<u8>` literal
    pub fn public_key_move_literal(&self) -> Result<String> {
        Ok(move_vector_literal(&self.public_key_bytes()?))
    }

    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        Ok(self.key()?.sign(message))
    }

    /// Hex-encoded 64-byte signature
    pub fn sign_hex(&self, message: &[u8]) -> Result<String> {
        Ok(hex::encode(self.sign(message)?.to_bytes()))
    }

    pub fn sign_game_result(&self, payload: &GameResultPayload) -> Result<String> {
        self.sign_hex(&payload.encode())
    }

    pub fn sign_leaderboard_score(&self, payload: &LeaderboardPayload) -> Result<String> {
        self.sign_hex(&payload.encode())
    }

    pub fn auth_proof(&self, wallet: &str, timestamp_ms: i64) -> Result<AuthProof> {
        let message = auth_message(wallet, timestamp_ms);
        let signature = self.sign_hex(message.as_bytes())?;
        Ok(AuthProof { message, signature })
    }

    pub fn nft_proof(
        &self,
        wallet: &str,
        achievement: AchievementKind,
        timestamp_ms: i64,
    ) -> Result<NftProof> {
        let message = nft_message(wallet, achievement, timestamp_ms);
        let signature = self.sign_hex(message.as_bytes())?;
        Ok(NftProof {
            message,
            signature,
            public_key: self.public_key_hex()?,
            timestamp: timestamp_ms,
        })
    }

    /// Check a hex signature against this service's public key
    pub fn verify_hex(&self, message: &[u8], signature_hex: &str) -> Result<bool> {
        let bytes: [u8; 64] = hex::decode(signature_hex)?
            .try_into()
            .map_err(|_| MatchError::Validation("signature must be 64 bytes".into()))?;
        let signature = Signature::from_bytes(&bytes);
        Ok(self.verifying_key()?.verify(message, &signature).is_ok())
    }
}

fn parse_signing_key(secret_hex: &str) -> Result<SigningKey> {
    let trimmed = secret_hex.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let seed: [u8; 32] = hex::decode(digits)?
        .try_into()
        .map_err(|bytes: Vec<u8>| {
            MatchError::InvalidKey(format!("expected 32-byte seed, got {} bytes", bytes.len()))
        })?;
    Ok(SigningKey::from_bytes(&seed))
}

/// Fresh key pair as `(secret_hex, public_hex)`
pub fn generate_keypair<R: RngCore + CryptoRng>(rng: &mut R) -> (String, String) {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    let key = SigningKey::from_bytes(&seed);
    (hex::encode(seed), hex::encode(key.verifying_key().to_bytes()))
}

pub fn move_vector_literal(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("vector[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, PlayerAddress};

    // RFC 8032 test vector 1
    const SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const EMPTY_SIG: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    #[test]
    fn test_uninitialized_signer_fails() {
        let service = SigningService::new();
        assert!(!service.is_initialized());
        assert!(matches!(service.sign(b"hi"), Err(MatchError::SignerUninitialized)));
        assert!(matches!(service.public_key_hex(), Err(MatchError::SignerUninitialized)));
    }

    #[test]
    fn test_rfc8032_vector() {
        let service = SigningService::from_secret_hex(SECRET).unwrap();
        assert_eq!(service.public_key_hex().unwrap(), PUBLIC);
        assert_eq!(service.sign_hex(b"").unwrap(), EMPTY_SIG);
    }

    #[test]
    fn test_initialize_only_once() {
        let service = SigningService::from_secret_hex(SECRET).unwrap();
        assert!(matches!(
            service.initialize(SECRET),
            Err(MatchError::SignerAlreadyInitialized)
        ));
    }

    #[test]
    fn test_accepts_prefixed_secret() {
        let service = SigningService::from_secret_hex(&format!("0x{}", SECRET)).unwrap();
        assert_eq!(service.public_key_hex().unwrap(), PUBLIC);
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(matches!(
            SigningService::from_secret_hex("abcd"),
            Err(MatchError::InvalidKey(_))
        ));
        assert!(matches!(
            SigningService::from_secret_hex("not hex"),
            Err(MatchError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_game_signature_verifies() {
        let service = SigningService::from_secret_hex(SECRET).unwrap();
        let payload = GameResultPayload {
            player: PlayerAddress([7; 32]),
            score: 2700,
            difficulty: Difficulty::Medium,
            won: true,
        };
        let signature = service.sign_game_result(&payload).unwrap();
        assert_eq!(signature.len(), 128);
        assert!(service.verify_hex(&payload.encode(), &signature).unwrap());

        let tampered = GameResultPayload { score: 2701, ..payload };
        assert!(!service.verify_hex(&tampered.encode(), &signature).unwrap());
    }

    #[test]
    fn test_nft_proof_carries_public_key() {
        let service = SigningService::from_secret_hex(SECRET).unwrap();
        let proof = service
            .nft_proof("0xabc", AchievementKind::FirstVictory, 99)
            .unwrap();
        assert_eq!(proof.message, "0xabc:first_victory:99");
        assert_eq!(proof.public_key, PUBLIC);
        assert!(service.verify_hex(proof.message.as_bytes(), &proof.signature).unwrap());
    }

    #[test]
    fn test_move_literal() {
        assert_eq!(move_vector_literal(&[1, 2, 255]), "vector[1, 2, 255]");
    }

    #[test]
    fn test_generated_keypair_loads() {
        let mut rng = rand::rngs::OsRng;
        let (secret, public) = generate_keypair(&mut rng);
        let service = SigningService::from_secret_hex(&secret).unwrap();
        assert_eq!(service.public_key_hex().unwrap(), public);
    }
}
