use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not eligible for achievement: {0}")]
    Ineligible(String),

    #[error("Signer not initialized")]
    SignerUninitialized,

    #[error("Signer already initialized")]
    SignerAlreadyInitialized,

    #[error("Invalid address: expected 32 bytes, got {0}")]
    InvalidAddress(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Remote signer error: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
