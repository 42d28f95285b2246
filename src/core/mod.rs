pub mod config;
pub mod error;
pub mod types;

pub use config::ServerConfig;
pub use error::{MatchError, Result};
pub use types::{CardId, Difficulty, PairId, PlayerAddress};
