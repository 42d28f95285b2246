//! Signing service configuration
//!
//! Values come from three layers, later ones winning:
//! built-in defaults, an optional TOML file, then environment variables.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{MatchError, Result};

/// Value shipped in sample env files; treated as if no key were set
pub const PLACEHOLDER_PRIVATE_KEY: &str = "YOUR_PRIVATE_KEY_HERE";

/// Configuration for the signing service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port the HTTP service listens on
    pub port: u16,

    /// Origins allowed by the CORS layer
    ///
    /// Requests from any other browser origin are refused. Requests without
    /// an Origin header (curl, server-to-server) are unaffected.
    pub allowed_origins: Vec<String>,

    /// Hex-encoded 32-byte Ed25519 seed
    ///
    /// Required: the service refuses to start without it.
    pub private_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            allowed_origins: vec!["http://localhost:3000".into()],
            private_key: None,
        }
    }
}

impl ServerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file, falling back to defaults for absent keys
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MatchError::Config(e.to_string()))
    }

    /// Apply `PORT`, `ALLOWED_ORIGINS` and `PRIVATE_KEY` from the environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| MatchError::Config(format!("PORT is not a valid port: {}", port)))?;
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(key) = lookup("PRIVATE_KEY") {
            self.private_key = Some(key);
        }

        Ok(self)
    }

    /// The signing seed, ignoring blanks and the sample placeholder
    pub fn signing_key(&self) -> Option<&str> {
        self.private_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_PRIVATE_KEY)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(MatchError::Config("port must be non-zero".into()));
        }

        if self.allowed_origins.is_empty() {
            return Err(MatchError::Config("allowed_origins must not be empty".into()));
        }

        if self.signing_key().is_none() {
            return Err(MatchError::Config("PRIVATE_KEY not set".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000".to_string()]);
        assert!(config.signing_key().is_none());
    }

    #[test]
    fn test_toml_partial_keeps_defaults() {
        let config = ServerConfig::parse_toml("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins.len(), 1);
    }

    #[test]
    fn test_toml_rejects_bad_types() {
        assert!(matches!(
            ServerConfig::parse_toml("port = \"eighty\""),
            Err(MatchError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default()
            .with_overrides(env(&[
                ("PORT", "4000"),
                ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
                ("PRIVATE_KEY", "abcd"),
            ]))
            .unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.signing_key(), Some("abcd"));
    }

    #[test]
    fn test_env_bad_port() {
        let result = ServerConfig::default().with_overrides(env(&[("PORT", "nope")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_placeholder_key_counts_as_missing() {
        let config = ServerConfig {
            private_key: Some(PLACEHOLDER_PRIVATE_KEY.into()),
            ..ServerConfig::default()
        };
        assert!(config.signing_key().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = ServerConfig {
            private_key: Some("00".repeat(32)),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());

        config.allowed_origins.clear();
        assert!(config.validate().is_err());
    }
}
