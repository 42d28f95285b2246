//! HTTP signing service
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /api/health` | liveness + public key |
//! | `POST /api/auth/verify` | signed auth token for a wallet |
//! | `POST /api/nft/proof` | mint authorization for an earned achievement |
//! | `POST /api/game/sign-result` | game-result proof |
//! | `POST /api/leaderboard/sign-score` | leaderboard proof |
//! | `POST /api/achievements/check` | achievements unlocked by a game |
//! | `GET /api/public-key` | public key in hex, bytes and Move form |

pub mod error;
pub mod requests;
pub mod routes;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::config::ServerConfig;
use crate::core::error::{MatchError, Result};
use crate::proof::SigningService;

pub use error::ApiError;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub signer: Arc<SigningService>,
}

impl AppState {
    pub fn new(signer: Arc<SigningService>) -> Self {
        Self { signer }
    }
}

/// Routes only, without CORS or request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/auth/verify", post(routes::auth_verify))
        .route("/api/nft/proof", post(routes::nft_proof))
        .route("/api/game/sign-result", post(routes::sign_game_result))
        .route("/api/leaderboard/sign-score", post(routes::sign_leaderboard_score))
        .route("/api/achievements/check", post(routes::check_achievements))
        .route("/api/public-key", get(routes::public_key))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Full application: routes, CORS allow-list and request tracing
pub fn app(state: AppState, config: &ServerConfig) -> Result<Router> {
    Ok(router(state)
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|_| MatchError::Config(format!("invalid CORS origin: {}", o)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, signer: Arc<SigningService>) -> Result<()> {
    let app = app(AppState::new(signer.clone()), config)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("OneMatch signing service listening on port {}", config.port);
    tracing::info!("Public key: {}", signer.public_key_hex()?);
    tracing::debug!("Public key (Move): {}", signer.public_key_move_literal()?);
    tracing::info!("CORS enabled for: {}", config.allowed_origins.join(", "));

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(cors_layer(&["http://ok.example".into()]).is_ok());
        assert!(matches!(
            cors_layer(&["bad\norigin".into()]),
            Err(MatchError::Config(_))
        ));
    }
}
