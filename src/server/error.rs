//! Request-boundary errors and their JSON bodies

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::core::error::MatchError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request fields
    BadRequest(String),
    /// Achievement predicate not satisfied
    NotEligible { achievement_type: String },
    /// Signer or encoding failure, reported with a route-specific summary
    Internal { error: &'static str, details: String },
    NotFound,
}

impl ApiError {
    pub fn missing_fields(fields: &str) -> Self {
        ApiError::BadRequest(format!("Missing required fields: {}", fields))
    }

    /// Classify a core error raised while serving a route
    pub fn from_match(context: &'static str, err: MatchError) -> Self {
        match err {
            MatchError::Validation(msg) => ApiError::BadRequest(msg),
            MatchError::Ineligible(achievement_type) => ApiError::NotEligible { achievement_type },
            other => {
                tracing::error!("{}: {}", context, other);
                ApiError::Internal {
                    error: context,
                    details: other.to_string(),
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotEligible { .. } => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(error) => json!({ "error": error }),
            ApiError::NotEligible { achievement_type } => json!({
                "error": "Not eligible for this achievement",
                "achievementType": achievement_type,
                "criteria": "Achievement requirements not met",
            }),
            ApiError::Internal { error, details } => json!({ "error": error, "details": details }),
            ApiError::NotFound => json!({ "error": "Endpoint not found" }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            ApiError::from_match("x", MatchError::Validation("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from_match("x", MatchError::Ineligible("speed_demon".into())).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from_match("x", MatchError::SignerUninitialized).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from_match("x", MatchError::InvalidAddress(3)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_keeps_details() {
        match ApiError::from_match("Failed to sign score", MatchError::SignerUninitialized) {
            ApiError::Internal { error, details } => {
                assert_eq!(error, "Failed to sign score");
                assert_eq!(details, "Signer not initialized");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
