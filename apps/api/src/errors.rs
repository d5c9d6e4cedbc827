#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// A degraded AI parse is deliberately NOT represented here: once a JSON
/// object boundary was located, the request succeeds with a lower-confidence
/// Evaluation instead of failing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external AI call failed, or its reply contained no JSON object
    /// at all. Never retried internally.
    #[error("Service error: {message}")]
    Service { message: String, details: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            AppError::Service { message, details } => {
                tracing::error!("Service error: {message}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message, "details": details })),
                )
                    .into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal server error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("resume cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_maps_to_500() {
        let response = AppError::Service {
            message: "AI evaluation call failed".to_string(),
            details: "timeout".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
