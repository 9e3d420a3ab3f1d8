//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::EngineError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable detail
    pub detail: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request shape (parse/validation failure in the DTO layer)
    BadRequest(String),
    /// Engine-level failure
    Engine(EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, ApiError::new("bad_request", detail))
            }
            AppError::Engine(e) => match e {
                EngineError::Validation(detail) => {
                    (StatusCode::BAD_REQUEST, ApiError::new("bad_request", detail))
                }
                EngineError::OutOfServiceWindow => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new(
                        "outside_service_window",
                        "Window does not intersect service hours",
                    ),
                ),
                EngineError::NoCapacity => (
                    StatusCode::CONFLICT,
                    ApiError::new(
                        "no_capacity",
                        "No single or combo gap fits duration within window",
                    ),
                ),
                EngineError::MissingIdempotencyKey => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new(
                        "missing_idempotency_key",
                        "Idempotency-Key header is required",
                    ),
                ),
                EngineError::LockConflict => (
                    StatusCode::CONFLICT,
                    ApiError::new("conflict", "Another booking attempt is in flight"),
                ),
                EngineError::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    ApiError::new("not_found", format!("Booking {} not found", id)),
                ),
                unexpected => {
                    // internals are logged, never echoed to the caller
                    tracing::error!(error = %unexpected, "unexpected engine error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("internal_error", "Unexpected error"),
                    )
                }
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err)
    }
}
