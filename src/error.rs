//! Error types for the guard server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Guard Error Enum ==
/// Errors surfaced to HTTP clients of the guard server.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The client's identity exceeded its request allowance
    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream check failed on every attempt
    #[error("Upstream failure: {0}")]
    Upstream(#[from] UpstreamError),

    /// Internal server error, e.g. the request body could not be read
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Upstream Error Enum ==
/// Failure of a single call to the fact-checking backend.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure, timeout or undecodable body
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned status {0}")]
    Status(u16),
}

// == Body Rejection Conversion ==
impl From<JsonRejection> for GuardError {
    /// Server-side rejections (body could not be buffered) become `Internal`,
    /// everything else `InvalidRequest`.
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status().is_server_error() {
            GuardError::Internal(message)
        } else {
            GuardError::InvalidRequest(message)
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = match &self {
            GuardError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            GuardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GuardError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GuardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the guard server.
pub type Result<T> = std::result::Result<T, GuardError>;
