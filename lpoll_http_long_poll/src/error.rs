//! Error types for the HTTP adapter.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lpoll_core::client_id::EmptyClientId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request rejected before it reached the hub.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The client identifier was missing or empty.
    #[error("clientId is required")]
    MissingClientId,

    /// The publish body was not valid JSON for a publish request.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The publish body had an empty `message`.
    #[error("message is required")]
    MissingMessage,
}

impl From<EmptyClientId> for RequestError {
    fn from(_: EmptyClientId) -> Self {
        Self::MissingClientId
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejected request");
        (StatusCode::BAD_REQUEST, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// JSON body for error responses: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description.
    pub error: String,
}

impl ErrorBody {
    /// Wrap an error description.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
