//! Error types for the score API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that converts
//! into an HTTP response via its [`IntoResponse`] implementation. Malformed
//! input maps to 400, backend failures to 500, and a leaderboard that has
//! never loaded to 503 -- readers with a previously published snapshot are
//! served that snapshot instead of an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cometboard_core::IntakeError;
use cometboard_db::StoreError;
use cometboard_sync::SyncError;

/// Errors that can occur in the score API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed; nothing was written.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The score store could not process the request.
    #[error("store error: {0}")]
    Store(StoreError),

    /// No leaderboard snapshot has been published yet.
    #[error("leaderboard not ready: {0}")]
    NotReady(#[from] SyncError),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::Store(other),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(error: IntakeError) -> Self {
        match error {
            IntakeError::InvalidInput(msg) => Self::InvalidInput(msg),
            IntakeError::NoIdentity => {
                Self::InvalidInput(String::from("no identity to submit for"))
            }
            IntakeError::Store(store) => Self::from(store),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::NotReady(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
