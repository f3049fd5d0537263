//! Error types for the HTTP boundary.

use crate::dto::MessageResponse;
use arbordb_engine::EngineError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request can end in, one variant per status class the API
/// answers with.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request: missing fields, undecodable body, or a
    /// structurally refused mutation.
    #[error("{0}")]
    BadRequest(String),

    /// The requested key is not in the tree.
    #[error("{0}")]
    NotFound(String),

    /// The key is already taken.
    #[error("{0}")]
    Conflict(String),

    /// A development surface was hit while disabled.
    #[error("{0}")]
    Forbidden(String),

    /// The record store failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The status code this error answers with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::KeyConflict { key } => {
                Self::Conflict(format!("ID {key} already exists in the tree"))
            }
            EngineError::NotFound { key } => {
                Self::NotFound(format!("Node with ID {key} not found"))
            }
            EngineError::HasChildren { key } => {
                Self::BadRequest(format!("Cannot delete node {key} because it has children"))
            }
            EngineError::Store(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("invalid request body: {rejection}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, message, "request failed");
        } else {
            tracing::debug!(%status, message, "request refused");
        }
        (
            status,
            Json(MessageResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}
