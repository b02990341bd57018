//! API error type and its HTTP mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use matrix_sheets::{Error, GridError, StoreError};
use serde_json::json;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown matrix, user or route
    #[error("{0}")]
    NotFound(String),

    /// Request body holds a grid that cannot be stored
    #[error("Invalid matrix: {0}")]
    InvalidGrid(#[from] GridError),

    /// Unique key already taken
    #[error("{0}")]
    Conflict(String),

    /// Body missing, not JSON, or not the expected shape
    #[error("{message}")]
    BadBody { status: StatusCode, message: String },

    /// Request fields that cannot be stored as given
    #[error("{0}")]
    Unprocessable(String),

    /// Username/password rejected
    #[error("Invalid credentials")]
    Unauthorized,

    /// Anything the client cannot fix
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidGrid(_) | ApiError::Unprocessable(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadBody { status, .. } => *status,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            missing @ StoreError::NotFound { .. } => ApiError::NotFound(missing.to_string()),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Store(e) => e.into(),
            Error::Grid(e) => ApiError::InvalidGrid(e),
            // Stored records that no longer assemble are a server-side fault
            corrupt @ Error::CorruptMatrix { .. } => ApiError::Internal(corrupt.to_string()),
            Error::Csv(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Store task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
