//! API error type and its HTTP mapping
//!
//! Every fallible handler returns `Result<_, ApiError>`; the `IntoResponse`
//! impl converts each variant to its status code and a JSON body with a
//! human-readable `message` field, so no error escapes the handler boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid required input (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Referenced entity does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// External file host failure (HTTP 500)
    #[error("{0}")]
    Upstream(String),

    /// Database operation failure (HTTP 500)
    #[error("Server error")]
    Store(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(detail) => {
                // The internal detail goes to the log, not to the client
                tracing::error!(%detail, "database operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<redb::Error> for ApiError {
    fn from(err: redb::Error) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<redb::TransactionError> for ApiError {
    fn from(err: redb::TransactionError) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<redb::TableError> for ApiError {
    fn from(err: redb::TableError) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<redb::StorageError> for ApiError {
    fn from(err: redb::StorageError) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<redb::CommitError> for ApiError {
    fn from(err: redb::CommitError) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Store(err.to_string())
    }
}
