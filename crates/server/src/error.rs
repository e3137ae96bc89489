//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use macprice_core::ValidationError;

use crate::catalog::CatalogError;
use crate::db::StorageError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request data violates a record schema.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Document store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored data failed validation on the way out.
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => Self::Validation(e),
            CatalogError::Storage(e) => Self::Storage(e),
            corrupt @ CatalogError::Corrupt { .. } => Self::DataCorruption(corrupt.to_string()),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(StorageError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) | Self::DataCorruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Storage(StorageError::Write { .. } | StorageError::Read { .. })
                | Self::DataCorruption(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Validation(e) => e.to_string(),
            Self::Storage(StorageError::Unavailable) => "Database not available".to_string(),
            Self::Storage(_) | Self::DataCorruption(_) => "Internal server error".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
