//! Service and HTTP error types.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::ValidationError;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The document store could not be reached.
    #[error("storage connection failed")]
    Connection(#[source] StorageError),
    /// A uniqueness constraint rejected the write.
    #[error("duplicate player record")]
    Conflict(#[source] StorageError),
    /// The store rejected the document against its schema.
    #[error("store validation failed: {0}")]
    StoreValidation(String),
    /// Any other storage failure.
    #[error("storage operation failed")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable { .. } | StorageError::Unconfigured(_) => {
                ServiceError::Connection(err)
            }
            StorageError::Conflict(_) => ServiceError::Conflict(err),
            StorageError::Validation(message) => ServiceError::StoreValidation(message),
            StorageError::Unknown { .. } => ServiceError::Storage(err),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message = err
            .message
            .map(|message| message.into_owned())
            .unwrap_or_else(|| format!("invalid input: {}", err.code));
        debug!(code = %err.code, %message, "rejected request");
        AppError::BadRequest(message)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing client input.
    #[error("{0}")]
    BadRequest(String),
    /// The store refused the document.
    #[error("Validation failed")]
    InvalidDocument(String),
    /// The endpoint only serves the given method.
    #[error("Only {0} allowed")]
    MethodNotAllowed(&'static str),
    /// Conflict with an existing record.
    #[error("Player record already exists")]
    Conflict(String),
    /// Internal server error; `detail` is only sent when present.
    #[error("Internal server error")]
    Internal { detail: Option<String> },
}

impl AppError {
    /// Convert a service failure, hiding internal details when `production` is set.
    pub fn from_service(err: ServiceError, production: bool) -> Self {
        match err {
            ServiceError::StoreValidation(message) => AppError::InvalidDocument(message),
            ServiceError::Conflict(source) => AppError::Conflict(source.to_string()),
            ServiceError::Connection(source) | ServiceError::Storage(source) => {
                error!(error = %source, "score request failed");
                AppError::Internal {
                    detail: (!production).then(|| source.to_string()),
                }
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON envelope returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Short description of what went wrong.
    pub error: String,
    /// Diagnostic detail, omitted for internal errors in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = self.to_string();
        let message = match self {
            AppError::InvalidDocument(message) | AppError::Conflict(message) => Some(message),
            AppError::Internal { detail } => detail,
            AppError::BadRequest(_) | AppError::MethodNotAllowed(_) => None,
        };

        let payload = Json(ErrorBody {
            success: false,
            error,
            message,
        });

        (status, payload).into_response()
    }
}
