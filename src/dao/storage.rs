//! Backend-neutral storage errors.

use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or the connection could not be set up.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// No backend is configured for this process.
    #[error("storage not configured: {0}")]
    Unconfigured(String),
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key: {0}")]
    Conflict(String),
    /// The backend rejected the document against its schema.
    #[error("document validation failed: {0}")]
    Validation(String),
    /// Any other backend failure.
    #[error("storage operation failed: {message}")]
    Unknown {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct an unclassified error from any backend failure.
    pub fn unknown(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unknown {
            message,
            source: Box::new(source),
        }
    }
}
