//! MongoDB score store.

mod config;
mod connection;
mod error;
mod models;
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoScoreStore;

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::dao::storage::StorageError;

const DUPLICATE_KEY_CODE: i32 = 11000;
const DOCUMENT_VALIDATION_FAILURE_CODE: i32 = 121;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        let message = err.to_string();
        let source = match &err {
            MongoDaoError::FindScore { source, .. } | MongoDaoError::UpsertScore { source, .. } => {
                source
            }
            _ => return StorageError::unavailable(message, err),
        };

        if is_connectivity_failure(source) {
            return StorageError::unavailable(message, err);
        }

        match server_error(source) {
            Some((DUPLICATE_KEY_CODE, detail)) => StorageError::Conflict(detail),
            Some((DOCUMENT_VALIDATION_FAILURE_CODE, detail)) => StorageError::Validation(detail),
            _ => StorageError::unknown(message, err),
        }
    }
}

/// Extract the server error code and message carried by a command or write failure.
fn server_error(err: &MongoError) -> Option<(i32, String)> {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => Some((command.code, command.message.clone())),
        ErrorKind::Write(WriteFailure::WriteError(write)) => Some((write.code, write.message.clone())),
        ErrorKind::Write(WriteFailure::WriteConcernError(concern)) => {
            Some((concern.code, concern.message.clone()))
        }
        _ => None,
    }
}

fn is_connectivity_failure(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_)
    )
}
