//! This module contains the error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur while loading or saving the sent-message record.
///
/// Every variant means the record store is unavailable for this call.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A file system operation on the backing file failed.
    #[error("A record store operation failed: {operation}: {source}")]
    OperationFailed {
        /// What was being attempted, e.g. "create record file".
        operation: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not exist. `save` never creates it.
    #[error("The record file was not found: {0}")]
    NotFound(String),

    /// The contents could not be encoded or decoded as a flat string map.
    #[error("Failed to serialize or deserialize the record: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        PersistenceError::OperationFailed {
            operation: operation.into(),
            source,
        }
    }
}
