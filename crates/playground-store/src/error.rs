//! Error types for playground storage.

use std::time::Duration;

use playground_core::{IdError, ValidationError};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The key that was not found.
        key: String,
    },

    /// Malformed input, e.g. a snippet without a main file.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Some records of a batch operation failed.
    #[error("{} records failed, {succeeded} succeeded", failed.len())]
    PartialFailure {
        /// Keys of the records that failed.
        failed: Vec<String>,
        /// Number of records that succeeded.
        succeeded: usize,
    },

    /// The caller's deadline expired before the operation finished.
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// A retention sweep is already running.
    #[error("retention sweep already in progress")]
    SweepInProgress,

    /// The store could not be constructed from its configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether retrying the operation later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::DeadlineExceeded(_) | Self::SweepInProgress
        )
    }
}

impl From<IdError> for StoreError {
    fn from(err: IdError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
