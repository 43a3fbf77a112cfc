//! Storage error types.

use bucketdrop_shared::AppError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing an object failed.
    #[error("failed to write '{key}' to bucket '{bucket}': {message}")]
    Write {
        /// Target bucket.
        bucket: String,
        /// Target key.
        key: String,
        /// Backend failure description.
        message: String,
    },

    /// Listing a bucket failed.
    #[error("failed to list bucket '{bucket}': {message}")]
    List {
        /// Listed bucket.
        bucket: String,
        /// Backend failure description.
        message: String,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a write error.
    #[must_use]
    pub fn write(bucket: &str, key: &str, message: impl ToString) -> Self {
        Self::Write {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a list error.
    #[must_use]
    pub fn list(bucket: &str, message: impl ToString) -> Self {
        Self::List {
            bucket: bucket.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Write { .. } => Self::StorageWrite(err.to_string()),
            StorageError::List { .. } => Self::StorageList(err.to_string()),
            StorageError::Configuration(msg) => Self::Internal(msg),
        }
    }
}
