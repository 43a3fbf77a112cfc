//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or oversized request body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request carried no usable file.
    #[error("Missing file: {0}")]
    MissingFile(String),

    /// Writing to the object store failed.
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Listing the object store failed.
    #[error("Storage list error: {0}")]
    StorageList(String),

    /// Response composition failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Parse(_) | Self::MissingFile(_) => 400,
            Self::StorageWrite(_) | Self::StorageList(_) | Self::Render(_) | Self::Internal(_) => {
                500
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::MissingFile(_) => "MISSING_FILE",
            Self::StorageWrite(_) => "STORAGE_WRITE_ERROR",
            Self::StorageList(_) => "STORAGE_LIST_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message shown to clients.
    ///
    /// Details stay in the logs; callers only learn the error category.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Unable to parse form",
            Self::MissingFile(_) => "Error retrieving the file",
            Self::StorageWrite(_) => "Failed to store the file",
            Self::StorageList(_) => "Failed to list stored files",
            Self::Render(_) => "Error rendering page",
            Self::Internal(_) => "An error occurred",
        }
    }

    /// Whether the caller, not the server, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
