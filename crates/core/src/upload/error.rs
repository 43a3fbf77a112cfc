//! Upload error types.

use bucketdrop_shared::AppError;
use thiserror::Error;

use crate::storage::StorageError;

/// Upload operation errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Body exceeded the configured maximum size.
    #[error("upload exceeds maximum size of {max} bytes")]
    TooLarge {
        /// Maximum allowed size.
        max: u64,
    },

    /// Body could not be read.
    #[error("malformed upload body: {0}")]
    Malformed(String),

    /// No file name or no content.
    #[error("missing file: {0}")]
    MissingFile(&'static str),

    /// Storage write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UploadError {
    /// Create a too large error.
    #[must_use]
    pub fn too_large(max: u64) -> Self {
        Self::TooLarge { max }
    }

    /// Create a malformed body error.
    #[must_use]
    pub fn malformed(msg: impl ToString) -> Self {
        Self::Malformed(msg.to_string())
    }

    /// Whether this is a parse error (oversized or unreadable body).
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. } | Self::Malformed(_))
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } | UploadError::Malformed(_) => {
                Self::Parse(err.to_string())
            }
            UploadError::MissingFile(reason) => Self::MissingFile(reason.to_string()),
            UploadError::Storage(storage) => storage.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_map_to_400() {
        for err in [UploadError::too_large(10), UploadError::malformed("eof")] {
            assert!(err.is_parse_error());
            let app: AppError = err.into();
            assert!(matches!(app, AppError::Parse(_)));
            assert_eq!(app.status_code(), 400);
        }
    }

    #[test]
    fn test_missing_file_maps_to_400() {
        let app: AppError = UploadError::MissingFile("empty file").into();
        assert!(matches!(app, AppError::MissingFile(ref m) if m == "empty file"));
        assert_eq!(app.status_code(), 400);
    }

    #[test]
    fn test_storage_error_maps_to_write_error() {
        let err = UploadError::from(StorageError::write("demo", "k", "denied"));
        assert!(!err.is_parse_error());
        let app: AppError = err.into();
        assert!(matches!(app, AppError::StorageWrite(_)));
    }
}
