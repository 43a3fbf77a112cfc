//! The storage capability shared by the upload and listing services.

use std::fmt;
use std::future::Future;

use bytes::Bytes;
use serde::Serialize;

use super::error::StorageError;

/// Address of an object within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Wrap a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Remote object store operations.
///
/// One instance is shared by every request, so implementations must be
/// safe to call concurrently without outside locking. Failures are
/// reported on the first attempt; nothing here retries.
pub trait StorageClient: Send + Sync {
    /// Create or overwrite the object at `key`.
    ///
    /// `body` is the whole object; callers buffer the upload first, so a
    /// failed read never leaves a partial object behind. An empty
    /// `content_type` means the client declared none.
    fn write(
        &self,
        bucket: &str,
        key: &StorageKey,
        body: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// List at most `max_results` keys in backend order, from one request.
    ///
    /// Directory markers use up slots in that request but are not returned.
    fn list(
        &self,
        bucket: &str,
        max_results: usize,
    ) -> impl Future<Output = Result<Vec<StorageKey>, StorageError>> + Send;
}
