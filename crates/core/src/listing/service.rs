//! Listing service implementation.

use std::sync::Arc;

use tracing::info;

use crate::storage::{StorageClient, StorageError};
use crate::url::{PublicUrl, public_url};

/// Public URLs of stored objects, in backend order.
pub type ListingResult = Vec<PublicUrl>;

/// Produces a fresh, bounded view of what a bucket holds.
///
/// Nothing is remembered between calls: every listing is a new query
/// against the store.
pub struct ListingService<C: StorageClient> {
    storage: Arc<C>,
}

impl<C: StorageClient> ListingService<C> {
    /// Create a new listing service.
    #[must_use]
    pub fn new(storage: Arc<C>) -> Self {
        Self { storage }
    }

    /// List at most `max_results` objects in `bucket` as public URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    pub async fn list(&self, bucket: &str, max_results: usize) -> Result<ListingResult, StorageError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let keys = self.storage.list(bucket, max_results).await?;
        let urls: ListingResult = keys
            .iter()
            .take(max_results)
            .map(|key| public_url(bucket, key))
            .collect();

        info!(bucket, count = urls.len(), max_results, "listed objects");
        Ok(urls)
    }
}
