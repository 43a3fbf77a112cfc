//! Upload service implementation.

use std::fmt::Display;
use std::pin::pin;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};
use tracing::{info, warn};

use super::error::UploadError;
use super::key::{base_name, generate_key};
use super::types::UploadRequest;
use crate::storage::StorageClient;
use crate::url::{PublicUrl, public_url};

/// Stores uploaded files and hands back their public address.
pub struct UploadService<C: StorageClient> {
    storage: Arc<C>,
}

impl<C: StorageClient> UploadService<C> {
    /// Create a new upload service.
    #[must_use]
    pub fn new(storage: Arc<C>) -> Self {
        Self { storage }
    }

    /// Store one upload, keyed by the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The body is larger than `max_bytes` or cannot be read
    /// - The file name or the body is empty
    /// - The storage write fails
    pub async fn store<S, E>(
        &self,
        request: UploadRequest<S>,
        bucket: &str,
        max_bytes: u64,
    ) -> Result<PublicUrl, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>> + Send,
        E: Display,
    {
        self.store_at(request, bucket, max_bytes, Utc::now()).await
    }

    /// Store one upload, keyed by `now`.
    ///
    /// # Errors
    ///
    /// Same as [`UploadService::store`].
    pub async fn store_at<S, E>(
        &self,
        request: UploadRequest<S>,
        bucket: &str,
        max_bytes: u64,
        now: DateTime<Utc>,
    ) -> Result<PublicUrl, UploadError>
    where
        S: Stream<Item = Result<Bytes, E>> + Send,
        E: Display,
    {
        let UploadRequest {
            original_file_name,
            content_type,
            body,
            declared_size,
        } = request;

        if base_name(&original_file_name).is_empty() {
            return Err(UploadError::MissingFile("file name is empty"));
        }

        if declared_size.is_some_and(|size| size > max_bytes) {
            warn!(file = %original_file_name, ?declared_size, max_bytes, "declared size over limit");
            return Err(UploadError::too_large(max_bytes));
        }

        let body = read_bounded(body, max_bytes).await?;
        if body.is_empty() {
            return Err(UploadError::MissingFile("file is empty"));
        }

        let key = generate_key(&original_file_name, now);
        let size = body.len();
        self.storage
            .write(bucket, &key, body, &content_type)
            .await?;

        info!(bucket, key = %key, size, content_type = %content_type, "stored upload");
        Ok(public_url(bucket, &key))
    }
}

/// Drain `body`, failing as soon as it grows past `max_bytes`.
async fn read_bounded<S, E>(body: S, max_bytes: u64) -> Result<Bytes, UploadError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut body = pin!(body);
    let mut buf = BytesMut::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(UploadError::malformed)?;
        let total = u64::try_from(buf.len() + chunk.len()).unwrap_or(u64::MAX);
        if total > max_bytes {
            warn!(max_bytes, "upload body over limit");
            return Err(UploadError::too_large(max_bytes));
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ObjectStore, StorageConfig, StorageError, StorageKey, StorageProvider};
    use futures::stream;
    use std::convert::Infallible;
    use std::sync::Mutex;

    /// Recorded call to the mock client.
    #[derive(Debug, Clone, PartialEq)]
    struct WriteCall {
        bucket: String,
        key: String,
        body: Bytes,
        content_type: String,
    }

    /// Mock storage client for testing.
    struct MockStorageClient {
        writes: Mutex<Vec<WriteCall>>,
        fail_writes: bool,
    }

    impl MockStorageClient {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_writes: true,
            }
        }

        fn writes(&self) -> Vec<WriteCall> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl StorageClient for MockStorageClient {
        async fn write(
            &self,
            bucket: &str,
            key: &StorageKey,
            body: Bytes,
            content_type: &str,
        ) -> Result<(), StorageError> {
            self.writes.lock().unwrap().push(WriteCall {
                bucket: bucket.to_string(),
                key: key.to_string(),
                body,
                content_type: content_type.to_string(),
            });
            if self.fail_writes {
                return Err(StorageError::write(bucket, key.as_str(), "AccessDenied"));
            }
            Ok(())
        }

        async fn list(
            &self,
            _bucket: &str,
            _max_results: usize,
        ) -> Result<Vec<StorageKey>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    type TestBody = stream::Iter<std::vec::IntoIter<Result<Bytes, Infallible>>>;

    fn body(chunks: &[&'static [u8]]) -> TestBody {
        stream::iter(
            chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(*c)))
                .collect::<Vec<_>>(),
        )
    }

    fn request(name: &str, chunks: &[&'static [u8]]) -> UploadRequest<TestBody> {
        UploadRequest::new(name, "image/png", body(chunks))
    }

    #[tokio::test]
    async fn test_store_returns_public_url() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let url = service
            .store_at(request("cat.png", &[b"png", b"data"]), "demo", 1024, at(1_700_000_000))
            .await
            .expect("upload should succeed");

        assert_eq!(url.as_str(), "https://demo.s3.amazonaws.com/1700000000-cat.png");
        assert_eq!(
            storage.writes(),
            vec![WriteCall {
                bucket: "demo".to_string(),
                key: "1700000000-cat.png".to_string(),
                body: Bytes::from_static(b"pngdata"),
                content_type: "image/png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_content_type_passed_through_verbatim() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let req = UploadRequest::new("evil.png", "text/html; charset=utf-8", body(&[b"<html>"]));
        service.store_at(req, "demo", 1024, at(1)).await.unwrap();

        assert_eq!(storage.writes()[0].content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_body_over_limit_is_parse_error() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let err = service
            .store_at(request("big.bin", &[b"12345", b"6"]), "demo", 5, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::TooLarge { max: 5 }));
        assert!(err.is_parse_error());
        assert!(storage.writes().is_empty());
    }

    #[tokio::test]
    async fn test_body_at_limit_is_accepted() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        service
            .store_at(request("edge.bin", &[b"123", b"45"]), "demo", 5, at(1))
            .await
            .expect("exactly max_bytes should be accepted");
        assert_eq!(storage.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_declared_size_over_limit_fails_before_reading() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let req = request("big.bin", &[b"x"]).with_declared_size(Some(6));
        let err = service.store_at(req, "demo", 5, at(1)).await.unwrap_err();

        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert!(storage.writes().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_body_is_parse_error() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err("connection reset"),
        ]);
        let req = UploadRequest::new("cut.bin", "application/octet-stream", chunks);
        let err = service.store_at(req, "demo", 1024, at(1)).await.unwrap_err();

        assert!(matches!(err, UploadError::Malformed(ref m) if m == "connection reset"));
        assert!(storage.writes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_missing_file() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let err = service
            .store_at(request("empty.txt", &[]), "demo", 1024, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::MissingFile(_)));
        assert!(storage.writes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_is_missing_file() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        for name in ["", "/", "\\", "//\\", "  ", "/ \\"] {
            let err = service
                .store_at(request(name, &[b"data"]), "demo", 1024, at(1))
                .await
                .unwrap_err();
            assert!(matches!(err, UploadError::MissingFile(_)), "name {name:?}");
        }
        assert!(storage.writes().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let storage = Arc::new(MockStorageClient::failing());
        let service = UploadService::new(Arc::clone(&storage));

        let err = service
            .store_at(request("cat.png", &[b"data"]), "demo", 1024, at(1))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Storage(StorageError::Write { .. })));
        // One attempt, no retry.
        assert_eq!(storage.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_same_second_uploads_overwrite() {
        let config = StorageConfig::new(StorageProvider::Memory).with_bucket("demo");
        let storage = Arc::new(ObjectStore::from_config(&config).unwrap());
        let service = UploadService::new(Arc::clone(&storage));
        let now = at(1_700_000_000);

        let first = service
            .store_at(request("photo.jpg", &[b"first"]), "demo", 1024, now)
            .await
            .unwrap();
        let second = service
            .store_at(request("photo.jpg", &[b"second"]), "demo", 1024, now)
            .await
            .unwrap();

        assert_eq!(first, second);
        let keys = storage.list("demo", 9).await.unwrap();
        assert_eq!(keys, vec![StorageKey::new("1700000000-photo.jpg")]);
    }

    #[tokio::test]
    async fn test_trailing_whitespace_url_matches_listing() {
        let config = StorageConfig::new(StorageProvider::Memory).with_bucket("demo");
        let storage = Arc::new(ObjectStore::from_config(&config).unwrap());
        let service = UploadService::new(Arc::clone(&storage));
        let listings = crate::ListingService::new(Arc::clone(&storage));

        let url = service
            .store_at(request("cat.png ", &[b"meow"]), "demo", 1024, at(1_700_000_000))
            .await
            .unwrap();

        assert_eq!(url.as_str(), "https://demo.s3.amazonaws.com/1700000000-cat.png");
        assert_eq!(listings.list("demo", 9).await.unwrap(), vec![url]);
    }

    #[tokio::test]
    async fn test_store_uses_current_time() {
        let storage = Arc::new(MockStorageClient::new());
        let service = UploadService::new(Arc::clone(&storage));

        let before = Utc::now().timestamp();
        service
            .store(request("now.txt", &[b"x"]), "demo", 1024)
            .await
            .unwrap();
        let after = Utc::now().timestamp();

        let key = storage.writes()[0].key.clone();
        let (secs, name) = key.split_once('-').expect("timestamp prefix");
        let secs: i64 = secs.parse().unwrap();
        assert!((before..=after).contains(&secs));
        assert_eq!(name, "now.txt");
    }
}
