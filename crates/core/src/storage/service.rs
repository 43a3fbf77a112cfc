//! Storage client implementation using Apache OpenDAL.

use std::collections::HashMap;

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt, future};
use opendal::{Operator, services};
use tracing::debug;

use super::client::{StorageClient, StorageKey};
use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Object store backed by one OpenDAL operator per bucket.
///
/// Operators are built once and never change afterwards, so a single
/// instance can be shared behind an `Arc` by every request.
#[derive(Debug)]
pub struct ObjectStore {
    operators: HashMap<String, Operator>,
    provider: &'static str,
}

impl ObjectStore {
    /// Create a new object store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.buckets.is_empty() {
            return Err(StorageError::configuration("no buckets configured"));
        }

        let operators = config
            .buckets
            .iter()
            .map(|bucket| {
                Self::create_operator(&config.provider, bucket).map(|op| (bucket.clone(), op))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            operators,
            provider: config.provider.name(),
        })
    }

    /// Create OpenDAL operator for one bucket.
    fn create_operator(provider: &StorageProvider, bucket: &str) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                region,
                endpoint,
                access_key_id,
                secret_access_key,
            } => {
                let mut builder = services::S3::default().bucket(bucket).region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                if let (Some(key_id), Some(secret)) = (access_key_id, secret_access_key) {
                    builder = builder.access_key_id(key_id).secret_access_key(secret);
                }
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let bucket_root = root.join(bucket);
                let builder = services::Fs::default().root(
                    bucket_root
                        .to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };

        Ok(operator)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Whether `bucket` is addressable by this store.
    #[must_use]
    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.operators.contains_key(bucket)
    }

    fn operator(&self, bucket: &str) -> Option<&Operator> {
        self.operators.get(bucket)
    }
}

impl StorageClient for ObjectStore {
    async fn write(
        &self,
        bucket: &str,
        key: &StorageKey,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let operator = self
            .operator(bucket)
            .ok_or_else(|| StorageError::write(bucket, key.as_str(), "bucket not configured"))?;

        if !is_canonical(key.as_str()) {
            return Err(StorageError::write(
                bucket,
                key.as_str(),
                "key would be rewritten by the store",
            ));
        }

        debug!(bucket, key = %key, size = body.len(), "writing object");

        let capability = operator.info().full_capability();
        let mut write = operator.write_with(key.as_str(), body);
        if !content_type.is_empty() && capability.write_with_content_type {
            write = write.content_type(content_type);
        }

        write
            .await
            .map(|_| ())
            .map_err(|e| StorageError::write(bucket, key.as_str(), e))
    }

    async fn list(&self, bucket: &str, max_results: usize) -> Result<Vec<StorageKey>, StorageError> {
        let operator = self
            .operator(bucket)
            .ok_or_else(|| StorageError::list(bucket, "bucket not configured"))?;

        let capability = operator.info().full_capability();
        let mut lister = operator.lister_with("/").recursive(true);
        if capability.list_with_limit {
            lister = lister.limit(max_results);
        }

        // Directory markers count toward `max_results` so the page bound
        // holds; only the listing root itself is skipped.
        let keys: Vec<StorageKey> = lister
            .await
            .map_err(|e| StorageError::list(bucket, e))?
            .try_filter(|entry| future::ready(!matches!(entry.path(), "" | "/")))
            .take(max_results)
            .try_filter(|entry| future::ready(entry.metadata().mode().is_file()))
            .map_ok(|entry| StorageKey::new(entry.path()))
            .try_collect()
            .await
            .map_err(|e| StorageError::list(bucket, e))?;

        debug!(bucket, count = keys.len(), "listed objects");
        Ok(keys)
    }
}

/// Whether OpenDAL would store `key` under exactly this path.
fn is_canonical(key: &str) -> bool {
    !key.is_empty() && key.trim() == key && !key.starts_with('/') && !key.contains("//")
}
