//! Storage configuration types.

use std::path::PathBuf;

use bucketdrop_shared::{ProviderKind, StorageSettings};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// AWS S3 or an S3-compatible service.
    S3 {
        /// Bucket region.
        region: String,
        /// Custom endpoint URL; `None` targets AWS.
        endpoint: Option<String>,
        /// Static access key ID; `None` uses the default credential chain.
        access_key_id: Option<String>,
        /// Static secret access key.
        secret_access_key: Option<String>,
    },
    /// Local filesystem, one directory per bucket (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory store.
    Memory,
}

impl StorageProvider {
    /// Create an S3 provider that resolves credentials from the environment.
    #[must_use]
    pub fn s3(region: impl Into<String>) -> Self {
        Self::S3 {
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Build the provider described by application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the `local_fs` provider has no root directory.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        match settings.provider {
            ProviderKind::S3 => Ok(Self::S3 {
                region: settings.region.clone(),
                endpoint: settings.endpoint.clone(),
                access_key_id: settings.access_key_id.clone(),
                secret_access_key: settings.secret_access_key.clone(),
            }),
            ProviderKind::LocalFs => settings
                .root
                .clone()
                .map(Self::local_fs)
                .ok_or_else(|| StorageError::configuration("local_fs provider requires a root")),
            ProviderKind::Memory => Ok(Self::Memory),
        }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Storage client configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Buckets the client may address.
    pub buckets: Vec<String>,
}

impl StorageConfig {
    /// Create a config with no buckets.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            buckets: Vec::new(),
        }
    }

    /// Add a bucket the client may address.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.buckets.push(bucket.into());
        self
    }

    /// Build the config described by application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider settings are incomplete.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        Ok(Self::new(StorageProvider::from_settings(settings)?).with_bucket(&settings.bucket))
    }
}
