//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Listing limits.
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_request_timeout() -> u64 {
    60
}

/// Which object store backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// AWS S3 or an S3-compatible service.
    #[default]
    S3,
    /// A directory on the local filesystem (development only).
    LocalFs,
    /// In-process memory (tests and demos).
    Memory,
}

/// Object storage configuration.
///
/// Credentials are optional: when they are absent the S3 backend resolves
/// them from the environment, shared profile, or instance role.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend to use.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Target bucket name.
    pub bucket: String,
    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Static secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Root directory for the `local_fs` provider.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> u64 {
    100 << 20 // 100 MiB
}

/// Listing limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Maximum number of objects returned by one listing.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    9
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUCKETDROP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
