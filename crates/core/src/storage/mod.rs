//! Object storage for uploaded files using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - AWS S3 and S3-compatible services (MinIO, Cloudflare R2, DigitalOcean Spaces)
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    StorageClient (trait)                         │
//! │        write(bucket, key, body)  │  list(bucket, max)            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                  ObjectStore (Apache OpenDAL)                    │
//! │ op.write_with("key", data)      │ op.lister_with("/").limit(n)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod config;
mod error;
mod service;

pub use client::{StorageClient, StorageKey};
pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::ObjectStore;
