//! Core upload and listing logic for Bucketdrop.
//!
//! This crate contains the object-storage gateway with ZERO web dependencies.
//! Request handlers feed it byte streams and get back public URLs.
//!
//! # Modules
//!
//! - `storage` - Storage client capability and its OpenDAL implementation
//! - `upload` - Key derivation and single-file ingestion
//! - `listing` - Bounded, stateless listing of stored objects
//! - `url` - Public URL construction

pub mod listing;
pub mod storage;
pub mod upload;
pub mod url;

pub use listing::{ListingResult, ListingService};
pub use storage::{ObjectStore, StorageClient, StorageError, StorageKey};
pub use upload::{UploadError, UploadRequest, UploadService};
pub use url::{PublicUrl, public_url};
