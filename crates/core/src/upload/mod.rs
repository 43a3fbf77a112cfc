//! File upload ingestion.
//!
//! This module turns one uploaded file into one stored object:
//! - Storage key derivation from the file name and upload time
//! - Size enforcement while the body is read
//! - A single write through the shared storage client
//! - Public URL construction for the stored object

mod error;
mod key;
mod service;
mod types;

pub use error::UploadError;
pub use key::{base_name, generate_key};
pub use service::UploadService;
pub use types::UploadRequest;
