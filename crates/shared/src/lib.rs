//! Shared configuration and errors for Bucketdrop.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error types and their HTTP classification
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{
    AppConfig, ListingConfig, ProviderKind, ServerConfig, StorageSettings, UploadConfig,
};
pub use error::{AppError, AppResult};
