//! HTTP API layer with Axum routes and page rendering.
//!
//! This crate provides:
//! - The upload form and upload endpoint
//! - A health check
//! - Error → status mapping

pub mod error;
pub mod pages;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit};
use bucketdrop_core::{ListingService, ObjectStore, UploadService};
use bucketdrop_shared::{AppConfig, AppError};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::pages::PageRenderer;

/// Room left in the request body limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD: usize = 1 << 20;

/// Per-deployment values the handlers need.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Bucket uploads go to and listings come from.
    pub bucket: String,
    /// Maximum accepted file size in bytes.
    pub max_bytes: u64,
    /// Maximum number of objects shown in a listing.
    pub max_results: usize,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl GatewaySettings {
    /// Extract the handler settings from the application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            bucket: config.storage.bucket.clone(),
            max_bytes: config.upload.max_bytes,
            max_results: config.listing.max_results,
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload ingestion.
    pub uploads: Arc<UploadService<ObjectStore>>,
    /// Bucket listing.
    pub listings: Arc<ListingService<ObjectStore>>,
    /// Page renderer.
    pub pages: Arc<PageRenderer>,
    /// Handler settings.
    pub settings: Arc<GatewaySettings>,
}

impl AppState {
    /// Wire both services to one shared storage client.
    ///
    /// # Errors
    ///
    /// Returns an error if the page templates cannot be registered.
    pub fn new(storage: Arc<ObjectStore>, settings: GatewaySettings) -> Result<Self, AppError> {
        Ok(Self {
            uploads: Arc::new(UploadService::new(Arc::clone(&storage))),
            listings: Arc::new(ListingService::new(storage)),
            pages: Arc::new(PageRenderer::new()?),
            settings: Arc::new(settings),
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.settings.max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .merge(routes::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(state.settings.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
