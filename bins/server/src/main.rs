//! Bucketdrop Server
//!
//! Main entry point for the upload gateway.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucketdrop_api::{AppState, GatewaySettings, create_router};
use bucketdrop_core::ObjectStore;
use bucketdrop_core::storage::StorageConfig;
use bucketdrop_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucketdrop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Create the shared storage client
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    let storage = ObjectStore::from_config(&storage_config)?;
    anyhow::ensure!(
        storage.has_bucket(&config.storage.bucket),
        "bucket {} is not configured in the object store",
        config.storage.bucket
    );
    info!(
        provider = storage.provider_name(),
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        "Object store configured"
    );

    // Create application state
    let settings = GatewaySettings::from_config(&config);
    info!(
        max_bytes = settings.max_bytes,
        max_results = settings.max_results,
        "Upload limits configured"
    );
    let state = AppState::new(Arc::new(storage), settings)?;

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server closed");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
