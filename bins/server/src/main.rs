//! Depot API Server
//!
//! Main entry point for the Depot upload service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot_api::{AppState, create_router};
use depot_core::storage::{StorageConfig, StorageService};
use depot_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "depot=debug,depot_core=debug,depot_api=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to object storage and make sure the bucket exists
    let storage_config = StorageConfig::new(
        config.storage.endpoint.clone(),
        config.storage.bucket.clone(),
        config.storage.access_key.clone(),
        config.storage.secret_key.clone(),
        config.storage.region.clone(),
    );
    let storage = StorageService::connect(&storage_config).await;
    storage.ensure_bucket().await?;
    info!(bucket = %storage.bucket(), "Object storage initialized");

    // Create application state
    let state = AppState {
        storage: Arc::new(storage),
        max_upload_bytes: config.server.max_upload_bytes,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
