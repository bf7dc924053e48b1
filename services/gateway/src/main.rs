use std::sync::Arc;

use anyhow::Result;
use common::storage::{StorageConfig, connect};
use gateway::{MockGateway, config::GatewayConfig, server};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting marketplace gateway");

    // Initialize credential storage
    let storage_config = StorageConfig::from_env()?;
    let storage = connect(&storage_config).await?;

    match storage.health_check().await {
        Ok(true) => info!("Storage connection successful"),
        Ok(false) => warn!("Storage health check failed; auth state will not persist"),
        Err(e) => warn!("Storage unreachable ({}); auth state will not persist", e),
    }

    let gateway = Arc::new(MockGateway::with_storage(storage)?);
    info!("Marketplace gateway initialized successfully");

    // Start the web server
    let config = GatewayConfig::from_env()?;
    let app = server::create_router(gateway);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Marketplace gateway listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
