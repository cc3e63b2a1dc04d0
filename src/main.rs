use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use nestkeeper::api;
use nestkeeper::config::{load_config, NestkeeperConfig};
use nestkeeper::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nestkeeper=info".into()),
        )
        .init();

    info!("Nestkeeper starting...");

    let config_path =
        std::env::var("NESTKEEPER_CONFIG").unwrap_or_else(|_| "nestkeeper.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        load_config(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", config_path, e))?
    } else {
        info!(path = %config_path, "No config file found, using defaults");
        NestkeeperConfig::default()
    };

    let session = Arc::new(Session::with_sample_data(&config));
    let app = api::create_router(Arc::clone(&session), config.server.cors_enabled);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!(addr = %config.server.bind_addr, "Dashboard API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
