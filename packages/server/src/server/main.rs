// Main entry point for the number-verification demo server

use std::sync::Arc;

use anyhow::{Context, Result};
use glide::GlideClient;
use server_core::kernel::GlideAdapter;
use server_core::server::build_app;
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting number verification demo server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Create the Glide client (fails fast on missing credentials)
    let glide_client =
        GlideClient::new(config.glide_settings()).context("Failed to create Glide client")?;

    // Build application
    let app = build_app(Arc::new(GlideAdapter::new(Arc::new(glide_client))));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Demo page: http://localhost:{}/", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
