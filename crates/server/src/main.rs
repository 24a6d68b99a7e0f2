// DevEvents API server
// Decision: The store connection is opened lazily by the first request that needs it
// Decision: DEV_MODE=true serves from an in-memory store instead of PostgreSQL

use anyhow::{Context, Result};
use devevents_core::telemetry::{init_telemetry, TelemetryConfig};
use devevents_server::{build_router, with_layers, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; variables may come from the real environment
    let _ = dotenvy::dotenv();

    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "devevents" {
        telemetry_config.service_name = "devevents-server".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("devevents_server=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("devevents-server starting...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    if config.dev_mode {
        tracing::warn!("DEV_MODE enabled: using in-memory storage, data is lost on restart");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let gateway = Arc::new(config.gateway());
    let app = with_layers(build_router(gateway.clone()), &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    gateway.disconnect().await;
    tracing::info!("devevents-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
