//! # Seat Console
//!
//! Proxy entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Upstream client for the backend
//! - HTTP server

use anyhow::Result;
use tracing::info;

use seat_console::config::Settings;
use seat_console::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    seat_console::telemetry::init_tracing();

    info!("Starting Seat Console proxy...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        backend = %settings.backend.url,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
