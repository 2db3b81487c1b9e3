//! # StoryWeave Server
//!
//! Binary entry point for the StoryWeave HTTP service.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults (port 8000, in-process cache, fallback widgets without a key)
//! cargo run --bin storyweave-server
//!
//! # With a model key and an explicit config file
//! OPENAI_API_KEY=sk-... STORYWEAVE_CONFIG=config/storyweave.toml cargo run --bin storyweave-server
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use storyweave_server::{router, AppState, WidgetService};
use storyweave_shared::config::ServiceConfig;
use storyweave_shared::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("Failed to load configuration")?;
    logging::init_tracing(&config.logging);

    info!("Starting StoryWeave Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "   Build Mode: {}",
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    let service = WidgetService::from_config(&config)
        .await
        .context("Failed to initialize widget service")?;
    info!("   Cache: {}", service.cache_backend());
    info!("   CDN: {}", config.render.cdn_base_url);

    let app = router(AppState::new(service), &config.server);
    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address()))?;

    info!("StoryWeave Server started successfully!");
    info!("   Listening on http://{}", listener.local_addr()?);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("StoryWeave Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }

    info!("Shutdown signal received, draining in-flight requests...");
}
