//! SlotBot - conversational calendar booking assistant
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use slotbot_server::{router, AppContext};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// How often the background task sweeps idle sessions.
const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "could not load .env file"),
    }

    let config = slotbot_infra::config::load()?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let ctx = Arc::new(AppContext::new(&config)?);
    spawn_session_eviction(ctx.clone());

    let app = router(ctx);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "slotbot listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("slotbot shut down");
    Ok(())
}

/// Periodically evict sessions idle past the configured timeout.
fn spawn_session_eviction(ctx: Arc<AppContext>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            ctx.sessions.evict_idle();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
    }
}
