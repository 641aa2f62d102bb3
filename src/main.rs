// =============================================================================
// TA Signals: Main Entry Point
// =============================================================================
//
// Serves indicator snapshots over HTTP.  Each request fetches fresh bars from
// the market-data provider, cleans them, and classifies the latest reading of
// every indicator in the battery.  Nothing is cached between requests.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod binance;
mod error;
mod indicators;
mod market_data;
mod runtime_config;
mod signals;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::binance::KlineClient;
use crate::runtime_config::{ServiceConfig, CONFIG_FILE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("TA Signals starting up (v{})", env!("CARGO_PKG_VERSION"));

    let mut config = ServiceConfig::load(CONFIG_FILE).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ServiceConfig::default()
    });
    config.apply_env_overrides();

    // ── 2. Market-data provider ──────────────────────────────────────────
    let client = KlineClient::new(&config.provider_base_url, config.request_timeout_secs)?;
    info!(provider = %config.provider_base_url, "market-data client ready");

    // ── 3. Shared state ──────────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, Arc::new(client)));
    info!(
        indicators = state.battery.len(),
        default_period = %state.default_period,
        max_bars = state.config.max_bars,
        "indicator battery loaded"
    );

    // ── 4. API server ────────────────────────────────────────────────────
    let app = api::rest::router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening. Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    // ── 5. Shutdown ──────────────────────────────────────────────────────
    info!(
        requests_served = state.requests_served(),
        uptime_secs = state.uptime_secs(),
        "TA Signals shut down complete."
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
