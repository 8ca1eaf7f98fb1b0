// =============================================================================
// FX Signal Engine — Main Entry Point
// =============================================================================
//
// Loads configuration, validates the rate provider once, then serves the REST
// API until Ctrl+C.
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fx_signal_engine::api;
use fx_signal_engine::app_state::AppState;
use fx_signal_engine::runtime_config::{RuntimeConfig, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("FX Signal Engine starting up");

    let config_path =
        std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    if config.api_key.is_empty() {
        warn!("CURRENCYLAYER_API_KEY is not set; signal generation will be unavailable");
    }
    info!(markets = ?config.markets, history_days = config.history_days, "Configured markets");

    let bind_addr = config.bind_addr.clone();

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config).context("failed to build application state")?);

    // ── 3. Initial provider check ────────────────────────────────────────
    let status_state = state.clone();
    tokio::spawn(async move {
        let status = status_state.refresh_api_status().await;
        info!(valid = status.is_valid, message = %status.message, "Initial API status");
    });

    // ── 4. Start the API server ──────────────────────────────────────────
    let app = api::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    // ── 5. Serve until Ctrl+C ────────────────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            warn!("Shutdown signal received, stopping gracefully");
        })
        .await
        .context("API server failed")?;

    info!("FX Signal Engine shut down complete.");
    Ok(())
}
