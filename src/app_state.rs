// =============================================================================
// Central Application State — FX Signal Engine
// =============================================================================
//
// Shared by every request handler via `Arc<AppState>`.
//
// Thread safety:
//   - parking_lot::RwLock for the cached API status.
//   - tokio::sync::Mutex to serialize signal generation, so a burst of
//     requests never fans out into parallel upstream fetches.
//   - The gateway client and analyzer are immutable after construction.
// =============================================================================

use anyhow::Result;
use parking_lot::RwLock;

use crate::analyzer::MarketAnalyzer;
use crate::currencylayer::{ApiStatus, CurrencyLayerClient};
use crate::runtime_config::RuntimeConfig;

/// Central application state shared across all async tasks via `Arc<AppState>`.
pub struct AppState {
    // ── Configuration ───────────────────────────────────────────────────
    /// Fixed for the process lifetime once startup overrides are applied.
    pub runtime_config: RuntimeConfig,

    // ── Market data & analysis ──────────────────────────────────────────
    pub gateway: CurrencyLayerClient,
    pub analyzer: MarketAnalyzer,

    /// Held for the duration of one fetch + analysis.
    pub analysis_lock: tokio::sync::Mutex<()>,

    // ── Operational status ──────────────────────────────────────────────
    /// Result of the most recent `validate_api` call.
    pub api_status: RwLock<Option<ApiStatus>>,

    /// Instant when the service was started. Used for uptime.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given runtime configuration.
    ///
    /// The gateway client is built from the config's provider settings. The
    /// returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let gateway = CurrencyLayerClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout(),
        )?
        .with_validation_timeout(config.validation_timeout())
        .with_history_days(config.history_days);

        Ok(Self {
            runtime_config: config,
            gateway,
            analyzer: MarketAnalyzer::new(),
            analysis_lock: tokio::sync::Mutex::new(()),
            api_status: RwLock::new(None),
            start_time: std::time::Instant::now(),
        })
    }

    /// Validate the provider and cache the outcome.
    pub async fn refresh_api_status(&self) -> ApiStatus {
        let status = self.gateway.validate_api().await;
        *self.api_status.write() = Some(status.clone());
        status
    }

    /// Last cached validation result, if any validation has completed.
    pub fn cached_api_status(&self) -> Option<ApiStatus> {
        self.api_status.read().clone()
    }

    /// Whether the last validation succeeded. `false` until one has run.
    pub fn api_ready(&self) -> bool {
        self.api_status
            .read()
            .as_ref()
            .map(|s| s.is_valid)
            .unwrap_or(false)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_no_status() {
        let state = AppState::new(RuntimeConfig::default()).unwrap();
        assert!(state.api_status.read().is_none());
        assert!(!state.api_ready());
        assert_eq!(state.runtime_config.markets.len(), 12);
    }

    #[test]
    fn api_ready_follows_cached_status() {
        let state = AppState::new(RuntimeConfig::default()).unwrap();
        *state.api_status.write() = Some(ApiStatus {
            is_valid: true,
            is_connected: true,
            message: "ok".into(),
            error_code: None,
        });
        assert!(state.api_ready());
        assert_eq!(state.cached_api_status().unwrap().message, "ok");
    }
}
