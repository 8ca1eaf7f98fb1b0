// =============================================================================
// Runtime Configuration — service settings loaded at startup
// =============================================================================
//
// Every tunable of the signal service lives here: provider endpoint and key,
// timeouts, history depth, bind address and the market list offered to
// clients.
//
// The file is read once at startup and never written back, so a key
// injected from the environment never lands on disk.  All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file.
//
// SECURITY: `api_key` is never logged and is omitted from `Debug` output.
// =============================================================================

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::CurrencyPair;

/// Environment variable holding the CurrencyLayer access key.
pub const ENV_API_KEY: &str = "CURRENCYLAYER_API_KEY";
/// Environment variable overriding `bind_addr`.
pub const ENV_BIND_ADDR: &str = "FX_BIND_ADDR";
/// Environment variable pointing at the config file.
pub const ENV_CONFIG_PATH: &str = "FX_CONFIG_PATH";
/// Config file used when `FX_CONFIG_PATH` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "runtime_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_base_url() -> String {
    "https://apilayer.net/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_validation_timeout_secs() -> u64 {
    15
}

fn default_history_days() -> u32 {
    7
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_markets() -> Vec<String> {
    [
        "EUR/USD", "GBP/USD", "USD/JPY", "USD/CAD", "AUD/USD", "USD/CHF", "NZD/USD", "EUR/GBP",
        "EUR/JPY", "GBP/JPY", "USD/PLN", "USD/ZAR",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the signal service.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    // --- Provider -----------------------------------------------------------

    /// CurrencyLayer access key. Usually injected from the environment
    /// rather than stored on disk.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Provider base URL, without the endpoint name.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for live / historical rate requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for the API validation request.
    #[serde(default = "default_validation_timeout_secs")]
    pub validation_timeout_secs: u64,

    /// Days of daily history fetched per analysis.
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    // --- Service ------------------------------------------------------------

    /// Address the REST API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Pairs offered to clients, as `BASE/QUOTE`.
    #[serde(default = "default_markets")]
    pub markets: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            validation_timeout_secs: default_validation_timeout_secs(),
            history_days: default_history_days(),
            bind_addr: default_bind_addr(),
            markets: default_markets(),
        }
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("validation_timeout_secs", &self.validation_timeout_secs)
            .field("history_days", &self.history_days)
            .field("bind_addr", &self.bind_addr)
            .field("markets", &self.markets)
            .finish()
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            markets = config.markets.len(),
            history_days = config.history_days,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `CURRENCYLAYER_API_KEY` and `FX_BIND_ADDR` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are
    /// ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = key.trim().to_string();
        }
        if let Some(addr) = non_empty(ENV_BIND_ADDR) {
            self.bind_addr = addr.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validation_timeout(&self) -> Duration {
        Duration::from_secs(self.validation_timeout_secs)
    }

    /// Whether `pair` is one of the configured markets.
    pub fn is_supported_market(&self, pair: &CurrencyPair) -> bool {
        self.markets
            .iter()
            .filter_map(|m| CurrencyPair::parse(m).ok())
            .any(|m| &m == pair)
    }
}
