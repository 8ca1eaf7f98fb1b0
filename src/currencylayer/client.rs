// =============================================================================
// CurrencyLayer REST API Client — live and historical FX quotes
// =============================================================================
//
// SECURITY: The access key travels as a query parameter, so it is never
// logged, never included in `Debug` output, and request URLs are stripped
// from transport errors before they propagate.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::analyzer::RateSnapshot;
use crate::types::CurrencyPair;

use super::wire::RatesResponse;

/// Timeout used by [`CurrencyLayerClient::validate_api`] unless overridden.
const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(15);
/// Days of history fetched per analysis unless overridden.
const DEFAULT_HISTORY_DAYS: u32 = 7;
/// Fewer historical days than this makes the indicators mostly defaults.
const MIN_USEFUL_HISTORY: usize = 3;

// =============================================================================
// Errors
// =============================================================================

/// A failed call to the rate provider.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider answered with `success: false`.
    #[error("{}", .info.as_deref().unwrap_or("Unknown API error"))]
    Provider {
        code: Option<String>,
        info: Option<String>,
    },

    /// Non-2xx HTTP status without a decodable provider error.
    #[error("API returned error: {status}")]
    Status { status: reqwest::StatusCode },

    /// Connection, timeout or body decoding failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    /// Provider error code, if the provider sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// User-facing description, with the well-known provider codes spelled out.
    pub fn friendly_message(&self) -> String {
        match self {
            Self::Provider { code, info } => match code.as_deref() {
                Some("101") => "Invalid API key. Please check your API key configuration.".into(),
                Some("104") => "Monthly API request limit reached. Please upgrade your plan or wait for next month.".into(),
                Some("103") => "Invalid API function. Please contact support.".into(),
                _ => info.clone().unwrap_or_else(|| "API request failed".into()),
            },
            Self::Status { .. } => self.to_string(),
            Self::Transport(e) if e.is_timeout() => "API request timeout. Please try again.".into(),
            Self::Transport(e) if e.is_connect() => {
                "No response from API server. Please check your internet connection.".into()
            }
            Self::Transport(e) => e.to_string(),
        }
    }
}

/// Friendly text for any error coming out of this client.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GatewayError>() {
        Some(gw) => gw.friendly_message(),
        None => err.to_string(),
    }
}

// =============================================================================
// Public result types
// =============================================================================

/// Outcome of an API-key / connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiStatus {
    pub is_valid: bool,
    pub is_connected: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ApiStatus {
    fn valid() -> Self {
        Self {
            is_valid: true,
            is_connected: true,
            message: "API is valid and connected successfully".into(),
            error_code: None,
        }
    }

    fn empty_data() -> Self {
        Self {
            is_valid: false,
            is_connected: true,
            message: "API connected but returned empty data".into(),
            error_code: None,
        }
    }

    fn from_error(err: &GatewayError) -> Self {
        let message = match err {
            GatewayError::Provider { code, info } => {
                let info = info.as_deref().unwrap_or("API validation failed");
                match code.as_deref() {
                    Some("101") | Some("102") => {
                        format!("API Key Error: {info}. Please check your API key.")
                    }
                    _ => err.friendly_message(),
                }
            }
            _ => err.friendly_message(),
        };
        Self {
            is_valid: false,
            is_connected: false,
            message,
            error_code: err.code().map(str::to_string),
        }
    }
}

/// Everything one analysis needs: the current snapshot plus history,
/// oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub current: RateSnapshot,
    pub historical: Vec<RateSnapshot>,
}

/// Derive `BASE/QUOTE` from a USD-sourced snapshot as `USD{quote} / USD{base}`.
///
/// The result is re-keyed as `{base}{quote}` with `source = base`, so it looks
/// exactly like a direct base-sourced answer. USD itself is implicitly 1.0.
pub fn derive_cross_rate(usd: &RateSnapshot, pair: &CurrencyPair) -> Option<RateSnapshot> {
    let usd_rate = |ccy: &str| {
        if ccy == "USD" {
            Some(1.0)
        } else {
            usd.rate(&format!("USD{ccy}"))
        }
    };

    let base_rate = usd_rate(&pair.base)?;
    let quote_rate = usd_rate(&pair.quote)?;
    let cross = quote_rate / base_rate;
    if !cross.is_finite() || cross <= 0.0 {
        return None;
    }

    Some(RateSnapshot {
        timestamp: usd.timestamp,
        source: pair.base.clone(),
        quotes: [(pair.quote_key(&pair.base), cross)].into_iter().collect(),
    })
}

// =============================================================================
// Client
// =============================================================================

/// CurrencyLayer (apilayer) REST client.
#[derive(Clone)]
pub struct CurrencyLayerClient {
    api_key: String,
    base_url: String,
    validation_timeout: Duration,
    history_days: u32,
    client: reqwest::Client,
}

impl CurrencyLayerClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key`  — CurrencyLayer access key.
    /// * `base_url` — e.g. `https://apilayer.net/api` (no trailing `/live`).
    /// * `timeout`  — per-request timeout for rate fetches.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, ?timeout, "CurrencyLayerClient initialised");

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            history_days: DEFAULT_HISTORY_DAYS,
            client,
        })
    }

    /// Override the timeout used by [`validate_api`](Self::validate_api).
    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }

    /// Override how many past days are fetched per analysis.
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    /// GET /live — latest quotes for `currencies` against `source`.
    #[instrument(skip(self), name = "currencylayer::get_live_rates")]
    pub async fn get_live_rates(&self, currencies: &[&str], source: &str) -> Result<RateSnapshot> {
        let query = [
            ("currencies", currencies.join(",")),
            ("source", source.to_string()),
        ];
        let resp = self.fetch("live", &query, None).await?;

        debug!(source, quotes = resp.quotes.len(), "live rates retrieved");
        Ok(resp.into())
    }

    /// GET /historical — end-of-day quotes for `date`.
    #[instrument(skip(self), name = "currencylayer::get_historical_rates")]
    pub async fn get_historical_rates(
        &self,
        date: NaiveDate,
        currencies: &[&str],
        source: &str,
    ) -> Result<RateSnapshot> {
        let query = [
            ("date", date.format("%Y-%m-%d").to_string()),
            ("currencies", currencies.join(",")),
            ("source", source.to_string()),
        ];
        let resp = self.fetch("historical", &query, None).await?;

        debug!(%date, source, quotes = resp.quotes.len(), "historical rates retrieved");
        Ok(resp.into())
    }

    /// Check the API with a EUR/USD quote. Never fails; every outcome is
    /// folded into the returned [`ApiStatus`].
    #[instrument(skip(self), name = "currencylayer::validate_api")]
    pub async fn validate_api(&self) -> ApiStatus {
        let query = [("currencies", "EUR".to_string()), ("source", "USD".to_string())];

        let status = match self.fetch("live", &query, Some(self.validation_timeout)).await {
            Ok(resp) if resp.quotes.is_empty() => ApiStatus::empty_data(),
            Ok(_) => ApiStatus::valid(),
            Err(err) => ApiStatus::from_error(&err),
        };

        if status.is_valid {
            info!("CurrencyLayer API validated");
        } else {
            warn!(message = %status.message, code = ?status.error_code, "CurrencyLayer API validation failed");
        }
        status
    }

    /// Current rate plus up to `history_days` of daily history for `pair`.
    ///
    /// The live quote is requested with `base` as source. If that fails and
    /// `base` is not USD, the rate is derived from a USD-sourced cross
    /// instead. Historical days that fail are skipped; partial (even empty)
    /// history is returned as-is.
    #[instrument(skip(self, pair), fields(pair = %pair), name = "currencylayer::get_market_data_for_analysis")]
    pub async fn get_market_data_for_analysis(&self, pair: &CurrencyPair) -> Result<MarketData> {
        let current = self.current_snapshot(pair).await?;

        let key = pair.quote_key(&current.source);
        if current.quotes.is_empty() {
            anyhow::bail!(
                "Unable to fetch current rate for {pair}. The currency pair may not be supported by your API plan."
            );
        }
        if current.rate(&key).is_none() {
            warn!(%key, available = ?current.quotes.keys().collect::<Vec<_>>(), "expected quote key missing from live response");
        }

        let historical = self.historical_snapshots(pair).await;

        Ok(MarketData {
            current,
            historical,
        })
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    async fn current_snapshot(&self, pair: &CurrencyPair) -> Result<RateSnapshot> {
        let err = match self.get_live_rates(&[pair.quote.as_str()], &pair.base).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) => err,
        };

        if pair.base != "USD" {
            info!(%pair, "direct quote failed, trying USD cross rate");
            match self.usd_cross_snapshot(pair).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(alt) => warn!(%pair, error = %describe_error(&alt), "USD cross rate failed"),
            }
        }

        anyhow::bail!("Failed to fetch current rates: {}", describe_error(&err))
    }

    async fn usd_cross_snapshot(&self, pair: &CurrencyPair) -> Result<RateSnapshot> {
        let usd = self
            .get_live_rates(&[pair.base.as_str(), pair.quote.as_str()], "USD")
            .await?;
        derive_cross_rate(&usd, pair)
            .with_context(|| format!("USD-sourced response lacks quotes for {pair}"))
    }

    /// Fetch the previous `history_days` days concurrently, oldest first.
    async fn historical_snapshots(&self, pair: &CurrencyPair) -> Vec<RateSnapshot> {
        let today = Utc::now().date_naive();
        let dates: Vec<NaiveDate> = (1..=self.history_days)
            .rev()
            .filter_map(|i| today.checked_sub_days(Days::new(u64::from(i))))
            .collect();

        let currencies = [pair.quote.as_str()];
        let results = join_all(
            dates
                .iter()
                .map(|&date| self.get_historical_rates(date, &currencies, &pair.base)),
        )
        .await;

        let mut historical = Vec::with_capacity(results.len());
        for (date, result) in dates.iter().zip(results) {
            match result {
                Ok(snapshot) => historical.push(snapshot),
                Err(err) => warn!(%pair, %date, error = %describe_error(&err), "historical rates unavailable, skipping day"),
            }
        }

        if historical.is_empty() {
            warn!(%pair, "no historical data available, analysis will rely on the current rate only");
        } else if historical.len() < MIN_USEFUL_HISTORY {
            warn!(%pair, days = historical.len(), "limited historical data, analysis may be less accurate");
        }

        historical
    }

    /// GET `{base_url}/{endpoint}` and decode the provider envelope.
    async fn fetch(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<RatesResponse, GatewayError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut request = self
            .client
            .get(&url)
            .query(&[("access_key", self.api_key.as_str()), ("format", "1")])
            .query(query);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await.map_err(reqwest::Error::without_url)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(reqwest::Error::without_url)?;

        let parsed: Option<RatesResponse> = serde_json::from_slice(&body).ok();
        match parsed {
            Some(rates) if rates.success => Ok(rates),
            Some(rates) => {
                let error = rates.error.unwrap_or_default();
                Err(GatewayError::Provider {
                    code: error.code,
                    info: error.info,
                })
            }
            None if !status.is_success() => Err(GatewayError::Status { status }),
            None => Err(GatewayError::Provider {
                code: None,
                info: Some(format!("Malformed response from /{endpoint}")),
            }),
        }
    }
}

impl std::fmt::Debug for CurrencyLayerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyLayerClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("validation_timeout", &self.validation_timeout)
            .field("history_days", &self.history_days)
            .finish()
    }
}
