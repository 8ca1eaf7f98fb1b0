// =============================================================================
// Market Analyzer — one pair, one request, one TradingSignal
// =============================================================================
//
// Pipeline:
//   1. Parse the pair and resolve the quote key (`source + quote`).
//   2. Read the current rate; bail with `MissingRate` if absent or zero.
//   3. Assemble the price series: historical days (oldest first) then current.
//   4. Synthesize candles and compute every indicator.
//   5. Trend -> confirmations -> signal/confidence/narrative -> weekend guess.
//
// The analyzer is stateless and holds no locks; it can be shared freely.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock;
use crate::error::AnalysisError;
use crate::indicators::{self, IndicatorSet};
use crate::market_data::{synthesize_candles_at, PricePoint};
use crate::signals::{
    determine_trend, evaluate_confirmations, predict_weekend_direction, synthesize, Confirmations,
};
use crate::types::{CurrencyPair, Signal, Trend};

/// Minimum number of price points needed to run the indicators.
pub const MIN_PRICE_POINTS: usize = 2;

/// A provider-independent rates snapshot.
///
/// `quotes` is keyed by `SOURCE + CURRENCY`, e.g. `"EURUSD"` for a
/// EUR-sourced snapshot quoting USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Epoch seconds.
    pub timestamp: i64,
    pub source: String,
    pub quotes: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Quote for `key` if present, finite and positive.
    pub fn rate(&self, key: &str) -> Option<f64> {
        self.quotes
            .get(key)
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Snapshot time in epoch ms, saturating on out-of-range provider values.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.saturating_mul(1000)
    }
}

/// Complete analysis result for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub pair: String,
    pub signal: Signal,
    pub confidence: f64,
    pub trend: Trend,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub indicators: IndicatorSet,
    pub confirmations: Confirmations,
    pub confirmation_count: usize,
    pub analysis: String,
    /// Current snapshot time, epoch ms.
    pub timestamp: i64,
    /// Start of the next minute, epoch ms.
    pub next_candle_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_direction: Option<Trend>,
}

/// Stateless orchestrator from raw snapshots to a `TradingSignal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze `pair` from a current snapshot and its history (oldest first).
    pub fn analyze_market(
        &self,
        pair: &str,
        current: &RateSnapshot,
        historical: &[RateSnapshot],
    ) -> Result<TradingSignal, AnalysisError> {
        self.analyze_market_at(pair, current, historical, clock::now_ms())
    }

    /// Same as [`analyze_market`](Self::analyze_market) with an explicit clock.
    pub fn analyze_market_at(
        &self,
        pair: &str,
        current: &RateSnapshot,
        historical: &[RateSnapshot],
        now_ms: i64,
    ) -> Result<TradingSignal, AnalysisError> {
        let parsed = CurrencyPair::parse(pair)?;
        let key = parsed.quote_key(&current.source);

        let current_price = current.rate(&key).ok_or_else(|| AnalysisError::MissingRate {
            pair: parsed.to_string(),
            key: key.clone(),
        })?;

        let points = price_series(&key, current, current_price, historical);
        if points.len() < MIN_PRICE_POINTS {
            return Err(AnalysisError::InsufficientData {
                points: points.len(),
            });
        }

        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        let timestamps: Vec<i64> = points.iter().map(|p| p.timestamp_ms).collect();

        let candles = synthesize_candles_at(&prices, &timestamps, now_ms);
        let indicators = indicators::compute_all(&candles, &prices);

        let oldest = prices[0];
        let price_change = current_price - oldest;
        let price_change_percent = if oldest > 0.0 {
            price_change / oldest * 100.0
        } else {
            0.0
        };

        let trend = determine_trend(&indicators, current_price, price_change_percent);
        let confirmations = evaluate_confirmations(&indicators, trend, current_price);
        let decision = synthesize(&indicators, trend, &confirmations, current_price);
        let weekend_direction = predict_weekend_direction(trend, indicators.adx, &prices);

        debug!(
            pair = %parsed,
            points = prices.len(),
            trend = %trend,
            confirmations = confirmations.count(),
            signal = %decision.signal,
            confidence = decision.confidence,
            "Market analysis complete"
        );

        Ok(TradingSignal {
            pair: parsed.to_string(),
            signal: decision.signal,
            confidence: decision.confidence,
            trend,
            current_price,
            price_change,
            price_change_percent,
            indicators,
            confirmation_count: confirmations.count(),
            confirmations,
            analysis: decision.analysis,
            timestamp: current.timestamp_ms(),
            next_candle_time: clock::next_minute_boundary(now_ms),
            weekend_direction: Some(weekend_direction),
        })
    }
}

/// Historical days carrying a usable quote, oldest first, then the current rate.
fn price_series(
    key: &str,
    current: &RateSnapshot,
    current_price: f64,
    historical: &[RateSnapshot],
) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = historical
        .iter()
        .filter_map(|day| {
            day.rate(key).map(|price| PricePoint {
                timestamp_ms: day.timestamp_ms(),
                price,
            })
        })
        .collect();

    points.push(PricePoint {
        timestamp_ms: current.timestamp_ms(),
        price: current_price,
    });
    points
}
