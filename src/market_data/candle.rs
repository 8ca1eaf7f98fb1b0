// =============================================================================
// Synthetic candles
// =============================================================================
//
// The rate provider only hands out one price per snapshot, so OHLC bars are
// synthesized: open = close = price, high/low a fixed 0.1% either side.

use serde::{Deserialize, Serialize};

/// One minute in milliseconds.
pub const MINUTE_MS: i64 = 60_000;

const HIGH_FACTOR: f64 = 1.001;
const LOW_FACTOR: f64 = 0.999;

/// A single exchange-rate observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// An OHLC bar. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: i64,
}

impl Candle {
    /// Build the synthetic bar for a single price.
    pub fn from_price(price: f64, timestamp: i64) -> Self {
        Self {
            open: price,
            high: price * HIGH_FACTOR,
            low: price * LOW_FACTOR,
            close: price,
            timestamp,
        }
    }
}

/// Synthesize one candle per price using the wall clock for backfill.
pub fn synthesize_candles(prices: &[f64], timestamps: &[i64]) -> Vec<Candle> {
    synthesize_candles_at(prices, timestamps, chrono::Utc::now().timestamp_millis())
}

/// Synthesize one candle per price.
///
/// A timestamp that is missing (index past the end of `timestamps`) or not
/// positive is backfilled as `now_ms - (N - i) * 60_000`, spacing the gaps a
/// minute apart ahead of `now_ms`.
pub fn synthesize_candles_at(prices: &[f64], timestamps: &[i64], now_ms: i64) -> Vec<Candle> {
    let n = prices.len() as i64;
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let timestamp = timestamps
                .get(i)
                .copied()
                .filter(|&ts| ts > 0)
                .unwrap_or_else(|| now_ms - (n - i as i64) * MINUTE_MS);
            Candle::from_price(price, timestamp)
        })
        .collect()
}

/// Closing prices of `candles`, in order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
