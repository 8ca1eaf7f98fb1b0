// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line = EMA(12) - EMA(26)        over the full series
//   Signal    = EMA(9) of the MACD line at every prefix length
//   Histogram = MACD - Signal
//
// The signal input is built by recomputing EMA(12) and EMA(26) from scratch on
// `prices[..=i]` for every `i`. Because EMA is seeded from its first window,
// an incremental update does not reproduce these values, so the quadratic
// recompute stays.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::ema::calculate_ema;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// MACD line, signal line and histogram for the latest bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute MACD(12, 26, 9) for `prices`.
///
/// Fewer than 26 points => all zeros.
pub fn calculate_macd(prices: &[f64]) -> MacdResult {
    if prices.len() < SLOW_PERIOD {
        return MacdResult::default();
    }

    let macd = macd_line(prices);

    let prefix_macd: Vec<f64> = (1..=prices.len()).map(|end| macd_line(&prices[..end])).collect();
    let signal = calculate_ema(&prefix_macd, SIGNAL_PERIOD);

    MacdResult {
        macd,
        signal,
        histogram: macd - signal,
    }
}

fn macd_line(prices: &[f64]) -> f64 {
    calculate_ema(prices, FAST_PERIOD) - calculate_ema(prices, SLOW_PERIOD)
}
