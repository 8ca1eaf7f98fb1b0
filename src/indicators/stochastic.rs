// =============================================================================
// Stochastic Oscillator (%K / %D)
// =============================================================================
//
//   %K = (close - lowest_low) / (highest_high - lowest_low) * 100
//   %D = mean of the last (up to) 3 %K readings
//
// %K is evaluated over every trailing window of `period` candles; windows
// with no range are skipped when building the %D history.

use serde::{Deserialize, Serialize};

use crate::market_data::Candle;

use super::stats::clamp_finite;

pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;
const D_SMOOTHING: usize = 3;

/// Stochastic reading. Both lines are in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticResult {
    pub k: f64,
    pub d: f64,
}

impl StochasticResult {
    pub const NEUTRAL: Self = Self { k: 50.0, d: 50.0 };
}

impl Default for StochasticResult {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Compute the stochastic oscillator for the latest candle.
///
/// Returns `{50, 50}` when there are fewer than `period` candles or when the
/// latest window has no range (highest high == lowest low).
pub fn calculate_stochastic(candles: &[Candle], period: usize) -> StochasticResult {
    if period == 0 || candles.len() < period {
        return StochasticResult::NEUTRAL;
    }

    let k = match percent_k(&candles[candles.len() - period..]) {
        Some(k) => k,
        None => return StochasticResult::NEUTRAL,
    };

    let k_values: Vec<f64> = candles.windows(period).filter_map(percent_k).collect();
    let recent = &k_values[k_values.len().saturating_sub(D_SMOOTHING)..];
    let d = if recent.is_empty() {
        k
    } else {
        recent.iter().sum::<f64>() / recent.len() as f64
    };

    StochasticResult {
        k: clamp_finite(k, 0.0, 100.0, 50.0),
        d: clamp_finite(d, 0.0, 100.0, 50.0),
    }
}

/// %K of the last candle in `window`; `None` when the window has no range.
fn percent_k(window: &[Candle]) -> Option<f64> {
    let last = window.last()?;
    let highest = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let lowest = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

    if highest == lowest {
        return None;
    }
    Some((last.close - lowest) / (highest - lowest) * 100.0)
}
