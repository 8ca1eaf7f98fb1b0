// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================

use super::stats::{mean, tail};

/// Mean of the last `min(period, len)` prices.
///
/// Empty input or `period == 0` => 0.0. A series shorter than `period` is
/// averaged over every point it has.
pub fn calculate_sma(prices: &[f64], period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }
    mean(tail(prices, period))
}
