// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band is the SMA of the last `period` closes; upper and lower sit
// `num_std` population standard deviations above and below it. With fewer
// than `period` closes the bands collapse onto the SMA of everything seen.

use serde::{Deserialize, Serialize};

use super::sma::calculate_sma;
use super::stats::{population_std_dev, tail};

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_STD: f64 = 2.0;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerResult {
    fn flat(value: f64) -> Self {
        Self {
            upper: value,
            middle: value,
            lower: value,
        }
    }
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `closes.len() < period` (or `period == 0`) => all three bands equal the
///   SMA of every close (0.0 for empty input)
/// - otherwise `upper = middle + num_std * σ`, `lower = middle - num_std * σ`
///   with σ the population standard deviation of the window
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerResult {
    if period == 0 || closes.len() < period {
        return BollingerResult::flat(calculate_sma(closes, closes.len()));
    }

    let middle = calculate_sma(closes, period);
    let std_dev = population_std_dev(tail(closes, period), middle);
    if !std_dev.is_finite() {
        return BollingerResult::flat(middle);
    }

    let spread = num_std.abs() * std_dev;
    BollingerResult {
        upper: middle + spread,
        middle,
        lower: middle - spread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!((bb.middle - 10.5).abs() < 1e-12);
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!(((bb.upper - bb.middle) - (bb.middle - bb.lower)).abs() < 1e-12);
    }

    #[test]
    fn bollinger_insufficient_data_is_flat_sma() {
        let closes = [1.10, 1.12, 1.11, 1.15, 1.20];
        let bb = calculate_bollinger(&closes, 20, 2.0);
        let sma = calculate_sma(&closes, closes.len());
        assert_eq!(bb.upper, sma);
        assert_eq!(bb.middle, sma);
        assert_eq!(bb.lower, sma);
    }

    #[test]
    fn bollinger_empty_is_zero() {
        assert_eq!(calculate_bollinger(&[], 20, 2.0), BollingerResult::default());
    }

    #[test]
    fn bollinger_flat_has_zero_width() {
        let bb = calculate_bollinger(&[100.0; 20], 20, 2.0);
        assert_eq!(bb.upper, bb.lower);
    }

    #[test]
    fn bollinger_bands_are_ordered() {
        let closes: Vec<f64> = (0..45).map(|i| 1.3 + (i as f64 * 0.4).cos() * 0.02).collect();
        for n in 1..=closes.len() {
            let bb = calculate_bollinger(&closes[..n], 20, 2.0);
            assert!(bb.upper >= bb.middle && bb.middle >= bb.lower, "len {n}: {bb:?}");
        }
    }
}
