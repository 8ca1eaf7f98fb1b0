// =============================================================================
// Relative Strength Index (RSI) — trailing-window averages
// =============================================================================
//
// Step 1: Compute gains / losses for every consecutive pair of closes.
// Step 2: Average the LAST `period` gains and the LAST `period` losses
//          (plain mean, no Wilder smoothing).
// Step 3: RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

use super::stats::{clamp_finite, tail};

/// Neutral reading returned when there is not enough data.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Default look-back.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Compute the current RSI of `prices`.
///
/// # Edge cases
/// - `period == 0` or `prices.len() < period + 1` => 50.0
/// - average loss of zero => 100.0 (this includes a perfectly flat window)
/// - result is clamped to [0, 100]
pub fn calculate_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, change.abs())
            }
        })
        .unzip();

    let period_f = period as f64;
    let avg_gain = tail(&gains, period).iter().sum::<f64>() / period_f;
    let avg_loss = tail(&losses, period).iter().sum::<f64>() / period_f;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    clamp_finite(100.0 - 100.0 / (1.0 + rs), 0.0, 100.0, NEUTRAL_RSI)
}

/// Human-readable zone for an RSI reading.
pub fn rsi_zone(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "OVERBOUGHT"
    } else if rsi < 30.0 {
        "OVERSOLD"
    } else {
        "NEUTRAL"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert_eq!(calculate_rsi(&[], 14), 50.0);
    }

    #[test]
    fn rsi_period_zero() {
        assert_eq!(calculate_rsi(&[1.0, 2.0, 3.0], 0), 50.0);
    }

    #[test]
    fn rsi_insufficient_data_is_exactly_neutral() {
        for n in 0..=14 {
            let prices: Vec<f64> = (0..n).map(|x| 1.0 + x as f64 * 0.01).collect();
            assert_eq!(calculate_rsi(&prices, 14), 50.0, "len {n}");
        }
    }

    #[test]
    fn rsi_all_gains() {
        let prices: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        assert_eq!(calculate_rsi(&prices, 14), 100.0);
    }

    #[test]
    fn rsi_all_losses() {
        let prices: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        assert!(calculate_rsi(&prices, 14).abs() < 1e-10);
    }

    #[test]
    fn rsi_flat_market_is_hundred() {
        // No losses in the window, so the zero-loss rule applies.
        assert_eq!(calculate_rsi(&[1.0; 30], 14), 100.0);
    }

    #[test]
    fn rsi_only_uses_last_period_changes() {
        // Early crash followed by 14 equal up/down moves.
        let mut prices = vec![100.0, 50.0];
        for i in 0..14 {
            prices.push(if i % 2 == 0 { 51.0 } else { 50.0 });
        }
        let rsi = calculate_rsi(&prices, 14);
        assert!((rsi - 50.0).abs() < 1e-10, "got {rsi}");
    }

    #[test]
    fn rsi_range_check() {
        let prices = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let rsi = calculate_rsi(&prices, 14);
        assert!((0.0..=100.0).contains(&rsi), "RSI {rsi} out of range");
    }

    #[test]
    fn zone_labels() {
        assert_eq!(rsi_zone(75.0), "OVERBOUGHT");
        assert_eq!(rsi_zone(25.0), "OVERSOLD");
        assert_eq!(rsi_zone(50.0), "NEUTRAL");
    }
}
