// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices than the SMA.
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The recursion is seeded with the SMA of the first `period` closes and then
// walks every later close in order. Moving the seed changes the output, so
// callers that compare against stored values depend on this exact shape.
// =============================================================================

use super::sma::calculate_sma;

/// Compute the final EMA value of `prices` for the given look-back `period`.
///
/// # Edge cases
/// - empty input or `period == 0` => 0.0
/// - `prices.len() < period` => SMA over every available point
/// - a non-finite step stops the recursion at the last finite value
pub fn calculate_ema(prices: &[f64], period: usize) -> f64 {
    if prices.is_empty() || period == 0 {
        return 0.0;
    }
    if prices.len() < period {
        return calculate_sma(prices, prices.len());
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let mut ema = prices[..period].iter().sum::<f64>() / period as f64;
    if !ema.is_finite() {
        return 0.0;
    }

    for &price in &prices[period..] {
        let next = price * multiplier + ema * (1.0 - multiplier);
        if !next.is_finite() {
            break;
        }
        ema = next;
    }

    ema
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert_eq!(calculate_ema(&[], 5), 0.0);
    }

    #[test]
    fn ema_period_zero() {
        assert_eq!(calculate_ema(&[1.0, 2.0, 3.0], 0), 0.0);
    }

    #[test]
    fn ema_short_series_equals_sma_of_all() {
        let prices = [1.1, 1.2, 1.3, 1.25];
        assert_eq!(calculate_ema(&prices, 9), calculate_sma(&prices, prices.len()));
    }

    #[test]
    fn ema_period_equals_length() {
        // Only the seed: (2+4+6)/3.
        let ema = calculate_ema(&[2.0, 4.0, 6.0], 3);
        assert!((ema - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of 1..=10, seeded with SMA(1..=5) = 3.0.
        let prices: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        for &p in &prices[5..] {
            expected = p * mult + expected * (1.0 - mult);
        }
        assert!((calculate_ema(&prices, 5) - expected).abs() < 1e-10);
    }

    #[test]
    fn ema_seed_comes_from_first_window() {
        // Seeding from the last window instead would give a different value.
        let prices = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        let mult = 2.0 / 4.0;
        let mut expected = 10.0;
        for &p in &prices[3..] {
            expected = p * mult + expected * (1.0 - mult);
        }
        let got = calculate_ema(&prices, 3);
        assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
        assert!((got - 18.75).abs() < 1e-12);
    }

    #[test]
    fn ema_handles_nan_in_input() {
        let prices = [1.0, 2.0, 3.0, f64::NAN, 5.0];
        // Seed 2.0, then NaN stops the recursion.
        assert!((calculate_ema(&prices, 3) - 2.0).abs() < 1e-12);
    }
}
