// =============================================================================
// Weekend direction — short-horizon momentum gated by trend strength
// =============================================================================

use crate::types::Trend;

/// How far back (in price points) momentum is measured.
pub const MOMENTUM_LOOKBACK: usize = 5;

/// ADX above which the trend is considered strong enough to carry over.
pub const WEEKEND_ADX_THRESHOLD: f64 = 30.0;

/// Guess which way the pair drifts over the weekend gap.
///
/// Momentum is the last price minus the price `MOMENTUM_LOOKBACK` points back
/// (or the first price on a shorter series). The trend is only projected
/// forward when momentum agrees with it and ADX exceeds 30.
pub fn predict_weekend_direction(trend: Trend, adx: f64, prices: &[f64]) -> Trend {
    let Some(&last) = prices.last() else {
        return Trend::Neutral;
    };
    let anchor = prices[prices.len().saturating_sub(MOMENTUM_LOOKBACK)];
    let momentum = last - anchor;

    match trend {
        Trend::Up if momentum > 0.0 && adx > WEEKEND_ADX_THRESHOLD => Trend::Up,
        Trend::Down if momentum < 0.0 && adx > WEEKEND_ADX_THRESHOLD => Trend::Down,
        _ => Trend::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_up_momentum_carries() {
        let prices = [1.0, 1.01, 1.02, 1.03, 1.04, 1.05];
        assert_eq!(predict_weekend_direction(Trend::Up, 35.0, &prices), Trend::Up);
    }

    #[test]
    fn weak_adx_is_neutral() {
        let prices = [1.0, 1.01, 1.02, 1.03, 1.04, 1.05];
        assert_eq!(predict_weekend_direction(Trend::Up, 30.0, &prices), Trend::Neutral);
    }

    #[test]
    fn momentum_must_agree_with_trend() {
        let falling = [1.05, 1.04, 1.03, 1.02, 1.01, 1.0];
        assert_eq!(predict_weekend_direction(Trend::Down, 40.0, &falling), Trend::Down);
        assert_eq!(predict_weekend_direction(Trend::Up, 40.0, &falling), Trend::Neutral);
        assert_eq!(predict_weekend_direction(Trend::Neutral, 40.0, &falling), Trend::Neutral);
    }

    #[test]
    fn anchor_is_five_back() {
        // Index n-5 = 1 (1.10) vs last 1.09: momentum negative despite the
        // overall rise from index 0.
        let prices = [1.00, 1.10, 1.12, 1.11, 1.10, 1.09];
        assert_eq!(predict_weekend_direction(Trend::Up, 50.0, &prices), Trend::Neutral);
        assert_eq!(predict_weekend_direction(Trend::Down, 50.0, &prices), Trend::Down);
    }

    #[test]
    fn short_and_empty_series() {
        assert_eq!(predict_weekend_direction(Trend::Up, 50.0, &[]), Trend::Neutral);
        assert_eq!(predict_weekend_direction(Trend::Up, 50.0, &[1.0, 1.2]), Trend::Up);
        assert_eq!(predict_weekend_direction(Trend::Up, 50.0, &[1.0]), Trend::Neutral);
    }
}
