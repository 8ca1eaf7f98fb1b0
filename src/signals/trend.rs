// =============================================================================
// Trend determination — six-vote majority with a margin of two
// =============================================================================
//
// Votes (ties vote for neither side):
//   1. EMA9  vs EMA21
//   2. EMA21 vs EMA50
//   3. SMA20 vs SMA50
//   4. MACD  vs signal line
//   5. sign of the percent change over the observed window
//   6. current price vs Bollinger middle band
//
// UP when up > down + 1, DOWN when down > up + 1, NEUTRAL otherwise. A bare
// majority of one is not enough.

use crate::indicators::IndicatorSet;
use crate::types::Trend;

/// Up / down vote tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendVotes {
    pub up: u8,
    pub down: u8,
}

impl TrendVotes {
    fn cast(&mut self, lhs: f64, rhs: f64) {
        if lhs > rhs {
            self.up += 1;
        } else if lhs < rhs {
            self.down += 1;
        }
    }

    pub fn trend(self) -> Trend {
        if self.up > self.down + 1 {
            Trend::Up
        } else if self.down > self.up + 1 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

/// Tally the six trend votes.
pub fn count_votes(
    indicators: &IndicatorSet,
    current_price: f64,
    price_change_percent: f64,
) -> TrendVotes {
    let mut votes = TrendVotes::default();
    votes.cast(indicators.ema.ema9, indicators.ema.ema21);
    votes.cast(indicators.ema.ema21, indicators.ema.ema50);
    votes.cast(indicators.sma.sma20, indicators.sma.sma50);
    votes.cast(indicators.macd.macd, indicators.macd.signal);
    votes.cast(price_change_percent, 0.0);
    votes.cast(current_price, indicators.bollinger.middle);
    votes
}

/// Reduce the six votes to a trend call.
pub fn determine_trend(
    indicators: &IndicatorSet,
    current_price: f64,
    price_change_percent: f64,
) -> Trend {
    count_votes(indicators, current_price, price_change_percent).trend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerResult, EmaSet, MacdResult, SmaSet, StochasticResult};

    fn flat_set(value: f64) -> IndicatorSet {
        IndicatorSet {
            rsi: 50.0,
            macd: MacdResult::default(),
            bollinger: BollingerResult {
                upper: value,
                middle: value,
                lower: value,
            },
            ema: EmaSet {
                ema9: value,
                ema21: value,
                ema50: value,
            },
            sma: SmaSet {
                sma20: value,
                sma50: value,
            },
            adx: 25.0,
            stochastic: StochasticResult::NEUTRAL,
        }
    }

    #[test]
    fn all_ties_is_neutral() {
        let set = flat_set(1.0);
        assert_eq!(count_votes(&set, 1.0, 0.0), TrendVotes::default());
        assert_eq!(determine_trend(&set, 1.0, 0.0), Trend::Neutral);
    }

    #[test]
    fn margin_of_one_is_not_enough() {
        let mut set = flat_set(1.0);
        set.ema.ema9 = 1.1; // up
        set.sma.sma20 = 1.1; // up
        set.macd.signal = 0.5; // down (macd 0 < 0.5)
        let votes = count_votes(&set, 1.0, 0.0);
        assert_eq!(votes, TrendVotes { up: 2, down: 1 });
        assert_eq!(votes.trend(), Trend::Neutral);
    }

    #[test]
    fn margin_of_two_is_up() {
        let mut set = flat_set(1.0);
        set.ema.ema9 = 1.1;
        set.sma.sma20 = 1.1;
        assert_eq!(determine_trend(&set, 1.0, 0.0), Trend::Up);
    }

    #[test]
    fn price_votes_go_down() {
        let set = flat_set(1.0);
        // negative change + price below middle
        assert_eq!(determine_trend(&set, 0.9, -2.0), Trend::Down);
    }
}
