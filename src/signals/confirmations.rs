// =============================================================================
// Indicator confirmations
// =============================================================================
//
// Seven fixed yes/no votes on whether each indicator agrees with the trend
// call. Bullish conditions apply to an UP trend; DOWN and NEUTRAL both use
// the bearish conditions.
//
// | key        | UP                         | DOWN / NEUTRAL             |
// |------------|----------------------------|----------------------------|
// | rsi        | 40 < rsi < 70              | 30 < rsi < 60              |
// | macd       | macd > signal, hist > 0    | macd < signal, hist < 0    |
// | bollinger  | middle < price < upper     | lower < price < middle     |
// | ema        | ema9 > ema21 > ema50       | ema9 < ema21 < ema50       |
// | adx        | adx > 25                   | adx > 25                   |
// | stochastic | k > 50, k > d              | k < 50, k < d              |
// | trend      | trend != NEUTRAL           | trend != NEUTRAL           |

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSet;
use crate::types::Trend;

pub const TOTAL_CONFIRMATIONS: usize = 7;

/// The seven confirmation slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationKind {
    Rsi,
    Macd,
    Bollinger,
    Ema,
    Adx,
    Stochastic,
    Trend,
}

impl ConfirmationKind {
    pub const ALL: [ConfirmationKind; TOTAL_CONFIRMATIONS] = [
        Self::Rsi,
        Self::Macd,
        Self::Bollinger,
        Self::Ema,
        Self::Adx,
        Self::Stochastic,
        Self::Trend,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::Bollinger => "Bollinger",
            Self::Ema => "EMA",
            Self::Adx => "ADX",
            Self::Stochastic => "Stochastic",
            Self::Trend => "Trend",
        }
    }
}

impl std::fmt::Display for ConfirmationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which indicators agree with the trend call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmations {
    pub rsi: bool,
    pub macd: bool,
    pub bollinger: bool,
    pub ema: bool,
    pub adx: bool,
    pub stochastic: bool,
    pub trend: bool,
}

impl Confirmations {
    pub fn get(&self, kind: ConfirmationKind) -> bool {
        match kind {
            ConfirmationKind::Rsi => self.rsi,
            ConfirmationKind::Macd => self.macd,
            ConfirmationKind::Bollinger => self.bollinger,
            ConfirmationKind::Ema => self.ema,
            ConfirmationKind::Adx => self.adx,
            ConfirmationKind::Stochastic => self.stochastic,
            ConfirmationKind::Trend => self.trend,
        }
    }

    /// `(kind, confirmed)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfirmationKind, bool)> + '_ {
        ConfirmationKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Kinds that fired, in display order.
    pub fn active(&self) -> Vec<ConfirmationKind> {
        self.iter().filter(|(_, on)| *on).map(|(k, _)| k).collect()
    }

    /// Number of confirmations that fired, 0..=7.
    pub fn count(&self) -> usize {
        self.iter().filter(|(_, on)| *on).count()
    }
}

/// Evaluate all seven confirmations against `trend`.
pub fn evaluate(indicators: &IndicatorSet, trend: Trend, current_price: f64) -> Confirmations {
    let rsi = indicators.rsi;
    let macd = &indicators.macd;
    let bb = &indicators.bollinger;
    let ema = &indicators.ema;
    let stoch = &indicators.stochastic;

    let bullish = trend == Trend::Up;

    if bullish {
        Confirmations {
            rsi: rsi > 40.0 && rsi < 70.0,
            macd: macd.macd > macd.signal && macd.histogram > 0.0,
            bollinger: current_price > bb.middle && current_price < bb.upper,
            ema: ema.ema9 > ema.ema21 && ema.ema21 > ema.ema50,
            adx: indicators.adx > 25.0,
            stochastic: stoch.k > 50.0 && stoch.k > stoch.d,
            trend: trend != Trend::Neutral,
        }
    } else {
        Confirmations {
            rsi: rsi > 30.0 && rsi < 60.0,
            macd: macd.macd < macd.signal && macd.histogram < 0.0,
            bollinger: current_price < bb.middle && current_price > bb.lower,
            ema: ema.ema9 < ema.ema21 && ema.ema21 < ema.ema50,
            adx: indicators.adx > 25.0,
            stochastic: stoch.k < 50.0 && stoch.k < stoch.d,
            trend: trend != Trend::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerResult, EmaSet, MacdResult, SmaSet, StochasticResult};

    fn bearish_set() -> IndicatorSet {
        IndicatorSet {
            rsi: 45.0,
            macd: MacdResult {
                macd: -0.002,
                signal: -0.001,
                histogram: -0.001,
            },
            bollinger: BollingerResult {
                upper: 1.12,
                middle: 1.10,
                lower: 1.08,
            },
            ema: EmaSet {
                ema9: 1.09,
                ema21: 1.10,
                ema50: 1.11,
            },
            sma: SmaSet {
                sma20: 1.10,
                sma50: 1.11,
            },
            adx: 30.0,
            stochastic: StochasticResult { k: 20.0, d: 30.0 },
        }
    }

    #[test]
    fn down_trend_all_confirm() {
        let c = evaluate(&bearish_set(), Trend::Down, 1.09);
        assert_eq!(c.count(), 7);
    }

    #[test]
    fn up_trend_rejects_bearish_readings() {
        let c = evaluate(&bearish_set(), Trend::Up, 1.09);
        assert!(c.rsi); // 45 is inside both bands
        assert!(!c.macd);
        assert!(!c.bollinger);
        assert!(!c.ema);
        assert!(c.adx);
        assert!(!c.stochastic);
        assert!(c.trend);
        assert_eq!(c.count(), 3);
    }

    #[test]
    fn neutral_uses_bearish_conditions() {
        // NEUTRAL shares the DOWN branch; only the trend slot differs.
        let set = bearish_set();
        let neutral = evaluate(&set, Trend::Neutral, 1.09);
        let down = evaluate(&set, Trend::Down, 1.09);
        assert_eq!(
            Confirmations {
                trend: true,
                ..neutral
            },
            down
        );
        assert!(!neutral.trend);
        assert_eq!(neutral.count(), 6);
    }

    #[test]
    fn adx_is_trend_independent() {
        let mut set = bearish_set();
        set.adx = 25.0;
        for trend in [Trend::Up, Trend::Down, Trend::Neutral] {
            assert!(!evaluate(&set, trend, 1.09).adx);
        }
    }

    #[test]
    fn iteration_order_and_active() {
        let c = Confirmations {
            macd: true,
            trend: true,
            ..Default::default()
        };
        let kinds: Vec<_> = c.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, ConfirmationKind::ALL.to_vec());
        assert_eq!(c.active(), vec![ConfirmationKind::Macd, ConfirmationKind::Trend]);
        assert_eq!(c.count(), 2);
    }
}
