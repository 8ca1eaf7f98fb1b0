// =============================================================================
// Signal Synthesizer — direction, confidence and narrative
// =============================================================================
//
// Branches on how many of the seven confirmations fired:
//
//   count < 4  (weak)   signal follows the trend, confidence = 40 + 5 * count
//   count >= 4 (strong) confidence = 50 + 8 * count, then
//                         RSI < 30  => BUY  +10 (oversold beats the trend)
//                         RSI > 70  => SELL +10 (overbought beats the trend)
//                         otherwise => follow the trend
//                       +5 histogram agrees with the signal
//                       +8 ADX > 40, else +4 ADX > 25
//                       +7 BUY below the lower band / SELL above the upper
//                       clamped to [60, 95]
//
// Weak confidence tops out at 55 and strong bottoms out at 60, so the two
// ranges never overlap.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::rsi::rsi_zone;
use crate::indicators::IndicatorSet;
use crate::types::{Signal, Trend};

use super::confirmations::{Confirmations, TOTAL_CONFIRMATIONS};

/// Confirmations needed before the strong path is taken.
pub const STRONG_THRESHOLD: usize = 4;

const STRONG_MIN_CONFIDENCE: f64 = 60.0;
const STRONG_MAX_CONFIDENCE: f64 = 95.0;

/// Direction, confidence and rationale for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub signal: Signal,
    pub confidence: f64,
    pub analysis: String,
}

/// Derive the signal, confidence and narrative.
pub fn synthesize(
    indicators: &IndicatorSet,
    trend: Trend,
    confirmations: &Confirmations,
    current_price: f64,
) -> SignalDecision {
    let count = confirmations.count();

    let mut decision = if count < STRONG_THRESHOLD {
        weak_signal(trend, confirmations, count)
    } else {
        strong_signal(indicators, trend, confirmations, count, current_price)
    };

    decision.confidence = decision.confidence.clamp(0.0, 100.0);
    decision
}

fn weak_signal(trend: Trend, confirmations: &Confirmations, count: usize) -> SignalDecision {
    let confidence = 40.0 + 5.0 * count as f64;
    let active: Vec<&str> = confirmations.active().iter().map(|k| k.label()).collect();
    let active = if active.is_empty() {
        "None".to_string()
    } else {
        active.join(", ")
    };

    SignalDecision {
        signal: trend.implied_signal(),
        confidence,
        analysis: format!(
            "Weak signal. Only {count}/{TOTAL_CONFIRMATIONS} confirmations. Active indicators: {active}"
        ),
    }
}

fn strong_signal(
    indicators: &IndicatorSet,
    trend: Trend,
    confirmations: &Confirmations,
    count: usize,
    current_price: f64,
) -> SignalDecision {
    let mut confidence = 50.0 + 8.0 * count as f64;

    let signal = if indicators.rsi < 30.0 {
        confidence += 10.0;
        Signal::Buy
    } else if indicators.rsi > 70.0 {
        confidence += 10.0;
        Signal::Sell
    } else {
        trend.implied_signal()
    };

    let histogram = indicators.macd.histogram;
    if (histogram > 0.0 && signal == Signal::Buy) || (histogram < 0.0 && signal == Signal::Sell) {
        confidence += 5.0;
    }

    if indicators.adx > 40.0 {
        confidence += 8.0;
    } else if indicators.adx > 25.0 {
        confidence += 4.0;
    }

    let bb = &indicators.bollinger;
    if (signal == Signal::Buy && current_price < bb.lower)
        || (signal == Signal::Sell && current_price > bb.upper)
    {
        confidence += 7.0;
    }

    let confidence = confidence.clamp(STRONG_MIN_CONFIDENCE, STRONG_MAX_CONFIDENCE);

    SignalDecision {
        signal,
        confidence,
        analysis: strong_narrative(indicators, confirmations, count, signal, confidence),
    }
}

fn strong_narrative(
    indicators: &IndicatorSet,
    confirmations: &Confirmations,
    count: usize,
    signal: Signal,
    confidence: f64,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(7);

    parts.push(format!(
        "Strong {signal} signal with {count}/{TOTAL_CONFIRMATIONS} confirmations."
    ));

    parts.push(match rsi_zone(indicators.rsi) {
        "OVERSOLD" => "RSI indicates oversold condition (strong BUY opportunity).".to_string(),
        "OVERBOUGHT" => "RSI indicates overbought condition (strong SELL opportunity).".to_string(),
        _ => format!("RSI at {:.1} (neutral zone).", indicators.rsi),
    });

    parts.push(if indicators.macd.histogram > 0.0 {
        "MACD shows bullish momentum.".to_string()
    } else {
        "MACD shows bearish momentum.".to_string()
    });

    if indicators.adx > 40.0 {
        parts.push("Strong trend detected (ADX > 40).".to_string());
    } else if indicators.adx > 25.0 {
        parts.push("Moderate trend strength (ADX > 25).".to_string());
    }

    if confirmations.ema {
        parts.push("EMA alignment confirms trend direction.".to_string());
    }
    if confirmations.bollinger {
        parts.push("Price position within Bollinger Bands supports signal.".to_string());
    }

    parts.push(format!(
        "Confidence: {confidence:.0}% based on technical analysis."
    ));

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerResult, EmaSet, MacdResult, SmaSet, StochasticResult};

    fn set(rsi: f64, histogram: f64, adx: f64) -> IndicatorSet {
        IndicatorSet {
            rsi,
            macd: MacdResult {
                macd: histogram,
                signal: 0.0,
                histogram,
            },
            bollinger: BollingerResult {
                upper: 1.2,
                middle: 1.1,
                lower: 1.0,
            },
            ema: EmaSet::default(),
            sma: SmaSet::default(),
            adx,
            stochastic: StochasticResult::NEUTRAL,
        }
    }

    fn with_count(n: usize) -> Confirmations {
        let mut c = Confirmations::default();
        let slots = [
            &mut c.rsi,
            &mut c.macd,
            &mut c.bollinger,
            &mut c.ema,
            &mut c.adx,
            &mut c.stochastic,
            &mut c.trend,
        ];
        for slot in slots.into_iter().take(n) {
            *slot = true;
        }
        c
    }

    #[test]
    fn weak_confidence_ladder() {
        let indicators = set(50.0, 0.0, 20.0);
        for (count, expected) in [(0, 40.0), (1, 45.0), (2, 50.0), (3, 55.0)] {
            let d = synthesize(&indicators, Trend::Up, &with_count(count), 1.1);
            assert!(count < STRONG_THRESHOLD);
            assert_eq!(d.confidence, expected);
            assert!(d.analysis.starts_with("Weak signal."));
        }
    }

    #[test]
    fn weak_signal_follows_trend() {
        let indicators = set(50.0, 0.0, 20.0);
        let c = with_count(1);
        assert_eq!(synthesize(&indicators, Trend::Up, &c, 1.1).signal, Signal::Buy);
        assert_eq!(synthesize(&indicators, Trend::Down, &c, 1.1).signal, Signal::Sell);
        assert_eq!(synthesize(&indicators, Trend::Neutral, &c, 1.1).signal, Signal::Buy);
    }

    #[test]
    fn weak_narrative_lists_active() {
        let indicators = set(50.0, 0.0, 20.0);
        let none = synthesize(&indicators, Trend::Neutral, &with_count(0), 1.1);
        assert!(none.analysis.ends_with("Active indicators: None"));

        let c = Confirmations {
            macd: true,
            adx: true,
            ..Default::default()
        };
        let two = synthesize(&indicators, Trend::Neutral, &c, 1.1);
        assert!(two.analysis.contains("Only 2/7 confirmations"));
        assert!(two.analysis.ends_with("Active indicators: MACD, ADX"));
    }

    #[test]
    fn strong_base_confidence() {
        // 4 confirmations, neutral RSI, no histogram, weak ADX, price mid-band.
        let d = synthesize(&set(50.0, 0.0, 20.0), Trend::Down, &with_count(4), 1.1);
        assert!(d.analysis.starts_with("Strong SELL signal with 4/7"));
        assert_eq!(d.signal, Signal::Sell);
        assert_eq!(d.confidence, 82.0);
    }

    #[test]
    fn oversold_overrides_down_trend() {
        let d = synthesize(&set(25.0, 0.0, 20.0), Trend::Down, &with_count(4), 1.1);
        assert_eq!(d.signal, Signal::Buy);
        assert_eq!(d.confidence, 92.0);
        assert!(d.analysis.contains("oversold"));
    }

    #[test]
    fn overbought_overrides_up_trend() {
        let d = synthesize(&set(75.0, 0.0, 20.0), Trend::Up, &with_count(4), 1.1);
        assert_eq!(d.signal, Signal::Sell);
        assert!(d.analysis.contains("overbought"));
    }

    #[test]
    fn strong_bonuses_are_clamped() {
        // 50 + 56 + 5 + 8 + 7 = 126 -> 95.
        let d = synthesize(&set(50.0, 0.01, 45.0), Trend::Up, &with_count(7), 0.9);
        assert_eq!(d.signal, Signal::Buy);
        assert_eq!(d.confidence, 95.0);
        assert!(d.analysis.contains("Strong trend detected (ADX > 40)."));
        assert!(d.analysis.contains("Confidence: 95%"));
    }

    #[test]
    fn moderate_adx_and_band_callouts() {
        let c = Confirmations {
            rsi: true,
            ema: true,
            bollinger: true,
            trend: true,
            ..Default::default()
        };
        let d = synthesize(&set(55.0, -0.01, 30.0), Trend::Down, &c, 1.05);
        assert!(d.analysis.starts_with("Strong SELL signal with 4/7 confirmations."));
        assert!(d.analysis.contains("RSI at 55.0 (neutral zone)."));
        assert!(d.analysis.contains("MACD shows bearish momentum."));
        assert!(d.analysis.contains("Moderate trend strength (ADX > 25)."));
        assert!(d.analysis.contains("EMA alignment confirms trend direction."));
        assert!(d.analysis.contains("Bollinger Bands supports signal."));
        // 50 + 32 + 5 (hist < 0 on SELL) + 4 (adx 30) = 91
        assert_eq!(d.confidence, 91.0);
    }

    #[test]
    fn strong_confidence_always_in_band() {
        for count in STRONG_THRESHOLD..=TOTAL_CONFIRMATIONS {
            for rsi in [10.0, 50.0, 90.0] {
                for adx in [0.0, 30.0, 60.0] {
                    for hist in [-1.0, 0.0, 1.0] {
                        for price in [0.5, 1.1, 1.5] {
                            for trend in [Trend::Up, Trend::Down, Trend::Neutral] {
                                let d = synthesize(&set(rsi, hist, adx), trend, &with_count(count), price);
                                assert!((60.0..=95.0).contains(&d.confidence));
                            }
                        }
                    }
                }
            }
        }
    }
}
