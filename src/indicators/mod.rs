// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators behind
// the signal synthesizer. None of them can fail: with too little data each
// one degrades to a fixed neutral reading (RSI 50, ADX 25, MACD zeros, flat
// Bollinger bands, stochastic 50/50) so that the synthesizer always receives
// a complete `IndicatorSet`.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stats;
pub mod stochastic;

use serde::{Deserialize, Serialize};

use crate::market_data::{closes, Candle};

pub use bollinger::BollingerResult;
pub use macd::MacdResult;
pub use stochastic::StochasticResult;

/// EMA stack used for trend and alignment checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmaSet {
    pub ema9: f64,
    pub ema21: f64,
    pub ema50: f64,
}

/// SMA pair used for the trend vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmaSet {
    pub sma20: f64,
    pub sma50: f64,
}

/// Snapshot of every indicator for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdResult,
    pub bollinger: BollingerResult,
    pub ema: EmaSet,
    pub sma: SmaSet,
    pub adx: f64,
    pub stochastic: StochasticResult,
}

/// Compute every indicator from one candle sequence.
///
/// All price-based indicators run on the candle closes. `_prices` is the raw
/// series the candles were built from; it is accepted so callers can pass
/// both without caring which one an indicator reads.
pub fn compute_all(candles: &[Candle], _prices: &[f64]) -> IndicatorSet {
    let closes = closes(candles);

    IndicatorSet {
        rsi: rsi::calculate_rsi(&closes, rsi::DEFAULT_RSI_PERIOD),
        macd: macd::calculate_macd(&closes),
        bollinger: bollinger::calculate_bollinger(
            &closes,
            bollinger::DEFAULT_BOLLINGER_PERIOD,
            bollinger::DEFAULT_BOLLINGER_STD,
        ),
        ema: EmaSet {
            ema9: ema::calculate_ema(&closes, 9),
            ema21: ema::calculate_ema(&closes, 21),
            ema50: ema::calculate_ema(&closes, 50),
        },
        sma: SmaSet {
            sma20: sma::calculate_sma(&closes, 20),
            sma50: sma::calculate_sma(&closes, 50),
        },
        adx: adx::calculate_adx(candles, adx::DEFAULT_ADX_PERIOD),
        stochastic: stochastic::calculate_stochastic(
            candles,
            stochastic::DEFAULT_STOCHASTIC_PERIOD,
        ),
    }
}
