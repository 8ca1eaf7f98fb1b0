// =============================================================================
// FX Signal Engine
// =============================================================================
//
// Technical-analysis signals for FX pairs:
//   indicators   pure indicator math over synthetic candles
//   signals      trend, confirmations, signal/confidence synthesis
//   analyzer     snapshot -> TradingSignal orchestration
//   currencylayer  live + historical rate gateway
//   api          axum REST surface
// =============================================================================

pub mod analyzer;
pub mod api;
pub mod app_state;
pub mod clock;
pub mod currencylayer;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use analyzer::{MarketAnalyzer, RateSnapshot, TradingSignal};
pub use error::AnalysisError;
pub use types::{CurrencyPair, Signal, Trend};
