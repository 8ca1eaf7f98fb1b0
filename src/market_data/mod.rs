// =============================================================================
// Market Data Module
// =============================================================================
//
// Price points and the synthetic OHLC candles the indicators run on.

pub mod candle;

pub use candle::{closes, synthesize_candles, synthesize_candles_at, Candle, PricePoint, MINUTE_MS};
