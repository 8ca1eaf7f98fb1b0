// =============================================================================
// CurrencyLayer market data gateway
// =============================================================================

pub mod client;
pub mod wire;

pub use client::{
    derive_cross_rate, describe_error, ApiStatus, CurrencyLayerClient, GatewayError, MarketData,
};
