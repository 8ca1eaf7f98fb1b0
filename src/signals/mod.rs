// =============================================================================
// Signals Module
// =============================================================================
//
// Turns an `IndicatorSet` into a trading call:
// - Trend determination (six-vote majority)
// - Seven indicator confirmations against the trend
// - Signal / confidence / narrative synthesis
// - Weekend direction guess

pub mod confirmations;
pub mod synthesizer;
pub mod trend;
pub mod weekend;

pub use confirmations::{evaluate as evaluate_confirmations, ConfirmationKind, Confirmations};
pub use synthesizer::{synthesize, SignalDecision};
pub use trend::{determine_trend, TrendVotes};
pub use weekend::predict_weekend_direction;
