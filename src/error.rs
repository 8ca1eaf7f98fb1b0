use thiserror::Error;

/// Terminal failures of a single market analysis.
///
/// Indicator math never fails; these are raised only by the orchestration
/// layer before any indicator runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid currency pair '{0}'. Expected format: BASE/QUOTE (e.g., EUR/USD)")]
    InvalidPair(String),

    #[error("Unable to get current price for {pair} (quote key {key})")]
    MissingRate { pair: String, key: String },

    #[error("Insufficient historical data for analysis: {points} price point(s), need at least 2")]
    InsufficientData { points: usize },
}
