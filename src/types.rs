// =============================================================================
// Shared types used across the FX signal engine
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Directional recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
}

impl Default for Signal {
    fn default() -> Self {
        Self::Buy
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Trend call (also used for the weekend-direction guess).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Default for Trend {
    fn default() -> Self {
        Self::Neutral
    }
}

impl Trend {
    /// Direction a trend implies on its own. NEUTRAL leans BUY.
    pub fn implied_signal(self) -> Signal {
        match self {
            Self::Down => Signal::Sell,
            Self::Up | Self::Neutral => Signal::Buy,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// A `BASE/QUOTE` currency pair, e.g. EUR/USD (1 EUR = x USD).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Parse `"BASE/QUOTE"`. Whitespace is trimmed and codes are upper-cased.
    pub fn parse(raw: &str) -> Result<Self, AnalysisError> {
        let invalid = || AnalysisError::InvalidPair(raw.to_string());

        let (base, quote) = raw.split_once('/').ok_or_else(invalid)?;
        let base = base.trim().to_uppercase();
        let quote = quote.trim().to_uppercase();

        if base.is_empty() || quote.is_empty() || quote.contains('/') {
            return Err(invalid());
        }
        Ok(Self { base, quote })
    }

    /// Quote-map key for a snapshot denominated in `source`.
    pub fn quote_key(&self, source: &str) -> String {
        format!("{}{}", source, self.quote)
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl std::str::FromStr for CurrencyPair {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
