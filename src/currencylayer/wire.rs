// =============================================================================
// CurrencyLayer wire format
// =============================================================================
//
// Both `/live` and `/historical` answer with the same envelope:
//
//   { "success": true, "timestamp": 1700000000, "source": "USD",
//     "quotes": { "USDEUR": 0.92, ... } }
//
//   { "success": false, "error": { "code": 101, "info": "..." } }
//
// The provider has sent `code` both as a number and as a string, so it is
// normalised to a string on the way in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::RateSnapshot;

/// Raw `/live` or `/historical` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub quotes: HashMap<String, f64>,
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

/// The `error` object of a failed response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderErrorBody {
    #[serde(default, deserialize_with = "code_as_string::deserialize")]
    pub code: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl From<RatesResponse> for RateSnapshot {
    fn from(resp: RatesResponse) -> Self {
        RateSnapshot {
            timestamp: resp.timestamp,
            source: resp.source,
            quotes: resp.quotes,
        }
    }
}

/// Accepts `101`, `"101"` or null for an error code.
mod code_as_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Num(i64),
        Str(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
            Code::Num(n) => n.to_string(),
            Code::Str(s) => s,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_live_success() {
        let body = r#"{
            "success": true,
            "terms": "https://currencylayer.com/terms",
            "privacy": "https://currencylayer.com/privacy",
            "timestamp": 1700000000,
            "source": "EUR",
            "quotes": { "EURUSD": 1.0871, "EURGBP": 0.8712 }
        }"#;
        let resp: RatesResponse = serde_json::from_str(body).unwrap();
        assert!(resp.success);
        assert!(resp.error.is_none());

        let snap = RateSnapshot::from(resp);
        assert_eq!(snap.timestamp, 1_700_000_000);
        assert_eq!(snap.source, "EUR");
        assert_eq!(snap.rate("EURUSD"), Some(1.0871));
    }

    #[test]
    fn decode_historical_with_date() {
        let body = r#"{"success":true,"historical":true,"date":"2024-03-01",
            "timestamp":1709337599,"source":"USD","quotes":{"USDJPY":150.1}}"#;
        let resp: RatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.date.as_deref(), Some("2024-03-01"));
        assert_eq!(resp.quotes["USDJPY"], 150.1);
    }

    #[test]
    fn decode_error_numeric_code() {
        let body = r#"{"success":false,"error":{"code":101,"type":"invalid_access_key",
            "info":"You have not supplied a valid API Access Key."}}"#;
        let resp: RatesResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.success);
        assert!(resp.quotes.is_empty());
        let err = resp.error.unwrap();
        assert_eq!(err.code.as_deref(), Some("101"));
        assert!(err.info.unwrap().contains("Access Key"));
    }

    #[test]
    fn decode_error_string_code() {
        let body = r#"{"success":false,"error":{"code":"104"}}"#;
        let resp: RatesResponse = serde_json::from_str(body).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code.as_deref(), Some("104"));
        assert!(err.info.is_none());
    }
}
