// =============================================================================
// Wall-clock helpers for candle timing
// =============================================================================

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::market_data::MINUTE_MS;

/// Current time, epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Start of the next minute at or after `now_ms`.
pub fn next_minute_boundary(now_ms: i64) -> i64 {
    now_ms.div_euclid(MINUTE_MS) * MINUTE_MS
        + if now_ms.rem_euclid(MINUTE_MS) == 0 {
            0
        } else {
            MINUTE_MS
        }
}

/// Time left until the next candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

/// Countdown from `now_ms` to `target_ms`.
///
/// If the target has already passed, or is exactly now, counts down to the
/// next minute boundary after `now_ms`. A request landing on a boundary
/// therefore reads a full 60 s rather than 0 s.
pub fn countdown(target_ms: i64, now_ms: i64) -> Countdown {
    let mut remaining = target_ms - now_ms;
    if remaining <= 0 {
        remaining = next_minute_boundary(now_ms + 1) - now_ms;
    }

    let total_seconds = remaining / 1000;
    Countdown {
        minutes: total_seconds / 60,
        seconds: total_seconds % 60,
        total_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_rounds_up() {
        assert_eq!(next_minute_boundary(60_000), 60_000);
        assert_eq!(next_minute_boundary(60_001), 120_000);
        assert_eq!(next_minute_boundary(119_999), 120_000);
        assert_eq!(next_minute_boundary(0), 0);
    }

    #[test]
    fn countdown_to_future_target() {
        let c = countdown(180_000, 45_500);
        assert_eq!(c.total_seconds, 134);
        assert_eq!(c.minutes, 2);
        assert_eq!(c.seconds, 14);
    }

    #[test]
    fn passed_target_rolls_over() {
        let c = countdown(60_000, 75_000);
        assert_eq!(c.total_seconds, 45);
        assert_eq!(c.minutes, 0);

        // Exactly on a boundary counts a full minute, never zero.
        let c = countdown(60_000, 120_000);
        assert_eq!(c.total_seconds, 60);
        assert_eq!(c.minutes, 1);
        assert_eq!(c.seconds, 0);
    }
}
