// =============================================================================
// Average Directional Index (ADX) — single-window DX
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM, -DM and True Range for every bar-to-bar transition.
//   2. Take the plain mean of the LAST `period` values of each.
//   3. +DI = avg(+DM) / avg(TR) * 100
//      -DI = avg(-DM) / avg(TR) * 100
//   4. DX  = |+DI - -DI| / (+DI + -DI) * 100
//
// The DX of that one window is reported as the ADX; there is no second
// Wilder pass over a DX series. Readings therefore move faster than a
// textbook ADX.
//
// Interpretation:
//   ADX > 40  => strong trend
//   ADX > 25  => trending market
// =============================================================================

use crate::market_data::Candle;

use super::stats::{clamp_finite, mean, tail};

/// Reading returned when there is not enough data (or no range at all).
pub const DEFAULT_ADX: f64 = 25.0;

pub const DEFAULT_ADX_PERIOD: usize = 14;

/// Compute the current ADX value from a slice of candles (oldest first).
///
/// Returns 25.0 when:
/// - `period` is zero.
/// - There are fewer than `period + 1` candles.
/// - The average true range of the window is zero.
///
/// Returns 0.0 when the window has range but no directional movement.
pub fn calculate_adx(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return DEFAULT_ADX;
    }

    // ------------------------------------------------------------------
    // Step 1: Raw +DM, -DM, and True Range for each consecutive pair
    // ------------------------------------------------------------------
    let bar_count = candles.len() - 1;
    let mut plus_dm = Vec::with_capacity(bar_count);
    let mut minus_dm = Vec::with_capacity(bar_count);
    let mut tr_vals = Vec::with_capacity(bar_count);

    for pair in candles.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        let tr = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Step 2: plain averages over the trailing window
    // ------------------------------------------------------------------
    let avg_tr = mean(tail(&tr_vals, period));
    let avg_plus_dm = mean(tail(&plus_dm, period));
    let avg_minus_dm = mean(tail(&minus_dm, period));

    if avg_tr == 0.0 || !avg_tr.is_finite() {
        return DEFAULT_ADX;
    }

    let dx = compute_dx(avg_plus_dm, avg_minus_dm, avg_tr);
    clamp_finite(dx, 0.0, 100.0, DEFAULT_ADX)
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Compute DX from averaged +DM, -DM and TR (`avg_tr` must be non-zero).
fn compute_dx(avg_plus_dm: f64, avg_minus_dm: f64, avg_tr: f64) -> f64 {
    let plus_di = (avg_plus_dm / avg_tr) * 100.0;
    let minus_di = (avg_minus_dm / avg_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        // Both +DI and -DI are zero: no directional movement.
        return 0.0;
    }

    ((plus_di - minus_di).abs() / di_sum) * 100.0
}
