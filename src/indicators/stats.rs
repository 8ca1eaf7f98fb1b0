// =============================================================================
// Numeric helpers shared by the indicator functions
// =============================================================================

/// Return the last `n` elements of `values` (all of them when `n >= len`).
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// Arithmetic mean. Empty input => 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a caller-supplied `mean`.
///
/// Divides by `len`, not `len - 1`. Empty input => 0.0.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Clamp `value` into `[min, max]`, substituting `fallback` for NaN/Inf.
pub fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
