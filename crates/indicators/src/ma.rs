//! Simple moving averages and volume ratios.

/// Arithmetic mean of the last `period` values.
///
/// # Arguments
/// * `values` - Series values, oldest first
/// * `period` - Window length
///
/// # Returns
/// `None` when fewer than `period` values exist or the mean is not finite.
#[must_use]
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    finite(sum / period as f64)
}

/// Ratio of the latest value to the trailing mean of the `window` values
/// immediately preceding it. The latest value is excluded from the mean so
/// a volume spike does not dilute its own baseline.
///
/// # Returns
/// `None` when fewer than `window + 1` values exist or the trailing mean
/// is not positive.
#[must_use]
pub fn trailing_ratio(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window + 1 {
        return None;
    }
    let latest = values[values.len() - 1];
    let tail = &values[values.len() - 1 - window..values.len() - 1];
    let mean: f64 = tail.iter().sum::<f64>() / window as f64;
    if mean <= 0.0 {
        return None;
    }
    finite(latest / mean)
}

/// Percent deviation of `value` from `reference`.
///
/// # Returns
/// `None` when the reference is not positive or the result is not finite.
#[must_use]
pub fn deviation_pct(value: f64, reference: f64) -> Option<f64> {
    if reference <= 0.0 {
        return None;
    }
    finite((value - reference) / reference * 100.0)
}

/// Rejects NaN and infinities so they never leak into scoring.
#[must_use]
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
