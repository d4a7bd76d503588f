//! Relative Strength Index with Wilder's smoothing.

use crate::ma::finite;

/// RSI over the trailing `period` bars using Wilder's smoothing.
///
/// Average gain/loss are seeded with the simple mean of the first
/// `period` changes and then smoothed as
/// `avg = (avg * (period - 1) + change) / period`. When the average loss
/// is zero the RSI is 100, not a division by zero.
///
/// # Arguments
/// * `closes` - Closing prices, oldest first
/// * `period` - Lookback length (14 by convention)
///
/// # Returns
/// `None` when fewer than `period + 1` closes exist.
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain: f64 = changes[..period].iter().filter(|c| **c > 0.0).sum::<f64>() / period as f64;
    let mut avg_loss: f64 =
        -changes[..period].iter().filter(|c| **c < 0.0).sum::<f64>() / period as f64;

    for change in &changes[period..] {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    finite(100.0 - 100.0 / (1.0 + rs))
}
