//! Average True Range with Wilder's smoothing.

use crate::ma::finite;

/// True range of one bar given the previous close:
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
#[must_use]
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// ATR over the trailing `period` bars using Wilder's smoothing, seeded
/// with the simple mean of the first `period` true ranges.
///
/// # Arguments
/// * `highs` / `lows` / `closes` - Aligned series, oldest first
/// * `period` - Lookback length (14 by convention)
///
/// # Returns
/// `None` when fewer than `period + 1` bars exist (the first true range
/// needs a previous close) or the inputs are misaligned.
#[must_use]
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    let n = closes.len();
    if period == 0 || n < period + 1 || highs.len() != n || lows.len() != n {
        return None;
    }

    let ranges: Vec<f64> = (1..n)
        .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
        .collect();

    let mut value = ranges[..period].iter().sum::<f64>() / period as f64;
    for range in &ranges[period..] {
        value = (value * (period as f64 - 1.0) + range) / period as f64;
    }
    finite(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range_dominates() {
        // Plain intraday range.
        assert_eq!(true_range(105.0, 100.0, 102.0), 5.0);
        // Gap up: distance from previous close dominates.
        assert_eq!(true_range(115.0, 112.0, 100.0), 15.0);
        // Gap down.
        assert_eq!(true_range(90.0, 88.0, 100.0), 12.0);
    }

    #[test]
    fn test_atr_needs_period_plus_one() {
        let h = vec![101.0; 14];
        let l = vec![99.0; 14];
        let c = vec![100.0; 14];
        assert!(atr(&h, &l, &c, 14).is_none());

        let h = vec![101.0; 15];
        let l = vec![99.0; 15];
        let c = vec![100.0; 15];
        assert_eq!(atr(&h, &l, &c, 14), Some(2.0));
    }

    #[test]
    fn test_atr_constant_range() {
        // Every bar spans exactly 2.0 around an unchanged close, so the
        // smoothed value stays at 2.0 regardless of length.
        let n = 40;
        let h = vec![101.0; n];
        let l = vec![99.0; n];
        let c = vec![100.0; n];
        let value = atr(&h, &l, &c, 14).unwrap();
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_atr_misaligned_inputs() {
        let h = vec![101.0; 15];
        let l = vec![99.0; 14];
        let c = vec![100.0; 15];
        assert!(atr(&h, &l, &c, 14).is_none());
    }
}
