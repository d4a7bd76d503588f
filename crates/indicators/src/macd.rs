//! MACD(12,26,9) built from seeded exponential moving averages.
//!
//! EMA uses the standard recursive smoothing `alpha = 2 / (period + 1)`,
//! seeded with the simple average of the first `period` values. That
//! makes every output value a pure function of the input series, with no
//! dependence on how much warm-up history a caller happens to hold.

use crate::ma::finite;

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;

/// MACD values for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    /// DIF: EMA12(close) - EMA26(close).
    pub dif: f64,
    /// DEA: EMA9 of DIF.
    pub dea: f64,
    /// Histogram: 2 * (DIF - DEA).
    pub bar: f64,
    /// Previous bar's histogram, when one more bar of history exists.
    /// Needed for golden-cross detection.
    pub prev_bar: Option<f64>,
}

impl MacdOutput {
    /// Golden cross: the histogram flipped from non-positive to positive
    /// between the previous and current bar. `None` when no previous
    /// histogram value exists.
    #[must_use]
    pub fn golden_cross(&self) -> Option<bool> {
        self.prev_bar.map(|prev| prev <= 0.0 && self.bar > 0.0)
    }
}

/// EMA over `values`, seeded with the simple average of the first
/// `period` values. The returned series is aligned to
/// `values[period - 1..]`.
///
/// # Returns
/// `None` when fewer than `period` values exist.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || values.len() < period {
        return None;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for value in &values[period..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    Some(out)
}

/// Computes MACD(12,26,9) for the latest bar of `closes`.
///
/// DIF exists once the slow EMA is seeded (26 bars); DEA needs nine DIF
/// values on top of that, so the full triple requires 34 bars and the
/// previous histogram 35.
///
/// # Returns
/// `None` when the series is too short or any value is not finite.
#[must_use]
pub fn macd(closes: &[f64]) -> Option<MacdOutput> {
    let fast = ema(closes, FAST_PERIOD)?;
    let slow = ema(closes, SLOW_PERIOD)?;

    // Both series end at the latest bar; align them from the tail.
    let dif_len = slow.len();
    let fast_tail = &fast[fast.len() - dif_len..];
    let dif_series: Vec<f64> = fast_tail
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let dea_series = ema(&dif_series, SIGNAL_PERIOD)?;

    let dif = *dif_series.last()?;
    let dea = *dea_series.last()?;
    let bar = 2.0 * (dif - dea);

    let prev_bar = if dea_series.len() >= 2 {
        let prev_dif = dif_series[dif_series.len() - 2];
        let prev_dea = dea_series[dea_series.len() - 2];
        finite(2.0 * (prev_dif - prev_dea))
    } else {
        None
    };

    Some(MacdOutput {
        dif: finite(dif)?,
        dea: finite(dea)?,
        bar: finite(bar)?,
        prev_bar,
    })
}
