//! Indicator snapshot for the latest bar of a price series.
//!
//! Every field is either a finite number or `None` when the lookback
//! exceeds the available history. `None` is never fabricated into a
//! value; downstream layers decide whether a missing input fails a gate
//! or merely skips a scoring rule.

use quadgate_core::PriceSeries;
use serde::{Deserialize, Serialize};

use crate::atr::atr;
use crate::ma::{deviation_pct, sma, trailing_ratio};
use crate::macd::macd;
use crate::rsi::rsi;

/// Lookback of the RSI and ATR indicators.
pub const WILDER_PERIOD: usize = 14;
/// Trailing window for the volume ratio (excludes the latest bar).
pub const VOLUME_WINDOW: usize = 5;

/// Derived, read-only indicator record attached to the most recent bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Latest close.
    pub close: f64,
    /// 5-day simple moving average of closes.
    pub ma5: Option<f64>,
    /// 10-day simple moving average.
    pub ma10: Option<f64>,
    /// 20-day simple moving average.
    pub ma20: Option<f64>,
    /// 60-day simple moving average.
    pub ma60: Option<f64>,
    /// MACD DIF line.
    pub macd_dif: Option<f64>,
    /// MACD DEA (signal) line.
    pub macd_dea: Option<f64>,
    /// MACD histogram: 2 * (DIF - DEA).
    pub macd_bar: Option<f64>,
    /// Previous bar's histogram, for cross detection.
    pub macd_bar_prev: Option<f64>,
    /// 14-day RSI with Wilder smoothing.
    pub rsi14: Option<f64>,
    /// 14-day ATR with Wilder smoothing.
    pub atr14: Option<f64>,
    /// Percent deviation of the close from ma5.
    pub bias_rate: Option<f64>,
    /// Latest volume over the trailing 5-day average volume.
    pub volume_ratio_5d: Option<f64>,
    /// True when any indicator was unavailable due to short history.
    pub degraded: bool,
}

impl IndicatorSnapshot {
    /// Computes the snapshot for the latest bar of `series`.
    ///
    /// Indicators whose lookback exceeds the series length come back as
    /// `None` and set the degraded flag; nothing panics on short input.
    #[must_use]
    pub fn compute(series: &PriceSeries) -> Self {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();
        let close = closes[closes.len() - 1];

        let ma5 = sma(&closes, 5);
        let ma10 = sma(&closes, 10);
        let ma20 = sma(&closes, 20);
        let ma60 = sma(&closes, 60);

        let macd_out = macd(&closes);
        let rsi14 = rsi(&closes, WILDER_PERIOD);
        let atr14 = atr(&highs, &lows, &closes, WILDER_PERIOD);
        let bias_rate = ma5.and_then(|ma| deviation_pct(close, ma));
        let volume_ratio_5d = trailing_ratio(&volumes, VOLUME_WINDOW);

        let degraded = ma60.is_none()
            || macd_out.is_none()
            || macd_out.is_some_and(|m| m.prev_bar.is_none())
            || rsi14.is_none()
            || atr14.is_none()
            || volume_ratio_5d.is_none();

        Self {
            close,
            ma5,
            ma10,
            ma20,
            ma60,
            macd_dif: macd_out.map(|m| m.dif),
            macd_dea: macd_out.map(|m| m.dea),
            macd_bar: macd_out.map(|m| m.bar),
            macd_bar_prev: macd_out.and_then(|m| m.prev_bar),
            rsi14,
            atr14,
            bias_rate,
            volume_ratio_5d,
            degraded,
        }
    }

    /// ATR as a percentage of the close.
    #[must_use]
    pub fn atr_pct(&self) -> Option<f64> {
        if self.close <= 0.0 {
            return None;
        }
        self.atr14.map(|a| a / self.close * 100.0)
    }

    /// Golden cross: histogram flipped from non-positive to positive this
    /// bar. `None` when either histogram value is unavailable.
    #[must_use]
    pub fn golden_cross(&self) -> Option<bool> {
        match (self.macd_bar_prev, self.macd_bar) {
            (Some(prev), Some(bar)) => Some(prev <= 0.0 && bar > 0.0),
            _ => None,
        }
    }
}
