//! Daily price bars and validated bar series.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One trading day of OHLCV data. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Intraday high.
    pub high: Decimal,
    /// Intraday low.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume in shares.
    pub volume: Decimal,
}

/// Chronologically ordered bars for one instrument.
///
/// Owned exclusively by one analysis run and never mutated after
/// construction. Validation rejects empty input and out-of-order dates so
/// the indicator engine can assume a clean series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Creates a validated series from chronologically ordered bars.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidSeries`] if `bars` is empty or the
    /// dates are not strictly increasing.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(EngineError::invalid_series(symbol, "no bars"));
        }
        for window in bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(EngineError::invalid_series(
                    symbol,
                    format!(
                        "bars out of order: {} followed by {}",
                        window[0].date, window[1].date
                    ),
                ));
            }
        }
        Ok(Self { symbol, bars })
    }

    /// Instrument code this series belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar.
    #[must_use]
    pub fn latest(&self) -> &PriceBar {
        // Safe: constructor rejects empty series.
        &self.bars[self.bars.len() - 1]
    }

    /// Date of the most recent bar, used as the "as of" anchor for news
    /// recency so that a fixed input always yields the same decision.
    #[must_use]
    pub fn as_of(&self) -> NaiveDate {
        self.latest().date
    }

    /// Closing prices as f64, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| b.close.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// Intraday highs as f64, oldest first.
    #[must_use]
    pub fn highs(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| b.high.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// Intraday lows as f64, oldest first.
    #[must_use]
    pub fn lows(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| b.low.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// Traded volumes as f64, oldest first.
    #[must_use]
    pub fn volumes(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| b.volume.to_f64().unwrap_or(f64::NAN))
            .collect()
    }
}
