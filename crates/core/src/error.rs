//! Error types for the quadgate decision engine.
//!
//! Structural errors abort the run for one instrument and surface to the
//! orchestrator; they are never converted into a default BUY signal.

use thiserror::Error;

/// Errors that can occur while analyzing a single instrument.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Price series is too short for even a degraded analysis.
    #[error("insufficient data for {symbol}: need {required} bars, got {available}")]
    InsufficientData {
        /// Instrument code being analyzed.
        symbol: String,
        /// Minimum number of bars required.
        required: usize,
        /// Number of bars actually available.
        available: usize,
    },

    /// Instrument code does not map to a known market.
    #[error("unsupported market for instrument code: {code}")]
    UnsupportedMarket {
        /// The offending instrument code.
        code: String,
    },

    /// Price series failed structural validation.
    #[error("invalid price series for {symbol}: {reason}")]
    InvalidSeries {
        /// Instrument code the series belongs to.
        symbol: String,
        /// What was wrong with the series.
        reason: String,
    },
}

impl EngineError {
    /// Creates an insufficient-data error.
    pub fn insufficient_data(symbol: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            symbol: symbol.into(),
            required,
            available,
        }
    }

    /// Creates an unsupported-market error.
    pub fn unsupported_market(code: impl Into<String>) -> Self {
        Self::UnsupportedMarket { code: code.into() }
    }

    /// Creates an invalid-series error.
    pub fn invalid_series(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error stems from the input data rather than the
    /// instrument code.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::InvalidSeries { .. }
        )
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = EngineError::insufficient_data("600519", 20, 10);
        let display = err.to_string();
        assert!(display.contains("600519"));
        assert!(display.contains("20"));
        assert!(display.contains("10"));
    }

    #[test]
    fn test_unsupported_market_display() {
        let err = EngineError::unsupported_market("NOT-A-CODE");
        assert!(err.to_string().contains("NOT-A-CODE"));
    }

    #[test]
    fn test_invalid_series_display() {
        let err = EngineError::invalid_series("00700.HK", "bars out of order");
        let display = err.to_string();
        assert!(display.contains("00700.HK"));
        assert!(display.contains("bars out of order"));
    }

    #[test]
    fn test_data_error_classification() {
        assert!(EngineError::insufficient_data("600519", 20, 10).is_data_error());
        assert!(EngineError::invalid_series("600519", "empty").is_data_error());
        assert!(!EngineError::unsupported_market("X").is_data_error());
    }
}
