//! Market detection and per-market constant bundles.
//!
//! The instrument code's lexical form determines the market:
//! - A-share: exactly six ASCII digits, optionally suffixed `.SH`/`.SZ`
//! - Hong Kong: four or five digits, optionally suffixed `.HK` or
//!   prefixed `HK`
//!
//! Anything else is rejected; there is no fallback market.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Which exchange family an instrument trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    /// Mainland China A-share (Shanghai/Shenzhen).
    AShare,
    /// Hong Kong listed stock.
    HkStock,
}

impl MarketKind {
    /// Determines the market from an instrument code's lexical form.
    ///
    /// # Errors
    /// Returns [`EngineError::UnsupportedMarket`] for codes that match
    /// neither market's format.
    pub fn detect(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(EngineError::unsupported_market(code));
        }

        // A-share: 6 digits, exchange suffix tolerated.
        let a_candidate = trimmed
            .strip_suffix(".SH")
            .or_else(|| trimmed.strip_suffix(".sh"))
            .or_else(|| trimmed.strip_suffix(".SZ"))
            .or_else(|| trimmed.strip_suffix(".sz"))
            .unwrap_or(trimmed);
        if a_candidate.len() == 6 && a_candidate.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::AShare);
        }

        // Hong Kong: 4-5 digits with optional `.HK` suffix or `HK` prefix.
        let upper = trimmed.to_ascii_uppercase();
        let hk_candidate = upper
            .strip_suffix(".HK")
            .or_else(|| upper.strip_prefix("HK"))
            .unwrap_or(&upper);
        if (4..=5).contains(&hk_candidate.len())
            && hk_candidate.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(Self::HkStock);
        }

        Err(EngineError::unsupported_market(code))
    }

    /// Settlement currency for this market.
    #[must_use]
    pub const fn currency(self) -> &'static str {
        match self {
            Self::AShare => "CNY",
            Self::HkStock => "HKD",
        }
    }
}

/// Hand-tuned per-market constants for the gating and plan layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketProfile {
    /// Market this profile parameterizes.
    pub kind: MarketKind,
    /// Maximum absolute bias rate (percent) allowed by the position gate.
    pub bias_threshold_pct: f64,
    /// Lower edge of the healthy ATR% band.
    pub atr_min_pct: f64,
    /// Upper edge of the healthy ATR% band.
    pub atr_max_pct: f64,
    /// ATR multiple used for the stop-loss distance.
    pub atr_stop_multiplier: f64,
}

impl MarketProfile {
    /// Default profile for mainland A-shares.
    #[must_use]
    pub const fn a_share() -> Self {
        Self {
            kind: MarketKind::AShare,
            bias_threshold_pct: 5.0,
            atr_min_pct: 1.0,
            atr_max_pct: 4.0,
            atr_stop_multiplier: 1.5,
        }
    }

    /// Default profile for Hong Kong stocks. Wider bands: no daily price
    /// limit, so both normal volatility and the stop distance are larger.
    #[must_use]
    pub const fn hk_stock() -> Self {
        Self {
            kind: MarketKind::HkStock,
            bias_threshold_pct: 6.0,
            atr_min_pct: 1.0,
            atr_max_pct: 6.0,
            atr_stop_multiplier: 2.0,
        }
    }

    /// Default profile for a market kind.
    #[must_use]
    pub const fn for_kind(kind: MarketKind) -> Self {
        match kind {
            MarketKind::AShare => Self::a_share(),
            MarketKind::HkStock => Self::hk_stock(),
        }
    }
}
