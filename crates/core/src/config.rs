//! Pipeline configuration.
//!
//! One immutable bundle of hand-tuned constants, constructed once at
//! startup and passed by reference into every analysis run. The engine
//! never reads ambient state; everything tunable lives here.

use serde::{Deserialize, Serialize};

use crate::market::{MarketKind, MarketProfile};

/// Points awarded by each technical scorer rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// MACD histogram flipped from non-positive to positive this bar.
    pub macd_golden_cross: i32,
    /// RSI inside the healthy band [30, 70].
    pub rsi_healthy: i32,
    /// RSI below 30. Mutually exclusive with the healthy bonus.
    pub rsi_oversold: i32,
    /// ATR% inside the market profile's band.
    pub atr_band: i32,
    /// Latest volume below the shrink ratio of the trailing average.
    pub volume_pullback: i32,
    /// Latest volume above the heavy ratio of the trailing average.
    pub volume_breakout: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            macd_golden_cross: 10,
            rsi_healthy: 10,
            rsi_oversold: 15,
            atr_band: 5,
            volume_pullback: 10,
            volume_breakout: 8,
        }
    }
}

/// A named sentiment category and the keywords that evidence it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    /// Category identifier, quoted in decision reasons.
    pub name: String,
    /// Substrings that mark a text as belonging to this category.
    pub keywords: Vec<String>,
}

impl KeywordCategory {
    /// Creates a category from a name and keyword list.
    #[must_use]
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// How the target price is derived from the close. The exact formula is a
/// policy constant; one rule is chosen per deployment and kept consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Volatility-scaled reward: `close * (1 + atr_pct / 100 * multiple)`.
    AtrScaled {
        /// ATR% multiple projected above the close.
        multiple: f64,
    },
    /// Fixed reward percentage: `close * (1 + pct / 100)`.
    FixedPct {
        /// Percent above the close.
        pct: f64,
    },
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::AtrScaled { multiple: 2.0 }
    }
}

/// All tunables consumed by the decision pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Score granted for clearing the two structural gates.
    pub base_score: i32,
    /// Final score at or above which the signal becomes Buy.
    pub buy_threshold: i32,
    /// Technical scorer rule weights.
    pub weights: ScoreWeights,
    /// Latest volume / trailing average below this is a pullback.
    pub volume_shrink_ratio: f64,
    /// Latest volume / trailing average above this is a breakout.
    pub volume_heavy_ratio: f64,
    /// Points added when enough distinct bonus categories match.
    pub sentiment_bonus: i32,
    /// Distinct bonus category matches required before any bonus is paid.
    pub min_bonus_matches: usize,
    /// Only news published within this many days of the latest bar counts.
    pub news_window_days: i64,
    /// Half-width of the entry band around ma5, in percent.
    pub entry_band_pct: f64,
    /// Target price derivation rule.
    pub target_policy: TargetPolicy,
    /// A-share gate/plan constants.
    pub a_share: MarketProfile,
    /// Hong Kong gate/plan constants.
    pub hk_stock: MarketProfile,
    /// Categories whose single match vetoes the decision.
    pub veto_categories: Vec<KeywordCategory>,
    /// Categories counted toward the sentiment bonus.
    pub bonus_categories: Vec<KeywordCategory>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_score: 70,
            buy_threshold: 80,
            weights: ScoreWeights::default(),
            volume_shrink_ratio: 0.7,
            volume_heavy_ratio: 1.5,
            sentiment_bonus: 5,
            min_bonus_matches: 2,
            news_window_days: 14,
            entry_band_pct: 1.0,
            target_policy: TargetPolicy::default(),
            a_share: MarketProfile::a_share(),
            hk_stock: MarketProfile::hk_stock(),
            veto_categories: default_veto_categories(),
            bonus_categories: default_bonus_categories(),
        }
    }
}

impl PipelineConfig {
    /// Market profile for a detected market kind.
    #[must_use]
    pub fn profile(&self, kind: MarketKind) -> &MarketProfile {
        match kind {
            MarketKind::AShare => &self.a_share,
            MarketKind::HkStock => &self.hk_stock,
        }
    }
}

/// Severe-negative categories. A single unambiguous match in any of these
/// forces Wait regardless of the technical score.
#[must_use]
pub fn default_veto_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new(
            "financial-fraud",
            &[
                "财务造假",
                "造假",
                "虚增利润",
                "业绩暴雷",
                "财务违规",
                "financial fraud",
                "accounting fraud",
            ],
        ),
        KeywordCategory::new(
            "regulatory-investigation",
            &[
                "立案调查",
                "立案",
                "被调查",
                "证监会调查",
                "内幕交易",
                "regulatory investigation",
                "under investigation",
            ],
        ),
        KeywordCategory::new(
            "delisting-risk",
            &["退市", "终止上市", "*ST", "ST股", "delisting"],
        ),
        KeywordCategory::new(
            "major-litigation",
            &[
                "重大诉讼",
                "巨额罚款",
                "天价罚款",
                "违规担保",
                "major lawsuit",
                "record fine",
            ],
        ),
        KeywordCategory::new(
            "executive-disappearance",
            &["失联", "被带走", "协助调查", "executive missing"],
        ),
    ]
}

/// Positive-catalyst categories. At least two distinct categories must
/// match before any bonus is paid; a lone vague mention moves nothing.
#[must_use]
pub fn default_bonus_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new(
            "buyback",
            &["回购", "股份回购", "buyback", "share repurchase"],
        ),
        KeywordCategory::new(
            "earnings-beat",
            &[
                "业绩超预期",
                "业绩预增",
                "业绩大增",
                "earnings beat",
                "record profit",
            ],
        ),
        KeywordCategory::new(
            "major-contract",
            &["重大合同", "中标", "大额订单", "major contract", "contract win"],
        ),
        KeywordCategory::new(
            "institutional-accumulation",
            &[
                "机构调研",
                "机构增持",
                "大股东增持",
                "北向资金加仓",
                "institutional buying",
            ],
        ),
    ]
}
