//! Decision output types: layer results, trading plan, final verdict.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::market::MarketKind;

/// Final trading signal for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// All gates passed and the final score cleared the buy threshold.
    Buy,
    /// Anything else. Missing data, failed gate, veto, or low score all
    /// land here; uncertainty never defaults to Buy.
    Wait,
}

/// The four pipeline layers, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Layer 1: moving-average alignment gate.
    Trend,
    /// Layer 2: bias-rate position gate.
    Position,
    /// Layer 3: additive technical scorer.
    Technical,
    /// Layer 4: news sentiment veto/bonus filter.
    Sentiment,
}

/// Outcome of one pipeline layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerResult {
    /// Which layer produced this result.
    pub layer: Layer,
    /// Whether the layer passed. For the scorer this means the running
    /// total reached the buy threshold; for gates it is the gate verdict.
    pub passed: bool,
    /// Points contributed to the total score. Zero for pure gates.
    pub score_delta: i32,
    /// Human-readable explanation of the outcome.
    pub reason: String,
}

impl LayerResult {
    /// Creates a passing result.
    #[must_use]
    pub fn pass(layer: Layer, score_delta: i32, reason: impl Into<String>) -> Self {
        Self {
            layer,
            passed: true,
            score_delta,
            reason: reason.into(),
        }
    }

    /// Creates a failing result. Failed layers never contribute points.
    #[must_use]
    pub fn fail(layer: Layer, reason: impl Into<String>) -> Self {
        Self {
            layer,
            passed: false,
            score_delta: 0,
            reason: reason.into(),
        }
    }
}

/// Entry/stop/target plan, computed only for Buy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingPlan {
    /// Lower edge of the entry band.
    pub entry_low: f64,
    /// Upper edge of the entry band.
    pub entry_high: f64,
    /// Stop-loss level, below both the close and ma20.
    pub stop_loss: f64,
    /// Target level, above the close.
    pub target: f64,
    /// (target - entry_mid) / (entry_mid - stop); reported for
    /// transparency, not gated on.
    pub risk_reward: f64,
}

impl TradingPlan {
    /// Midpoint of the entry band.
    #[must_use]
    pub fn entry_mid(&self) -> f64 {
        (self.entry_low + self.entry_high) / 2.0
    }
}

/// Terminal artifact of one analysis run. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Instrument code.
    pub symbol: String,
    /// Market the instrument trades on.
    pub market: MarketKind,
    /// Date of the latest bar the decision was made on.
    pub as_of: NaiveDate,
    /// Buy or Wait.
    pub signal: Signal,
    /// Final score: technical total plus sentiment bonus.
    pub total_score: i32,
    /// Per-layer outcomes, in execution order. Layers short-circuited by
    /// an earlier hard gate are absent.
    pub layer_results: Vec<LayerResult>,
    /// Entry/stop/target plan; present only when `signal` is Buy.
    pub plan: Option<TradingPlan>,
    /// Why the decision is Wait; absent on Buy.
    pub rejection_reason: Option<String>,
}

impl Decision {
    /// Returns the result for a specific layer, if it ran.
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&LayerResult> {
        self.layer_results.iter().find(|r| r.layer == layer)
    }

    /// True when the decision is an actionable buy.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.signal == Signal::Buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_result_constructors() {
        let pass = LayerResult::pass(Layer::Technical, 10, "rsi healthy");
        assert!(pass.passed);
        assert_eq!(pass.score_delta, 10);

        let fail = LayerResult::fail(Layer::Trend, "ma5 below ma10");
        assert!(!fail.passed);
        assert_eq!(fail.score_delta, 0);
    }

    #[test]
    fn test_plan_entry_mid() {
        let plan = TradingPlan {
            entry_low: 99.0,
            entry_high: 101.0,
            stop_loss: 95.0,
            target: 110.0,
            risk_reward: 2.0,
        };
        assert_eq!(plan.entry_mid(), 100.0);
    }

    #[test]
    fn test_decision_layer_lookup() {
        let decision = Decision {
            symbol: "600519".to_string(),
            market: MarketKind::AShare,
            as_of: "2024-03-01".parse().unwrap(),
            signal: Signal::Wait,
            total_score: 0,
            layer_results: vec![LayerResult::fail(Layer::Trend, "no alignment")],
            plan: None,
            rejection_reason: Some("trend".to_string()),
        };
        assert!(decision.layer(Layer::Trend).is_some());
        assert!(decision.layer(Layer::Sentiment).is_none());
        assert!(!decision.is_buy());
    }

    #[test]
    fn test_decision_serializes() {
        let decision = Decision {
            symbol: "00700.HK".to_string(),
            market: MarketKind::HkStock,
            as_of: "2024-03-01".parse().unwrap(),
            signal: Signal::Buy,
            total_score: 105,
            layer_results: vec![],
            plan: Some(TradingPlan {
                entry_low: 99.0,
                entry_high: 101.0,
                stop_loss: 95.0,
                target: 110.0,
                risk_reward: 2.0,
            }),
            rejection_reason: None,
        };
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"Buy\""));
        assert!(json.contains("105"));
    }
}
