//! Layers 1 and 2: the hard structural gates.
//!
//! Both are pure boolean gates contributing zero points. A missing
//! required indicator fails the gate outright; an absent value is never
//! treated as a pass.

use quadgate_core::{Layer, LayerResult, MarketProfile};
use quadgate_indicators::IndicatorSnapshot;

/// Layer 1: trend gate. Passes only on a strict bullish alignment
/// `ma5 > ma10 > ma20`; any tie or inversion fails, and the reason names
/// the first inequality that broke.
#[must_use]
pub fn trend_gate(snapshot: &IndicatorSnapshot) -> LayerResult {
    let (ma5, ma10, ma20) = match (snapshot.ma5, snapshot.ma10, snapshot.ma20) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => {
            return LayerResult::fail(
                Layer::Trend,
                "moving averages unavailable (insufficient history)",
            )
        }
    };

    if ma5 <= ma10 {
        return LayerResult::fail(
            Layer::Trend,
            format!("ma5({ma5:.2}) <= ma10({ma10:.2})"),
        );
    }
    if ma10 <= ma20 {
        return LayerResult::fail(
            Layer::Trend,
            format!("ma10({ma10:.2}) <= ma20({ma20:.2})"),
        );
    }

    LayerResult::pass(
        Layer::Trend,
        0,
        format!("bullish alignment ma5({ma5:.2}) > ma10({ma10:.2}) > ma20({ma20:.2})"),
    )
}

/// Layer 2: position gate. Passes when the absolute bias rate is inside
/// the market's threshold; a stretched price is a chase, not an entry.
#[must_use]
pub fn position_gate(snapshot: &IndicatorSnapshot, profile: &MarketProfile) -> LayerResult {
    let Some(bias) = snapshot.bias_rate else {
        return LayerResult::fail(Layer::Position, "bias rate unavailable (ma5 missing)");
    };

    let threshold = profile.bias_threshold_pct;
    if bias.abs() >= threshold {
        return LayerResult::fail(
            Layer::Position,
            format!("bias {bias:.1}% outside +/-{threshold:.1}% threshold"),
        );
    }

    let note = if bias < 0.0 { "pullback entry zone" } else { "safe range" };
    LayerResult::pass(
        Layer::Position,
        0,
        format!("bias {bias:.1}% within +/-{threshold:.1}% ({note})"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadgate_core::MarketProfile;

    fn snapshot(ma5: Option<f64>, ma10: Option<f64>, ma20: Option<f64>, bias: Option<f64>) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 100.0,
            ma5,
            ma10,
            ma20,
            ma60: None,
            macd_dif: None,
            macd_dea: None,
            macd_bar: None,
            macd_bar_prev: None,
            rsi14: None,
            atr14: None,
            bias_rate: bias,
            volume_ratio_5d: None,
            degraded: true,
        }
    }

    #[test]
    fn test_trend_gate_passes_strict_alignment() {
        let result = trend_gate(&snapshot(Some(105.0), Some(102.0), Some(100.0), None));
        assert!(result.passed);
        assert_eq!(result.score_delta, 0);
    }

    #[test]
    fn test_trend_gate_fails_on_tie() {
        let result = trend_gate(&snapshot(Some(102.0), Some(102.0), Some(100.0), None));
        assert!(!result.passed);
        assert!(result.reason.contains("ma5(102.00) <= ma10(102.00)"));
    }

    #[test]
    fn test_trend_gate_fails_on_inverted_long_end() {
        let result = trend_gate(&snapshot(Some(105.0), Some(101.0), Some(102.0), None));
        assert!(!result.passed);
        assert!(result.reason.contains("ma10(101.00) <= ma20(102.00)"));
    }

    #[test]
    fn test_trend_gate_fails_closed_on_missing_ma() {
        let result = trend_gate(&snapshot(Some(105.0), Some(102.0), None, None));
        assert!(!result.passed);
        assert!(result.reason.contains("unavailable"));
    }

    #[test]
    fn test_position_gate_thresholds_by_market() {
        let snap = snapshot(Some(100.0), Some(99.0), Some(98.0), Some(5.5));
        // 5.5% fails the A-share 5% threshold...
        assert!(!position_gate(&snap, &MarketProfile::a_share()).passed);
        // ...but passes the HK 6% threshold.
        assert!(position_gate(&snap, &MarketProfile::hk_stock()).passed);
    }

    #[test]
    fn test_position_gate_exact_threshold_fails() {
        let snap = snapshot(Some(100.0), Some(99.0), Some(98.0), Some(5.0));
        assert!(!position_gate(&snap, &MarketProfile::a_share()).passed);
    }

    #[test]
    fn test_position_gate_negative_bias_within_threshold() {
        let snap = snapshot(Some(100.0), Some(99.0), Some(98.0), Some(-3.0));
        let result = position_gate(&snap, &MarketProfile::a_share());
        assert!(result.passed);
        assert!(result.reason.contains("pullback"));
    }

    #[test]
    fn test_position_gate_fails_closed_on_missing_bias() {
        let snap = snapshot(Some(100.0), Some(99.0), Some(98.0), None);
        assert!(!position_gate(&snap, &MarketProfile::a_share()).passed);
    }
}
