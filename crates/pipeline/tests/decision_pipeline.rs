//! End-to-end runs of the four-layer pipeline over synthetic series.

use chrono::NaiveDate;
use quadgate_core::{
    EngineError, Layer, MarketKind, NewsItem, PipelineConfig, PriceBar, PriceSeries, Signal,
};
use quadgate_pipeline::DecisionPipeline;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

fn series(symbol: &str, closes: &[f64], volumes: &[f64]) -> PriceSeries {
    assert_eq!(closes.len(), volumes.len());
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars: Vec<PriceBar> = closes
        .iter()
        .zip(volumes.iter())
        .enumerate()
        .map(|(i, (&c, &v))| {
            let close = Decimal::from_f64(c).unwrap();
            PriceBar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close + Decimal::ONE,
                low: close - Decimal::ONE,
                close,
                volume: Decimal::from_f64(v).unwrap(),
            }
        })
        .collect();
    PriceSeries::new(symbol, bars).unwrap()
}

/// Sixty bars climbing 0.2/day from 100. The last bar's volume shrinks to
/// 0.6x the trailing average when `pullback` is set, which is the
/// difference between a 75 and an 85 technical score here.
fn uptrend(symbol: &str, pullback: bool) -> PriceSeries {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i) * 0.2).collect();
    let mut volumes = vec![1_000_000.0; 60];
    if pullback {
        volumes[59] = 600_000.0;
    }
    series(symbol, &closes, &volumes)
}

fn news(title: &str, published: &str) -> NewsItem {
    NewsItem::new(title, "", "wire", published.parse().unwrap())
}

fn pipeline() -> DecisionPipeline {
    DecisionPipeline::new(PipelineConfig::default())
}

#[test]
fn test_clean_uptrend_pullback_is_a_buy() {
    let decision = pipeline().analyze(&uptrend("600519", true), &[]).unwrap();

    assert_eq!(decision.signal, Signal::Buy);
    assert_eq!(decision.market, MarketKind::AShare);
    assert_eq!(decision.layer_results.len(), 4);
    // Base 70, ATR in band +5, volume pullback +10. The steady climb
    // pins RSI at 100 (no bonus) and never flips the MACD histogram.
    assert_eq!(decision.total_score, 85);
    assert!(decision.rejection_reason.is_none());
}

#[test]
fn test_buy_plan_levels() {
    let decision = pipeline().analyze(&uptrend("600519", true), &[]).unwrap();
    let plan = decision.plan.expect("buy decision carries a plan");

    // ma5 of the last five closes is 111.4; entry band is +/-1% around it.
    assert!((plan.entry_low - 111.4 * 0.99).abs() < 1e-9);
    assert!((plan.entry_high - 111.4 * 1.01).abs() < 1e-9);

    // Constant-range bars give ATR = 2; ma20 = 109.9 < close, so the stop
    // is ma20 - 2 * 1.5 under the A-share profile.
    assert!((plan.stop_loss - (109.9 - 3.0)).abs() < 1e-6);

    // Default target policy projects 2x the ATR% above the close.
    let close = 111.8;
    let expected_target = close * (1.0 + 2.0 / close * 2.0);
    assert!((plan.target - expected_target).abs() < 1e-6);

    assert!(plan.risk_reward > 0.0);
    assert!(plan.stop_loss < plan.entry_low);
    assert!(plan.target > plan.entry_high);
}

#[test]
fn test_spike_above_ma5_fails_position_gate() {
    // Steady climb, then a one-day jump to 125: the trend is intact but
    // the close sits ~9.8% above ma5.
    let mut closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i) * 0.2).collect();
    closes[59] = 125.0;
    let volumes = vec![1_000_000.0; 60];
    let decision = pipeline()
        .analyze(&series("600519", &closes, &volumes), &[])
        .unwrap();

    assert_eq!(decision.signal, Signal::Wait);
    assert_eq!(decision.layer_results.len(), 2);
    assert!(decision.layer(Layer::Trend).unwrap().passed);
    assert!(!decision.layer(Layer::Position).unwrap().passed);
    assert!(decision.rejection_reason.unwrap().starts_with("position:"));
    assert!(decision.plan.is_none());
}

#[test]
fn test_single_veto_overrides_passing_score() {
    let items = [news("公司被证监会立案调查", "2024-02-28")];
    let decision = pipeline().analyze(&uptrend("600519", true), &items).unwrap();

    assert_eq!(decision.signal, Signal::Wait);
    // The technical score survived; the veto overruled it.
    assert_eq!(decision.total_score, 85);
    assert!(decision
        .rejection_reason
        .unwrap()
        .starts_with("sentiment-veto:"));
    assert!(decision.plan.is_none());
}

#[test]
fn test_single_catalyst_cannot_rescue_borderline_score() {
    // Without the pullback the technical score is 75, five short.
    let items = [news("董事会通过股份回购方案", "2024-02-28")];
    let decision = pipeline().analyze(&uptrend("600519", false), &items).unwrap();

    assert_eq!(decision.signal, Signal::Wait);
    assert_eq!(decision.total_score, 75);
    assert!(decision
        .rejection_reason
        .unwrap()
        .contains("below buy threshold"));
}

#[test]
fn test_two_catalysts_rescue_borderline_score() {
    let items = [
        news("董事会通过股份回购方案", "2024-02-28"),
        news("一季度业绩超预期", "2024-02-27"),
    ];
    let decision = pipeline().analyze(&uptrend("600519", false), &items).unwrap();

    assert_eq!(decision.signal, Signal::Buy);
    assert_eq!(decision.total_score, 80);
    assert!(decision.plan.is_some());
}

#[test]
fn test_bonus_is_capped_across_many_catalysts() {
    let two = [
        news("股份回购", "2024-02-28"),
        news("业绩超预期", "2024-02-27"),
    ];
    let four = [
        news("股份回购", "2024-02-28"),
        news("业绩超预期", "2024-02-27"),
        news("中标重大合同", "2024-02-26"),
        news("机构调研密集", "2024-02-25"),
    ];
    let with_two = pipeline().analyze(&uptrend("600519", true), &two).unwrap();
    let with_four = pipeline().analyze(&uptrend("600519", true), &four).unwrap();
    assert_eq!(with_two.total_score, with_four.total_score);
    assert_eq!(with_two.total_score, 90);
}

#[test]
fn test_stale_veto_outside_window_is_ignored() {
    // Latest bar is 2024-02-29; 14-day window starts 2024-02-15.
    let items = [news("公司被立案调查", "2024-01-20")];
    let decision = pipeline().analyze(&uptrend("600519", true), &items).unwrap();
    assert_eq!(decision.signal, Signal::Buy);
}

#[test]
fn test_ten_bars_is_insufficient_data() {
    let closes: Vec<f64> = (0..10).map(|i| 100.0 + f64::from(i)).collect();
    let volumes = vec![1_000_000.0; 10];
    let err = pipeline()
        .analyze(&series("600519", &closes, &volumes), &[])
        .unwrap_err();
    match err {
        EngineError::InsufficientData {
            required,
            available,
            ..
        } => {
            assert_eq!(required, 20);
            assert_eq!(available, 10);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_hk_symbol_routes_to_hk_profile() {
    let decision = pipeline().analyze(&uptrend("00700", true), &[]).unwrap();
    assert_eq!(decision.market, MarketKind::HkStock);
    assert_eq!(decision.signal, Signal::Buy);
}

#[test]
fn test_unknown_symbol_is_rejected() {
    let err = pipeline().analyze(&uptrend("AAPL", true), &[]).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedMarket { .. }));
}

#[test]
fn test_same_inputs_same_decision() {
    let series = uptrend("600519", true);
    let items = [news("股份回购", "2024-02-28"), news("业绩超预期", "2024-02-27")];
    let p = pipeline();
    let first = p.analyze(&series, &items).unwrap();
    let second = p.analyze(&series, &items).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_report_renders_for_buy_and_wait() {
    let buy = pipeline().analyze(&uptrend("600519", true), &[]).unwrap();
    let report = quadgate_pipeline::DecisionFormatter::format(&buy);
    assert!(report.contains("BUY"));
    assert!(report.contains("Trading Plan"));

    let closes: Vec<f64> = (0..60).map(|i| 150.0 - f64::from(i) * 0.5).collect();
    let volumes = vec![1_000_000.0; 60];
    let wait = pipeline()
        .analyze(&series("600519", &closes, &volumes), &[])
        .unwrap();
    let report = quadgate_pipeline::DecisionFormatter::format(&wait);
    assert!(report.contains("WAIT"));
    assert!(!report.contains("Trading Plan"));
}
