//! Layer 3: the additive technical scorer.
//!
//! Starts from the base score and awards points per confirming signal.
//! Rules only ever add; a degraded indicator skips its rule instead of
//! penalizing or fabricating. The layer never hard-fails: `passed` just
//! records whether the running total reached the buy threshold.

use quadgate_core::{Layer, LayerResult, MarketProfile, PipelineConfig};
use quadgate_indicators::IndicatorSnapshot;

/// Runs the scoring rules and returns the layer result. `score_delta`
/// holds the full technical total (base score plus bonuses).
#[must_use]
pub fn technical_score(
    snapshot: &IndicatorSnapshot,
    profile: &MarketProfile,
    config: &PipelineConfig,
) -> LayerResult {
    let weights = &config.weights;
    let mut total = config.base_score;
    let mut notes: Vec<String> = vec![format!("base {}", config.base_score)];

    // MACD golden cross.
    match snapshot.golden_cross() {
        Some(true) => {
            total += weights.macd_golden_cross;
            notes.push(format!("macd golden cross +{}", weights.macd_golden_cross));
        }
        Some(false) => {}
        None => notes.push("macd skipped (insufficient history)".to_string()),
    }

    // RSI: oversold outranks the healthy band; never both.
    match snapshot.rsi14 {
        Some(rsi) if rsi < 30.0 => {
            total += weights.rsi_oversold;
            notes.push(format!("rsi {rsi:.0} oversold +{}", weights.rsi_oversold));
        }
        Some(rsi) if rsi <= 70.0 => {
            total += weights.rsi_healthy;
            notes.push(format!("rsi {rsi:.0} healthy +{}", weights.rsi_healthy));
        }
        Some(rsi) => notes.push(format!("rsi {rsi:.0} overbought, no bonus")),
        None => notes.push("rsi skipped (insufficient history)".to_string()),
    }

    // ATR% inside the market's normal-volatility band, edges included.
    match snapshot.atr_pct() {
        Some(pct) if pct >= profile.atr_min_pct && pct <= profile.atr_max_pct => {
            total += weights.atr_band;
            notes.push(format!("atr {pct:.1}% in band +{}", weights.atr_band));
        }
        Some(pct) => notes.push(format!("atr {pct:.1}% outside band, no bonus")),
        None => notes.push("atr skipped (insufficient history)".to_string()),
    }

    // Volume: at most one signal. Noisy data can satisfy neither ratio,
    // and the pullback reading wins if a misconfiguration lets both fire.
    match snapshot.volume_ratio_5d {
        Some(ratio) if ratio < config.volume_shrink_ratio => {
            total += weights.volume_pullback;
            notes.push(format!(
                "volume pullback {ratio:.2}x +{}",
                weights.volume_pullback
            ));
        }
        Some(ratio) if ratio > config.volume_heavy_ratio => {
            total += weights.volume_breakout;
            notes.push(format!(
                "volume breakout {ratio:.2}x +{}",
                weights.volume_breakout
            ));
        }
        Some(ratio) => notes.push(format!("volume {ratio:.2}x normal, no bonus")),
        None => notes.push("volume ratio skipped (insufficient history)".to_string()),
    }

    let passed = total >= config.buy_threshold;
    LayerResult {
        layer: Layer::Technical,
        passed,
        score_delta: total,
        reason: notes.join("; "),
    }
}
