//! Decision composer: runs the four layers in strict order and assembles
//! the final verdict.
//!
//! The order is load-bearing: sentiment never runs before the structural
//! gates, so news can neither rescue a broken trend nor veto a run that
//! was already gated out. Every uncertain or missing input resolves to
//! Wait, never to Buy.

use quadgate_core::{
    Decision, EngineError, LayerResult, MarketKind, NewsItem, PipelineConfig, PriceSeries, Result,
    Signal, TargetPolicy, TradingPlan,
};
use quadgate_indicators::IndicatorSnapshot;
use tracing::{debug, info};

use crate::gates::{position_gate, trend_gate};
use crate::scorer::technical_score;
use crate::sentiment::{sentiment_filter, KeywordClassifier, SentimentClassifier};

/// Fewest bars that permit any analysis: the trend gate needs ma20.
pub const MIN_BARS: usize = 20;

/// Progress of one analysis run through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing evaluated yet.
    Pending,
    /// Layer 1 passed.
    TrendChecked,
    /// Layer 2 passed.
    PositionChecked,
    /// Layer 3 ran (it always proceeds).
    Scored,
    /// Layer 4 ran.
    SentimentChecked,
    /// Terminal verdict assembled.
    Final,
}

/// The four-layer decision pipeline.
///
/// Holds the immutable configuration and the sentiment classifier; each
/// `analyze` call is a pure function of its inputs, so one pipeline can
/// serve concurrent runs over different instruments.
pub struct DecisionPipeline {
    config: PipelineConfig,
    classifier: Box<dyn SentimentClassifier>,
}

impl DecisionPipeline {
    /// Creates a pipeline with the keyword classifier built from the
    /// configured category tables.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let classifier = Box::new(KeywordClassifier::from_config(&config));
        Self { config, classifier }
    }

    /// Creates a pipeline with a custom sentiment classifier.
    #[must_use]
    pub fn with_classifier(
        config: PipelineConfig,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Self {
        Self { config, classifier }
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyzes one instrument and produces its decision.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedMarket`] when the series' symbol
    /// matches no known market, and [`EngineError::InsufficientData`]
    /// when fewer than [`MIN_BARS`] bars exist. Indicator lookbacks
    /// beyond the available history degrade instead of erroring.
    pub fn analyze(&self, series: &PriceSeries, news: &[NewsItem]) -> Result<Decision> {
        let symbol = series.symbol();
        let market = MarketKind::detect(symbol)?;
        let profile = *self.config.profile(market);

        if series.len() < MIN_BARS {
            return Err(EngineError::insufficient_data(
                symbol,
                MIN_BARS,
                series.len(),
            ));
        }

        let snapshot = IndicatorSnapshot::compute(series);
        if snapshot.degraded {
            debug!(symbol, "snapshot degraded, long-lookback rules will be skipped");
        }

        let as_of = series.as_of();
        let mut state = PipelineState::Pending;
        let mut layers: Vec<LayerResult> = Vec::with_capacity(4);

        // Layer 1: trend gate (hard).
        let trend = trend_gate(&snapshot);
        debug!(symbol, ?state, passed = trend.passed, reason = %trend.reason, "trend gate");
        if !trend.passed {
            let reason = format!("trend: {}", trend.reason);
            layers.push(trend);
            return Ok(self.finish(series, market, 0, layers, Some(reason), None));
        }
        state = PipelineState::TrendChecked;
        layers.push(trend);

        // Layer 2: position gate (hard).
        let position = position_gate(&snapshot, &profile);
        debug!(symbol, ?state, passed = position.passed, reason = %position.reason, "position gate");
        if !position.passed {
            let reason = format!("position: {}", position.reason);
            layers.push(position);
            return Ok(self.finish(series, market, 0, layers, Some(reason), None));
        }
        state = PipelineState::PositionChecked;
        layers.push(position);

        // Layer 3: technical scorer (never hard-fails).
        let technical = technical_score(&snapshot, &profile, &self.config);
        let technical_total = technical.score_delta;
        debug!(symbol, ?state, score = technical_total, reason = %technical.reason, "technical score");
        state = PipelineState::Scored;
        layers.push(technical);

        // Layer 4: sentiment (veto or bonus; only runs on a live candidate).
        let sentiment = sentiment_filter(news, self.classifier.as_ref(), &self.config, as_of);
        debug!(symbol, ?state, passed = sentiment.passed, reason = %sentiment.reason, "sentiment filter");
        state = PipelineState::SentimentChecked;

        if !sentiment.passed {
            let reason = format!("sentiment-veto: {}", sentiment.reason);
            layers.push(sentiment);
            return Ok(self.finish(series, market, technical_total, layers, Some(reason), None));
        }

        let final_score = technical_total + sentiment.score_delta;
        layers.push(sentiment);
        debug_assert_eq!(state, PipelineState::SentimentChecked);

        if final_score < self.config.buy_threshold {
            let reason = format!(
                "score {final_score} below buy threshold {}",
                self.config.buy_threshold
            );
            return Ok(self.finish(series, market, final_score, layers, Some(reason), None));
        }

        // Buy verdict requires a complete risk plan; fail closed without one.
        match self.build_plan(&snapshot, &profile) {
            Some(plan) => {
                info!(symbol, score = final_score, "buy signal");
                Ok(self.finish(series, market, final_score, layers, None, Some(plan)))
            }
            None => {
                let reason = "risk plan unavailable (atr14 missing)".to_string();
                Ok(self.finish(series, market, final_score, layers, Some(reason), None))
            }
        }
    }

    /// Computes the entry/stop/target plan. Requires ma5, ma20, and ATR;
    /// the gates guarantee the moving averages, ATR may be missing on
    /// short history.
    fn build_plan(&self, snapshot: &IndicatorSnapshot, profile: &quadgate_core::MarketProfile) -> Option<TradingPlan> {
        let ma5 = snapshot.ma5?;
        let ma20 = snapshot.ma20?;
        let atr = snapshot.atr14?;
        let atr_pct = snapshot.atr_pct()?;
        let close = snapshot.close;

        let band = self.config.entry_band_pct / 100.0;
        let entry_low = ma5 * (1.0 - band);
        let entry_high = ma5 * (1.0 + band);
        let entry_mid = (entry_low + entry_high) / 2.0;

        // Anchor under whichever of ma20/close is lower so the stop sits
        // below both for any positive ATR.
        let stop_loss = ma20.min(close) - atr * profile.atr_stop_multiplier;

        let target = match self.config.target_policy {
            TargetPolicy::AtrScaled { multiple } => close * (1.0 + atr_pct / 100.0 * multiple),
            TargetPolicy::FixedPct { pct } => close * (1.0 + pct / 100.0),
        };

        let risk = entry_mid - stop_loss;
        if risk <= 0.0 || !risk.is_finite() {
            return None;
        }
        let risk_reward = (target - entry_mid) / risk;

        Some(TradingPlan {
            entry_low,
            entry_high,
            stop_loss,
            target,
            risk_reward,
        })
    }

    fn finish(
        &self,
        series: &PriceSeries,
        market: MarketKind,
        total_score: i32,
        layer_results: Vec<LayerResult>,
        rejection_reason: Option<String>,
        plan: Option<TradingPlan>,
    ) -> Decision {
        let signal = if rejection_reason.is_none() && plan.is_some() {
            Signal::Buy
        } else {
            Signal::Wait
        };
        debug!(
            symbol = series.symbol(),
            state = ?PipelineState::Final,
            ?signal,
            "decision composed"
        );
        if signal == Signal::Wait {
            info!(
                symbol = series.symbol(),
                score = total_score,
                reason = rejection_reason.as_deref().unwrap_or(""),
                "wait signal"
            );
        }
        Decision {
            symbol: series.symbol().to_string(),
            market,
            as_of: series.as_of(),
            signal,
            total_score,
            layer_results,
            plan,
            rejection_reason,
        }
    }
}
