//! Batch orchestration: fans a watchlist out over the pipeline.
//!
//! Analysis is pure CPU work, so each instrument runs on the blocking
//! pool and failures stay isolated: one bad series never poisons the
//! rest of the batch.

use std::sync::Arc;

use quadgate_core::{Decision, NewsItem, PriceSeries};
use quadgate_pipeline::DecisionPipeline;
use tracing::warn;

/// One instrument's inputs for a batch run.
pub struct AnalysisRequest {
    /// Validated OHLCV history.
    pub series: PriceSeries,
    /// News items for this instrument; may be empty.
    pub news: Vec<NewsItem>,
}

impl AnalysisRequest {
    /// Bundles a series with its news set.
    #[must_use]
    pub fn new(series: PriceSeries, news: Vec<NewsItem>) -> Self {
        Self { series, news }
    }
}

/// Outcome of one instrument within a batch.
pub struct BatchOutcome {
    /// Instrument code the outcome belongs to.
    pub symbol: String,
    /// The decision, or the per-instrument failure.
    pub result: quadgate_core::Result<Decision>,
}

/// Runs every request through the pipeline concurrently and returns the
/// outcomes in request order.
///
/// Per-instrument errors are captured in the outcome, logged, and never
/// abort the batch.
pub async fn run_batch(
    pipeline: Arc<DecisionPipeline>,
    requests: Vec<AnalysisRequest>,
) -> Vec<BatchOutcome> {
    let mut handles = Vec::with_capacity(requests.len());
    for request in requests {
        let pipeline = Arc::clone(&pipeline);
        let symbol = request.series.symbol().to_string();
        let handle = tokio::task::spawn_blocking(move || {
            let result = pipeline.analyze(&request.series, &request.news);
            if let Err(err) = &result {
                warn!(symbol = request.series.symbol(), error = %err, "analysis failed");
            }
            result
        });
        handles.push((symbol, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (symbol, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                warn!(symbol = %symbol, error = %join_err, "analysis task panicked");
                Err(quadgate_core::EngineError::invalid_series(
                    &symbol,
                    "analysis task panicked",
                ))
            }
        };
        outcomes.push(BatchOutcome { symbol, result });
    }
    outcomes
}
