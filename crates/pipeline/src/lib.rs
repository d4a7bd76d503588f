//! The four-layer decision pipeline.
//!
//! Layer 1 gates on trend structure, layer 2 on price position, layer 3
//! scores technical confirmations, layer 4 applies the news sentiment
//! veto/bonus. [`DecisionPipeline::analyze`] runs them in that order and
//! composes the final [`quadgate_core::Decision`].

pub mod composer;
pub mod gates;
pub mod report;
pub mod scorer;
pub mod sentiment;

pub use composer::{DecisionPipeline, PipelineState, MIN_BARS};
pub use gates::{position_gate, trend_gate};
pub use report::DecisionFormatter;
pub use scorer::technical_score;
pub use sentiment::{
    sentiment_filter, KeywordClassifier, SentimentClassifier, SentimentVerdict,
};
