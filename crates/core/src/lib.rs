pub mod bar;
pub mod config;
pub mod config_loader;
pub mod decision;
pub mod error;
pub mod market;
pub mod news;

pub use bar::{PriceBar, PriceSeries};
pub use config::{KeywordCategory, PipelineConfig, ScoreWeights, TargetPolicy};
pub use config_loader::ConfigLoader;
pub use decision::{Decision, Layer, LayerResult, Signal, TradingPlan};
pub use error::{EngineError, Result};
pub use market::{MarketKind, MarketProfile};
pub use news::NewsItem;
