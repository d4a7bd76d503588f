//! Layer 4: the news sentiment veto/bonus filter.
//!
//! The classifier is a pluggable capability: the default implementation
//! scans keyword categories, but anything honoring the contract (a hard
//! veto class plus a counted bonus class) can stand in, e.g. an
//! LLM-backed classifier. Whatever the implementation, arbitrary text
//! must classify as neutral at worst; this layer never errors.

use chrono::Days;
use quadgate_core::{KeywordCategory, Layer, LayerResult, NewsItem, PipelineConfig};
use serde::{Deserialize, Serialize};

/// Classifier output: a hard veto flag plus counted positive catalysts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentVerdict {
    /// A severe-negative category matched; forces Wait regardless of score.
    pub veto: bool,
    /// Number of distinct bonus categories that matched.
    pub bonus_matches: usize,
    /// Names of every matched category, veto first.
    pub categories: Vec<String>,
}

impl SentimentVerdict {
    /// A verdict that neither vetoes nor awards anything.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            veto: false,
            bonus_matches: 0,
            categories: Vec::new(),
        }
    }
}

/// Pluggable sentiment classification over pre-sanitized news text.
pub trait SentimentClassifier: Send + Sync {
    /// Classifies the concatenated text of all in-window news items.
    fn classify(&self, text: &str) -> SentimentVerdict;
}

/// Keyword-table classifier: the categories and their keyword lists come
/// from the pipeline configuration. ASCII keywords match
/// case-insensitively; CJK keywords match as-is.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    veto_categories: Vec<KeywordCategory>,
    bonus_categories: Vec<KeywordCategory>,
}

impl KeywordClassifier {
    /// Builds the classifier from the configured category tables.
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            veto_categories: config.veto_categories.clone(),
            bonus_categories: config.bonus_categories.clone(),
        }
    }

    fn category_matches(category: &KeywordCategory, text_lower: &str) -> bool {
        category
            .keywords
            .iter()
            .any(|k| text_lower.contains(&k.to_lowercase()))
    }
}

impl SentimentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> SentimentVerdict {
        if text.is_empty() {
            return SentimentVerdict::neutral();
        }
        let text_lower = text.to_lowercase();

        let mut categories = Vec::new();
        let mut veto = false;
        for category in &self.veto_categories {
            if Self::category_matches(category, &text_lower) {
                veto = true;
                categories.push(category.name.clone());
            }
        }

        let mut bonus_matches = 0;
        for category in &self.bonus_categories {
            if Self::category_matches(category, &text_lower) {
                bonus_matches += 1;
                categories.push(category.name.clone());
            }
        }

        SentimentVerdict {
            veto,
            bonus_matches,
            categories,
        }
    }
}

/// Runs the sentiment layer over the news set.
///
/// Items older than the configured window (measured from the latest bar
/// date, never the wall clock) are ignored. Empty input is neutral: no
/// bonus, no veto. The bonus requires at least `min_bonus_matches`
/// distinct categories and is capped at one award no matter how many
/// more items match.
#[must_use]
pub fn sentiment_filter(
    items: &[NewsItem],
    classifier: &dyn SentimentClassifier,
    config: &PipelineConfig,
    as_of: chrono::NaiveDate,
) -> LayerResult {
    let window_start = as_of
        .checked_sub_days(Days::new(config.news_window_days.unsigned_abs()))
        .unwrap_or(chrono::NaiveDate::MIN);

    let text: Vec<String> = items
        .iter()
        .filter(|item| item.published >= window_start)
        .map(NewsItem::text)
        .collect();

    if text.is_empty() {
        return LayerResult::pass(Layer::Sentiment, 0, "no recent news, neutral");
    }

    let verdict = classifier.classify(&text.join("\n"));

    if verdict.veto {
        let matched: Vec<&str> = verdict
            .categories
            .iter()
            .map(String::as_str)
            .collect();
        tracing::warn!(categories = ?matched, "sentiment veto triggered");
        return LayerResult::fail(
            Layer::Sentiment,
            format!("severe negative news: {}", matched.join(", ")),
        );
    }

    if verdict.bonus_matches >= config.min_bonus_matches {
        return LayerResult::pass(
            Layer::Sentiment,
            config.sentiment_bonus,
            format!(
                "{} positive catalysts ({}) +{}",
                verdict.bonus_matches,
                verdict.categories.join(", "),
                config.sentiment_bonus
            ),
        );
    }

    if verdict.bonus_matches > 0 {
        return LayerResult::pass(
            Layer::Sentiment,
            0,
            format!(
                "single positive mention ({}), below {}-category bar",
                verdict.categories.join(", "),
                config.min_bonus_matches
            ),
        );
    }

    LayerResult::pass(Layer::Sentiment, 0, "neutral news coverage")
}
