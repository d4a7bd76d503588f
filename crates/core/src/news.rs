//! News snippets supplied by the external fetch layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One news snippet for an instrument.
///
/// The text is supplied pre-sanitized by the caller; the sentiment filter
/// treats it as opaque and classifies arbitrary text as neutral at worst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Short summary or excerpt.
    pub summary: String,
    /// Publisher identifier.
    pub source: String,
    /// Publication date.
    pub published: NaiveDate,
}

impl NewsItem {
    /// Creates a news item.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
        published: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            source: source.into(),
            published,
        }
    }

    /// Title and summary joined for keyword scanning.
    #[must_use]
    pub fn text(&self) -> String {
        if self.summary.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.summary)
        }
    }
}
