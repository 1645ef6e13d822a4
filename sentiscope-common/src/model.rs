//! Data model for sentiment analysis results
//!
//! These types mirror the external sentiment service's JSON. The
//! `sentiment` field is constrained to the enumerated categories at the
//! deserialization boundary: any other label maps to
//! [`Sentiment::Unrecognized`] rather than being trusted as-is.

use serde::{Deserialize, Serialize};

/// Classification label assigned to a text by the sentiment service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// Any label outside the three recognized categories.
    /// Counts toward totals but never toward a category.
    Unrecognized,
}

impl Sentiment {
    /// Map a service-provided label onto the enumerated set
    pub fn parse(label: &str) -> Self {
        match label {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Unrecognized => "unrecognized",
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        Sentiment::parse(&label)
    }
}

/// One sentiment result as returned by the analysis service.
/// Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Original input text
    pub text: String,
    /// Classification label
    pub sentiment: Sentiment,
    /// Signed valence score, typically in [-1.0, 1.0]
    pub polarity: f64,
    /// Subjectivity score in [0.0, 1.0], when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjectivity: Option<f64>,
}

/// Per-category record counts derived from a record sequence.
///
/// For well-formed record sets `positive + negative + neutral == total`;
/// unrecognized sentiment labels count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Aggregate handed to the presentation layer: ordered records plus summary.
///
/// Created fresh on every successful analysis call (single-text or batch)
/// and fully replaces any prior result. Order matches input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub results: Vec<AnalysisRecord>,
}

/// Result-list filter selection. Pure UI state, defaults to All.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    #[default]
    All,
    Positive,
    Negative,
    Neutral,
}

impl FilterCategory {
    /// Whether a record with the given sentiment is visible under this filter
    pub fn matches(&self, sentiment: Sentiment) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Positive => sentiment == Sentiment::Positive,
            FilterCategory::Negative => sentiment == Sentiment::Negative,
            FilterCategory::Neutral => sentiment == Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::All => "all",
            FilterCategory::Positive => "positive",
            FilterCategory::Negative => "negative",
            FilterCategory::Neutral => "neutral",
        }
    }
}
