//! Result aggregation and filtering view-model
//!
//! Pure derivation of display data from raw analysis output. Nothing here
//! touches the network or owns long-lived state; the dashboard holds a
//! [`ViewState`] behind a lock and calls into these functions per request.

use crate::model::{AnalysisRecord, AnalysisResult, FilterCategory, Sentiment, Summary};
use tracing::warn;

/// Count records per sentiment category.
///
/// Records with an unrecognized sentiment count toward `total` only.
/// An empty sequence yields an all-zero summary.
pub fn compute_summary(records: &[AnalysisRecord]) -> Summary {
    let mut summary = Summary {
        total: records.len(),
        ..Summary::default()
    };
    for record in records {
        match record.sentiment {
            Sentiment::Positive => summary.positive += 1,
            Sentiment::Negative => summary.negative += 1,
            Sentiment::Neutral => summary.neutral += 1,
            Sentiment::Unrecognized => {}
        }
    }
    summary
}

/// Subsequence of `records` visible under `category`, relative order preserved.
///
/// `All` returns the full sequence unchanged.
pub fn filter_by_category(
    records: &[AnalysisRecord],
    category: FilterCategory,
) -> Vec<AnalysisRecord> {
    records
        .iter()
        .filter(|record| category.matches(record.sentiment))
        .cloned()
        .collect()
}

impl AnalysisResult {
    /// Wrap a single classified record into the batch response shape.
    ///
    /// Sole adapter between the single-text and batch shapes; the
    /// presentation layer treats both identically.
    pub fn single(record: AnalysisRecord) -> Self {
        let results = vec![record];
        Self {
            summary: compute_summary(&results),
            results,
        }
    }

    /// Build from a batch response.
    ///
    /// A server-provided summary is kept as-is; one is computed when the
    /// server omits it. Disagreement between the two is logged, not fixed.
    pub fn from_batch(results: Vec<AnalysisRecord>, server_summary: Option<Summary>) -> Self {
        let computed = compute_summary(&results);

        let unrecognized = computed.total - (computed.positive + computed.negative + computed.neutral);
        if unrecognized > 0 {
            warn!(
                unrecognized,
                total = computed.total,
                "Batch contains records with unrecognized sentiment labels"
            );
        }

        let summary = match server_summary {
            Some(server) => {
                if server != computed {
                    warn!(?server, ?computed, "Server summary disagrees with recomputed counts");
                }
                server
            }
            None => computed,
        };

        Self { summary, results }
    }
}

/// Ephemeral dashboard view state: latest result plus current filter.
///
/// Plain mutable fields; the dashboard owns one instance behind a lock.
/// Replaced only by analysis and filter-selection handlers.
#[derive(Debug, Default)]
pub struct ViewState {
    pub result: Option<AnalysisResult>,
    pub filter: FilterCategory,
}

impl ViewState {
    /// Replace the previous result wholesale. The filter selection survives.
    pub fn replace_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }

    pub fn select_filter(&mut self, filter: FilterCategory) {
        self.filter = filter;
    }

    /// Records visible under the current filter; empty before the first analysis
    pub fn filtered(&self) -> Vec<AnalysisRecord> {
        match &self.result {
            Some(result) => filter_by_category(&result.results, self.filter),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, sentiment: Sentiment, polarity: f64) -> AnalysisRecord {
        AnalysisRecord {
            text: text.to_string(),
            sentiment,
            polarity,
            subjectivity: None,
        }
    }

    fn sample_records() -> Vec<AnalysisRecord> {
        vec![
            record("great!", Sentiment::Positive, 0.8),
            record("bad", Sentiment::Negative, -0.6),
            record("ok", Sentiment::Neutral, 0.0),
        ]
    }

    #[test]
    fn summary_counts_each_category_once() {
        let summary = compute_summary(&sample_records());
        assert_eq!(
            summary,
            Summary {
                total: 3,
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
    }

    #[test]
    fn summary_total_equals_input_length() {
        let records = vec![
            record("a", Sentiment::Positive, 0.5),
            record("b", Sentiment::Positive, 0.4),
            record("c", Sentiment::Neutral, 0.0),
            record("d", Sentiment::Negative, -0.2),
            record("e", Sentiment::Positive, 0.9),
        ];
        let summary = compute_summary(&records);
        assert_eq!(summary.total, records.len());
        assert_eq!(
            summary.positive + summary.negative + summary.neutral,
            summary.total
        );
    }

    #[test]
    fn summary_of_empty_input_is_all_zero() {
        assert_eq!(compute_summary(&[]), Summary::default());
    }

    #[test]
    fn unrecognized_sentiment_counts_toward_total_only() {
        let records = vec![
            record("fine", Sentiment::Positive, 0.3),
            record("???", Sentiment::Unrecognized, 0.0),
        ];
        let summary = compute_summary(&records);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.negative, 0);
        assert_eq!(summary.neutral, 0);
    }

    #[test]
    fn filter_all_is_identity() {
        let records = sample_records();
        assert_eq!(filter_by_category(&records, FilterCategory::All), records);
        assert!(filter_by_category(&[], FilterCategory::All).is_empty());
    }

    #[test]
    fn filter_returns_only_matching_records() {
        let records = sample_records();
        let negative = filter_by_category(&records, FilterCategory::Negative);
        assert_eq!(negative, vec![record("bad", Sentiment::Negative, -0.6)]);
    }

    #[test]
    fn filter_count_matches_summary_count() {
        let records = vec![
            record("a", Sentiment::Positive, 0.5),
            record("b", Sentiment::Negative, -0.5),
            record("c", Sentiment::Positive, 0.2),
            record("d", Sentiment::Unrecognized, 0.0),
            record("e", Sentiment::Positive, 0.7),
        ];
        let summary = compute_summary(&records);
        assert_eq!(
            filter_by_category(&records, FilterCategory::Positive).len(),
            summary.positive
        );
        assert_eq!(
            filter_by_category(&records, FilterCategory::Negative).len(),
            summary.negative
        );
        assert_eq!(
            filter_by_category(&records, FilterCategory::Neutral).len(),
            summary.neutral
        );
    }

    #[test]
    fn filter_preserves_relative_order() {
        let records = vec![
            record("first", Sentiment::Positive, 0.9),
            record("second", Sentiment::Negative, -0.1),
            record("third", Sentiment::Positive, 0.2),
            record("fourth", Sentiment::Positive, 0.4),
        ];
        let positive = filter_by_category(&records, FilterCategory::Positive);
        let texts: Vec<&str> = positive.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third", "fourth"]);
    }

    #[test]
    fn single_result_normalizes_to_batch_shape() {
        let result = AnalysisResult::single(record("fine", Sentiment::Neutral, 0.1));
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].text, "fine");
        assert_eq!(
            result.summary,
            Summary {
                total: 1,
                positive: 0,
                negative: 0,
                neutral: 1
            }
        );
    }

    #[test]
    fn from_batch_keeps_server_summary() {
        // Server counts are authoritative even when they disagree
        let server = Summary {
            total: 4,
            positive: 2,
            negative: 1,
            neutral: 1,
        };
        let result = AnalysisResult::from_batch(sample_records(), Some(server));
        assert_eq!(result.summary, server);
    }

    #[test]
    fn from_batch_computes_summary_when_server_omits_it() {
        let result = AnalysisResult::from_batch(sample_records(), None);
        assert_eq!(
            result.summary,
            Summary {
                total: 3,
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
    }

    #[test]
    fn view_state_starts_empty_with_all_filter() {
        let view = ViewState::default();
        assert!(view.result.is_none());
        assert_eq!(view.filter, FilterCategory::All);
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn view_state_replaces_result_and_keeps_filter() {
        let mut view = ViewState::default();
        view.select_filter(FilterCategory::Negative);

        view.replace_result(AnalysisResult::from_batch(sample_records(), None));
        assert_eq!(view.filter, FilterCategory::Negative);
        assert_eq!(view.filtered().len(), 1);

        // A new result fully replaces the old one
        view.replace_result(AnalysisResult::single(record("fine", Sentiment::Neutral, 0.1)));
        assert_eq!(view.result.as_ref().unwrap().summary.total, 1);
        assert!(view.filtered().is_empty());
    }
}
