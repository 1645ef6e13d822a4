//! Sentiment service HTTP client
//!
//! Talks to the external analysis service over its two endpoints:
//! POST /analyze for single texts and POST /analyze-batch for CSV uploads.
//! Responses are deserialized into typed records at this boundary; the
//! classifier itself lives entirely on the other side of the wire.

use sentiscope_common::model::{AnalysisRecord, Summary};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("SentiScope/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sentiment service client errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the service, with its detail message
    #[error("Sentiment service error {0}: {1}")]
    Api(u16, String),

    #[error("Failed to parse sentiment service response: {0}")]
    Parse(String),
}

/// Batch analysis response: records plus the server-computed summary
/// when the service provides one
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub summary: Option<Summary>,
    pub results: Vec<AnalysisRecord>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequestBody<'a> {
    text: &'a str,
}

/// HTTP client for the external sentiment analysis service
#[derive(Clone)]
pub struct SentimentClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    /// Create a client for the service at `base_url` (no trailing slash)
    pub fn new(base_url: String) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify a single text
    pub async fn analyze(&self, text: &str) -> Result<AnalysisRecord, BackendError> {
        let url = format!("{}/analyze", self.base_url);
        tracing::debug!(chars = text.len(), "Submitting text for analysis");

        let response = self
            .http_client
            .post(&url)
            .json(&AnalyzeRequestBody { text })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        let record: AnalysisRecord = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        tracing::info!(
            sentiment = record.sentiment.as_str(),
            polarity = record.polarity,
            "Text analysis completed"
        );

        Ok(record)
    }

    /// Submit a CSV file for batch classification
    pub async fn analyze_batch(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BatchResponse, BackendError> {
        let url = format!("{}/analyze-batch", self.base_url);
        tracing::debug!(
            file = file_name,
            bytes = contents.len(),
            "Submitting CSV for batch analysis"
        );

        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        let batch: BatchResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        tracing::info!(
            results = batch.results.len(),
            has_server_summary = batch.summary.is_some(),
            "Batch analysis completed"
        );

        Ok(batch)
    }

    /// Check service reachability. Used for a startup log line only;
    /// the dashboard runs regardless of the outcome.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Map non-success statuses to [`BackendError::Api`], carrying the
/// service's detail message when the body has one
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Api(status.as_u16(), extract_detail(&body)))
}

/// Pull the "detail" field out of an error body, falling back to raw text
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no error detail".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiscope_common::model::Sentiment;

    #[test]
    fn client_creation() {
        let client = SentimentClient::new("http://127.0.0.1:8000".to_string());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn single_response_parsing() {
        let json_str = r#"{
            "text": "This product is amazing!",
            "sentiment": "positive",
            "polarity": 0.625,
            "subjectivity": 0.9
        }"#;

        let record: AnalysisRecord = serde_json::from_str(json_str).unwrap();
        assert_eq!(record.sentiment, Sentiment::Positive);
        assert_eq!(record.polarity, 0.625);
        assert_eq!(record.subjectivity, Some(0.9));
    }

    #[test]
    fn batch_response_parsing_with_summary() {
        let json_str = r#"{
            "summary": {"total": 2, "positive": 1, "negative": 1, "neutral": 0},
            "results": [
                {"text": "great", "sentiment": "positive", "polarity": 0.8, "subjectivity": 0.75},
                {"text": "awful", "sentiment": "negative", "polarity": -0.9, "subjectivity": 1.0}
            ]
        }"#;

        let batch: BatchResponse = serde_json::from_str(json_str).unwrap();
        assert_eq!(batch.results.len(), 2);
        let summary = batch.summary.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.positive, 1);
    }

    #[test]
    fn batch_response_parsing_without_summary() {
        let json_str = r#"{
            "results": [
                {"text": "ok", "sentiment": "neutral", "polarity": 0.0}
            ]
        }"#;

        let batch: BatchResponse = serde_json::from_str(json_str).unwrap();
        assert!(batch.summary.is_none());
        assert_eq!(batch.results.len(), 1);
    }

    #[test]
    fn batch_response_tolerates_unknown_sentiment_labels() {
        let json_str = r#"{
            "results": [
                {"text": "hm", "sentiment": "mixed", "polarity": 0.1}
            ]
        }"#;

        let batch: BatchResponse = serde_json::from_str(json_str).unwrap();
        assert_eq!(batch.results[0].sentiment, Sentiment::Unrecognized);
    }

    #[test]
    fn detail_extraction() {
        assert_eq!(
            extract_detail(r#"{"detail": "Only CSV files are supported"}"#),
            "Only CSV files are supported"
        );
        assert_eq!(extract_detail("plain text error"), "plain text error");
        assert_eq!(extract_detail(""), "no error detail");
        // JSON without a detail field falls back to the raw body
        assert_eq!(extract_detail(r#"{"message": "nope"}"#), r#"{"message": "nope"}"#);
    }
}
