//! Analysis submission handlers
//!
//! POST /api/analyze (single text) and POST /api/analyze-batch (CSV
//! upload). Both forward to the external sentiment service, replace the
//! dashboard view state with the normalized result, and broadcast
//! lifecycle events for SSE subscribers.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use sentiscope_common::events::{AnalysisSource, DashboardEvent};
use sentiscope_common::model::AnalysisResult;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    services::BackendError,
    AppState,
};

/// POST /api/analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/analyze
///
/// Classify a single text. The one-record response is normalized into
/// the batch shape so the UI treats both paths identically.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    state.event_bus.emit(DashboardEvent::AnalysisStarted {
        request_id,
        source: AnalysisSource::Text,
        timestamp: Utc::now(),
    });

    let record = match state.client.analyze(&request.text).await {
        Ok(record) => record,
        Err(err) => return Err(fail(&state, request_id, err).await),
    };

    let result = AnalysisResult::single(record);
    complete(&state, request_id, &result).await;

    Ok(Json(result))
}

/// POST /api/analyze-batch
///
/// Accept a CSV upload and forward it to the sentiment service. Only the
/// file extension is checked here; the text-column requirement is enforced
/// by the service and its error message is surfaced as-is.
pub async fn analyze_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalysisResult>> {
    let (file_name, contents) = read_file_part(&mut multipart).await?;

    if !file_name.ends_with(".csv") {
        return Err(ApiError::BadRequest(
            "Only CSV files are supported".to_string(),
        ));
    }
    if contents.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    state.event_bus.emit(DashboardEvent::AnalysisStarted {
        request_id,
        source: AnalysisSource::Csv,
        timestamp: Utc::now(),
    });

    let batch = match state.client.analyze_batch(&file_name, contents).await {
        Ok(batch) => batch,
        Err(err) => return Err(fail(&state, request_id, err).await),
    };

    let result = AnalysisResult::from_batch(batch.results, batch.summary);
    complete(&state, request_id, &result).await;

    Ok(Json(result))
}

/// Extract the `file` part (name and contents) from the multipart body
async fn read_file_part(multipart: &mut Multipart) -> ApiResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .ok_or_else(|| ApiError::BadRequest("File part has no filename".to_string()))?
            .to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?
            .to_vec();
        return Ok((file_name, contents));
    }

    Err(ApiError::BadRequest("Missing file upload".to_string()))
}

/// Replace the view state with the new result, clear the diagnostic
/// error, and broadcast completion
async fn complete(state: &AppState, request_id: Uuid, result: &AnalysisResult) {
    state.view.write().await.replace_result(result.clone());
    *state.last_error.write().await = None;

    state.event_bus.emit(DashboardEvent::AnalysisCompleted {
        request_id,
        summary: result.summary,
        timestamp: Utc::now(),
    });
}

/// Record the failure for diagnostics and broadcast it. Prior view state
/// is left untouched.
async fn fail(state: &AppState, request_id: Uuid, err: BackendError) -> ApiError {
    let api_error = ApiError::from(err);
    let message = api_error.to_string();

    tracing::error!("Analysis request failed: {}", message);
    *state.last_error.write().await = Some(message.clone());

    state.event_bus.emit(DashboardEvent::AnalysisFailed {
        request_id,
        message,
        timestamp: Utc::now(),
    });

    api_error
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze_text))
        .route("/api/analyze-batch", post(analyze_batch))
}
