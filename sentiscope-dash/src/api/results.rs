//! Filtered results endpoint
//!
//! GET /api/results returns the current analysis result narrowed to the
//! selected filter category. A `filter` query parameter both selects the
//! view for this response and is remembered as the current filter.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use sentiscope_common::model::{AnalysisRecord, FilterCategory, Summary};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// GET /api/results query parameters
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub filter: Option<FilterCategory>,
}

/// GET /api/results response
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    /// Filter the results below were narrowed with
    pub filter: FilterCategory,
    /// Summary over the full (unfiltered) result
    pub summary: Summary,
    /// Number of records visible under the filter
    pub matched: usize,
    pub results: Vec<AnalysisRecord>,
}

/// GET /api/results
///
/// 404 until the first analysis of the session has completed.
pub async fn get_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Json<ResultsResponse>> {
    let mut view = state.view.write().await;

    if let Some(filter) = query.filter {
        view.select_filter(filter);
    }

    let summary = match &view.result {
        Some(result) => result.summary,
        None => {
            return Err(ApiError::NotFound(
                "No analysis has been run yet".to_string(),
            ))
        }
    };

    let results = view.filtered();

    Ok(Json(ResultsResponse {
        filter: view.filter,
        summary,
        matched: results.len(),
        results,
    }))
}

/// Build results routes
pub fn results_routes() -> Router<AppState> {
    Router::new().route("/api/results", get(get_results))
}
