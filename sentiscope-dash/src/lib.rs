//! sentiscope-dash library - Sentiment Analytics Dashboard
//!
//! Exposes the application state and router for integration testing.

use axum::Router;
use chrono::{DateTime, Utc};
use sentiscope_common::events::EventBus;
use sentiscope_common::viewmodel::ViewState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::services::SentimentClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the external sentiment analysis service
    pub client: SentimentClient,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Latest analysis result and current filter selection
    pub view: Arc<RwLock<ViewState>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last upstream failure, reported by the health endpoint
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(client: SentimentClient, event_bus: EventBus) -> Self {
        Self {
            client,
            event_bus,
            view: Arc::new(RwLock::new(ViewState::default())),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::analyze_routes())
        .merge(api::results_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
