//! Event types for the SentiScope event system
//!
//! Events are broadcast via [`EventBus`] and serialized for SSE
//! transmission to connected browsers.

use crate::model::Summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Where an analysis request originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Single text submitted from the text card
    Text,
    /// CSV batch upload
    Csv,
}

/// Dashboard lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// An analysis request was accepted and sent upstream
    AnalysisStarted {
        request_id: Uuid,
        source: AnalysisSource,
        timestamp: DateTime<Utc>,
    },

    /// Upstream response received; view state replaced with the new result
    AnalysisCompleted {
        request_id: Uuid,
        summary: Summary,
        timestamp: DateTime<Utc>,
    },

    /// Upstream call failed; prior view state left untouched
    AnalysisFailed {
        request_id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Event name used for the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::AnalysisStarted { .. } => "AnalysisStarted",
            DashboardEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
            DashboardEvent::AnalysisFailed { .. } => "AnalysisFailed",
        }
    }
}

/// Broadcast-channel fan-out for SSE subscribers
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Create an EventBus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers.
    ///
    /// Zero subscribers is normal when no browser is connected.
    pub fn emit(&self, event: DashboardEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("No SSE subscribers; event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = DashboardEvent::AnalysisCompleted {
            request_id: Uuid::new_v4(),
            summary: Summary {
                total: 2,
                positive: 1,
                negative: 0,
                neutral: 1,
            },
            timestamp: Utc::now(),
        };

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "AnalysisCompleted");
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(event.event_type(), "AnalysisCompleted");
    }

    #[tokio::test]
    async fn event_bus_delivers_to_subscribers() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit(DashboardEvent::AnalysisStarted {
            request_id: Uuid::new_v4(),
            source: AnalysisSource::Csv,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "AnalysisStarted");
    }

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(8);
        bus.emit(DashboardEvent::AnalysisFailed {
            request_id: Uuid::new_v4(),
            message: "service unreachable".to_string(),
            timestamp: Utc::now(),
        });
    }
}
