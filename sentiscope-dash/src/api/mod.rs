//! HTTP API handlers for sentiscope-dash

pub mod analyze;
pub mod health;
pub mod results;
pub mod sse;
pub mod ui;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use results::results_routes;
pub use sse::event_stream;
pub use ui::ui_routes;
