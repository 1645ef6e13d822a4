//! # SentiScope Common Library
//!
//! Shared code for the SentiScope dashboard including:
//! - Data model for analysis records and summaries
//! - Result aggregation and filtering view-model
//! - Event types (DashboardEvent enum) and EventBus
//! - Configuration resolution
//! - Error types

pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod viewmodel;

pub use error::{Error, Result};
pub use model::{AnalysisRecord, AnalysisResult, FilterCategory, Sentiment, Summary};
