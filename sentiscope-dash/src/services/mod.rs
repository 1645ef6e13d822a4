//! External service clients

pub mod backend_client;

pub use backend_client::{BackendError, BatchResponse, SentimentClient};
