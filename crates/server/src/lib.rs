//! HTTP API server for the filecat file catalog.
//!
//! This crate wraps the record registry in a small REST surface:
//! - File CRUD and exact-match filtering under `/files`
//! - JSON or plain-text response encoding
//! - Health check and Prometheus metrics

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
