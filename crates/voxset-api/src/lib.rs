//! Axum HTTP API server.
//!
//! This crate provides:
//! - The process-audio pipeline endpoint and dataset listing endpoints
//! - Request validation, rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{Library, PipelineError};
pub use state::AppState;
