//! Axum HTTP API server.
//!
//! This crate provides:
//! - Text-to-video and image-to-video submission endpoints
//! - Job polling, gallery listing and the style catalog
//! - The background completion simulator
//! - Security headers, request IDs and Prometheus metrics

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::CompletionSimulator;
pub use state::AppState;
