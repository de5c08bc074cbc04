//! HTTP adapter for the local deployment
//!
//! Axum server with:
//! - CORS restricted to the configured origins
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use server::{build_router, cors_layer, run_server, AppState, ServerConfig, ServerError};
