//! # teamroster-api
//!
//! HTTP API layer for TeamRoster built on Axum.
//!
//! Provides the member search endpoints, health check, middleware (request
//! logging, CORS, compression), query extractors, response DTOs, and the
//! mapping from `AppError` to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
