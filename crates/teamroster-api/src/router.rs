//! Route definitions for the TeamRoster HTTP API.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// All routes, with state applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(member_routes())
        .nest("/api", health_routes())
        .with_state(state)
}

/// Member search, unpaged (v1) and paged (v2)
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/members", get(handlers::member::search_members_v1))
        .route("/v2/members", get(handlers::member::search_members_v2))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
