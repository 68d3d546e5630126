//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// With the PostgreSQL backend the pool is pinged; an unreachable database
/// answers 503 with `status = "degraded"`.
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database = match &state.database {
        None => "not_used",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "connected",
            Ok(false) => "unreachable",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "unreachable"
            }
        },
    };

    let healthy = database != "unreachable";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.config.database.backend.to_string(),
        database: database.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    };

    (status, Json(ApiResponse::ok(body)))
}
