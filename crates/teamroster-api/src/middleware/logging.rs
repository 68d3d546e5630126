//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Logs request method, path, query, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_client_error() {
        warn!(
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            status = status.as_u16(),
            duration_ms,
            "HTTP request rejected"
        );
    } else {
        info!(
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        );
    }

    response
}
