//! Logging middleware for request/response tracing.
//!
//! Logs incoming requests and outgoing responses with timing information,
//! correlated through the request ID.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, info, span};

use super::RequestId;

/// Middleware that logs request and response information.
///
/// Everything the downstream handlers log is recorded inside the
/// `http_request` span, so it carries the method, URI and request ID.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id
    );

    async move {
        info!(method = %method, path = %uri.path(), "Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed();

        info!(
            status = %response.status().as_u16(),
            duration_ms = %duration.as_millis(),
            "Response sent"
        );

        response
    }
    .instrument(span)
    .await
}
