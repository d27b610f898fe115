//! Router configuration for the API.
//!
//! This module provides centralized route registration, OpenAPI
//! documentation and middleware configuration for the application.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::CorsConfig;
use crate::state::AppState;

/// Builds the CORS layer. No configured origins means any origin is allowed.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Requests running longer than `timeout` are answered with 408.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS and compression
/// 2. Request ID middleware - generates/propagates request IDs
/// 3. Logging middleware - logs requests with request IDs
/// 4. Global error handler - wraps non-JSON error responses in the envelope
/// 5. Request timeout (`server.request_timeout`), inside the error handler so
///    a 408 is enveloped too
///
/// # Routes
/// - `/api/employees` - Employee management
/// - `/health` - Health probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, cors: &CorsConfig, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::employees::employee_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(timeout_layer(request_timeout))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors_layer(cors))
        .with_state(state)
}
