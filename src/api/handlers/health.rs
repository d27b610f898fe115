//! Health check endpoint handlers.
//!
//! Used by monitoring and load balancers. The database check goes straight
//! to the connection pool rather than through the service layer.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::HashMap;
use std::time::Instant;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Detailed health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Detailed health check including database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_check = check_database(&state.db_pool).await;
    let status = HealthStatus::Healthy.combine(db_check.status);

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), db_check);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (code, Json(response))
}

/// Readiness probe: ready only when the database answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state.db_pool).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe. Does not touch external dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(pool: &AsyncDbPool) -> ComponentHealth {
    let start_time = Instant::now();
    let elapsed_ms = || Some(start_time.elapsed().as_millis() as u64);

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: elapsed_ms(),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Database health query failed");
                    ComponentHealth {
                        status: HealthStatus::Unhealthy,
                        message: Some(format!("Query failed: {}", e)),
                        response_time_ms: elapsed_ms(),
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database connection unavailable for health check");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Connection failed: {}", e)),
                response_time_ms: elapsed_ms(),
            }
        }
    }
}
