//! Health check DTOs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-01-01T12:00:00Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Time of the check (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    /// Per-component results keyed by component name
    pub checks: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// The worse of two statuses
    pub fn combine(self, other: HealthStatus) -> HealthStatus {
        match (self, other) {
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        }
    }
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "Connected")]
    pub message: Option<String>,
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}
