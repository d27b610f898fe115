//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API as an [`ApiResponse`] envelope with
//! `success: false`, a summary `message` and the detail lines in `errors`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::ApiResponse;
use crate::error::AppError;

/// User-facing summary for a duplicate value
fn duplicate_message(field: &str) -> String {
    match field {
        "email" => "Email already exists".to_string(),
        "cccd" => "CCCD already exists".to_string(),
        "tax_code" => "Tax code already exists".to_string(),
        other => format!("Duplicate value for {}", other),
    }
}

/// User-facing summary for a business-rule failure on one field
fn validation_message(field: &str, reason: &str) -> String {
    match field {
        "role_id" => "Role not found".to_string(),
        "department_id" => "Department not found".to_string(),
        _ => reason.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the failure envelope for an error.
pub fn error_envelope(error: &AppError) -> ApiResponse<()> {
    match error {
        AppError::NotFound { entity, value, .. } => {
            let entity = capitalize(entity);
            ApiResponse::error(
                format!("{} not found", entity),
                vec![format!("{} with ID {} does not exist", entity, value)],
            )
        }
        AppError::Duplicate { field, .. } => {
            let message = duplicate_message(field);
            ApiResponse::error(message.clone(), vec![message])
        }
        AppError::Validation { field, reason } => {
            ApiResponse::error(validation_message(field, reason), vec![reason.clone()])
        }
        AppError::ValidationErrors { errors } => ApiResponse::error(
            "Invalid data",
            errors.iter().map(ToString::to_string).collect(),
        ),
        AppError::BadRequest { message } => {
            ApiResponse::error("Invalid request", vec![message.clone()])
        }
        AppError::ConnectionPool { .. } => ApiResponse::error(
            "Service temporarily unavailable",
            vec!["Database connection unavailable".to_string()],
        ),
        AppError::Database { source, .. }
        | AppError::Configuration { source, .. }
        | AppError::Internal { source } => ApiResponse::error(
            "An internal error occurred",
            vec![format!("{}: {:#}", error, source)],
        ),
    }
}

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate, Validation, ValidationErrors, BadRequest → 400 BAD_REQUEST
    /// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    ///
    /// Server-side failures keep a generic message; the error and its
    /// source chain go in `errors`.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(error_envelope(&self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            _ => rejection.body_text(),
        };
        AppError::BadRequest { message }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Rewrites error responses that are not already JSON (unknown routes,
/// method mismatches, framework rejections) into the envelope.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, 64 * 1024)
        .await
        .unwrap_or_default();
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let message = match status {
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        s if s.is_server_error() => "An internal error occurred",
        _ => "Invalid request",
    };
    let errors = if original_message.is_empty() {
        Vec::new()
    } else {
        vec![original_message]
    };

    (status, Json(ApiResponse::<()>::error(message, errors))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn duplicate(field: &str) -> AppError {
        AppError::Duplicate {
            entity: "employee".to_string(),
            field: field.to_string(),
            value: "x".to_string(),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                AppError::NotFound {
                    entity: "employee".into(),
                    field: "id".into(),
                    value: "1".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (duplicate("email"), StatusCode::BAD_REQUEST),
            (
                AppError::Validation {
                    field: "role_id".into(),
                    reason: "Role with ID 9 does not exist".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ValidationErrors { errors: Vec::new() },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::BadRequest {
                    message: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Database {
                    operation: "insert employee".into(),
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("unexpected"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_to_status_code(&error), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_duplicate_messages() {
        assert_eq!(error_envelope(&duplicate("email")).message, "Email already exists");
        assert_eq!(error_envelope(&duplicate("cccd")).message, "CCCD already exists");
        assert_eq!(
            error_envelope(&duplicate("tax_code")).message,
            "Tax code already exists"
        );
    }

    #[test]
    fn test_reference_validation_messages() {
        let role = AppError::Validation {
            field: "role_id".into(),
            reason: "Role with ID 9 does not exist".into(),
        };
        let envelope = error_envelope(&role);
        assert_eq!(envelope.message, "Role not found");
        assert_eq!(
            envelope.errors,
            Some(vec!["Role with ID 9 does not exist".to_string()])
        );

        let department = AppError::Validation {
            field: "department_id".into(),
            reason: "Department with ID 5 does not exist".into(),
        };
        assert_eq!(error_envelope(&department).message, "Department not found");
    }

    #[tokio::test]
    async fn test_not_found_response_body() {
        let response = AppError::NotFound {
            entity: "employee".into(),
            field: "id".into(),
            value: "42".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Employee not found");
        assert_eq!(body["errors"][0], "Employee with ID 42 does not exist");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_validation_errors_response_lists_each_field() {
        let response = AppError::ValidationErrors {
            errors: vec![
                ValidationFieldError {
                    field: "cccd".into(),
                    message: "CCCD must be exactly 12 digits".into(),
                },
                ValidationFieldError {
                    field: "email".into(),
                    message: "Invalid email address".into(),
                },
            ],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["errors"][0], "cccd: CCCD must be exactly 12 digits");
        assert_eq!(body["errors"][1], "email: Invalid email address");
    }

    #[tokio::test]
    async fn test_internal_error_carries_source_detail() {
        let response = AppError::Database {
            operation: "insert employee".into(),
            source: anyhow::Error::from(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::Unknown,
                Box::new("relation \"employee\" does not exist".to_string()),
            )),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal error occurred");
        let detail = body["errors"][0].as_str().unwrap();
        assert!(detail.starts_with("Database operation failed: insert employee"));
        assert!(detail.contains("relation \"employee\" does not exist"));
    }

    #[tokio::test]
    async fn test_internal_error_includes_context_chain() {
        let source = anyhow::anyhow!("connection reset").context("read statistics");
        let body = body_json(AppError::Internal { source }.into_response()).await;
        assert_eq!(body["errors"][0], "Internal error: read statistics: connection reset");
    }
}
