//! Response envelope shared by every API endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope.
///
/// Successful responses carry `data`; failures carry `errors` with one
/// human-readable entry per problem.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "success": false,
    "message": "Invalid data",
    "data": null,
    "errors": ["cccd: CCCD must be exactly 12 digits"]
}))]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Successful response wrapping `data`
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Failed response with a summary message and detail entries
    pub fn error(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}
