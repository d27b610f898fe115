use crate::config::ConfigError;
use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;

/// A single field-level format error collected by the request extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Business-rule failures (`Duplicate`, `Validation`, `NotFound`) carry enough
/// structure for the HTTP layer to build a user-facing message; store and
/// unexpected failures carry an `anyhow` source for diagnostics.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Business-rule validation error on a single field
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Format validation errors, one entry per failed field rule
    #[error("Validation failed with {} error(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::FileNotFound(path) => path.clone(),
            ConfigError::ValidationError { field, .. } => field.clone(),
            ConfigError::EnvVarError(var) => var.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
