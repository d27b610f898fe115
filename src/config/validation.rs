//! Validation rules for loaded settings

use crate::config::error::ConfigError;
use crate::config::settings::{
    CorsConfig, DatabaseConfig, EmployeesConfig, FileSettings, LoggerSettings, ServerConfig,
    Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_ROTATION_STRATEGIES: &[&str] = &["size", "time", "daily", "hourly"];

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a PostgreSQL connection string
    /// - Pool bounds must be positive and `min <= max`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl CorsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for origin in &self.allowed_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    field: "cors.allowed_origins".to_string(),
                    message: format!("Origin '{}' must start with http:// or https://", origin),
                });
            }
        }
        Ok(())
    }
}

impl EmployeesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_role_id <= 0 {
            return Err(ConfigError::validation(
                "employees.default_role_id",
                "Default role id must be a positive role identifier.",
            ));
        }
        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if !VALID_ROTATION_STRATEGIES.contains(&self.rotation.strategy.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.rotation.strategy".to_string(),
                message: format!(
                    "Invalid rotation strategy '{}'. Valid strategies are: {}",
                    self.rotation.strategy,
                    VALID_ROTATION_STRATEGIES.join(", ")
                ),
            });
        }

        if self.enabled && (self.rotation.max_size == 0 || self.rotation.max_files == 0) {
            return Err(ConfigError::validation(
                "logger.file.rotation",
                "Rotation max_size and max_files must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// Level names are matched case-insensitively. At least one output must be enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all sections, returning the first error encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.cors.validate()?;
        self.employees.validate()?;
        Ok(())
    }
}
