//! Configuration settings structures for hrms-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{
    ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig, RotationStrategy,
};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "hrms-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}


fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/hrms.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation_strategy() -> String {
    "size".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

fn default_role_id() -> i32 {
    4
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection checkout timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Run pending embedded migrations before serving
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// CORS Configuration
// ============================================================================

/// Cross-origin settings for the administrative frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// ============================================================================
// Employee Rules Configuration
// ============================================================================

/// Business settings for the employee service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeesConfig {
    /// Role assigned when a new employee is created without one (or with 0)
    #[serde(default = "default_role_id")]
    pub default_role_id: i32,
}

impl Default for EmployeesConfig {
    fn default() -> Self {
        Self {
            default_role_id: default_role_id(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// Rotation settings for file logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Rotation strategy: "size", "daily" or "hourly"
    #[serde(default = "default_rotation_strategy")]
    pub strategy: String,

    /// Maximum file size in bytes before rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Maximum number of rotated files to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Whether to gzip rotated files
    #[serde(default)]
    pub compress: bool,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            strategy: default_rotation_strategy(),
            max_size: default_max_size(),
            max_files: default_max_files(),
            compress: false,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub rotation: RotationSettings,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
            rotation: RotationSettings::default(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime [`LoggerConfig`]
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e.to_string()))?;
        let rotation = self.rotation.into_rotation_config()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format, rotation)
            .map_err(|e| ConfigError::validation("logger.file".to_string(), e.to_string()))
    }
}

impl RotationSettings {
    pub fn into_rotation_config(self) -> Result<RotationConfig, ConfigError> {
        let strategy = self.strategy.parse::<RotationStrategy>().map_err(|e| {
            ConfigError::validation("logger.file.rotation.strategy".to_string(), e.to_string())
        })?;

        RotationConfig::new(strategy, self.max_size, self.max_files, self.compress)
            .map_err(|e| ConfigError::validation("logger.file.rotation".to_string(), e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub employees: EmployeesConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            1u64..=300u64,
        )
            .prop_map(|(host, port, request_timeout)| ServerConfig {
                host,
                port,
                request_timeout,
            })
    }

    fn arb_database_config() -> impl Strategy<Value = DatabaseConfig> {
        (
            prop_oneof![
                Just("postgres://localhost/hrms".to_string()),
                Just("postgres://hrms:secret@db:5432/hrms".to_string()),
            ],
            1u32..=100u32,
            1u32..=10u32,
            1u64..=120u64,
            any::<bool>(),
        )
            .prop_map(|(url, max_connections, min_connections, connection_timeout, auto_migrate)| {
                DatabaseConfig {
                    url,
                    max_connections,
                    min_connections: min_connections.min(max_connections),
                    connection_timeout,
                    auto_migrate,
                }
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![Just("debug"), Just("info"), Just("warn"), Just("error")],
            any::<(bool, bool)>(),
            any::<(bool, bool)>(),
            prop_oneof![Just("json"), Just("full"), Just("compact")],
            prop_oneof![Just("size"), Just("daily"), Just("hourly")],
            1024u64..=100_000_000u64,
            1usize..=20usize,
            any::<bool>(),
        )
            .prop_map(
                |(level, (console_enabled, colored), (file_enabled, append), format, strategy, max_size, max_files, compress)| {
                    LoggerSettings {
                        level: level.to_string(),
                        console: ConsoleSettings {
                            enabled: console_enabled,
                            colored,
                        },
                        file: FileSettings {
                            enabled: file_enabled,
                            path: "logs/hrms.log".to_string(),
                            append,
                            format: format.to_string(),
                            rotation: RotationSettings {
                                strategy: strategy.to_string(),
                                max_size,
                                max_files,
                                compress,
                            },
                        },
                    }
                },
            )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            "[a-z][a-z0-9-]{0,20}",
            arb_server_config(),
            arb_database_config(),
            arb_logger_settings(),
            proptest::collection::vec("https?://[a-z]{1,10}\\.example", 0..3),
            1i32..=10,
        )
            .prop_map(|(name, server, database, logger, allowed_origins, default_role_id)| Settings {
                application: ApplicationConfig {
                    name,
                    version: "1.2.3".to_string(),
                },
                server,
                database,
                logger,
                cors: CorsConfig { allowed_origins },
                employees: EmployeesConfig { default_role_id },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_settings_round_trip_through_toml(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).expect("Settings should serialize to TOML");
            let deserialized: Settings = toml::from_str(&toml_str).expect("TOML should deserialize");
            prop_assert_eq!(settings, deserialized);
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "hrms-rs");
        assert_eq!(settings.application.version, crate::pkg_version());
        assert_eq!(settings.server.address(), "127.0.0.1:5000");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.logger.level, "info");
        assert!(settings.cors.allowed_origins.is_empty());
        assert_eq!(settings.employees.default_role_id, 4);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
            [server]
            port = 8080

            [employees]
            default_role_id = 2
        "#;

        let settings: Settings = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.employees.default_role_id, 2);
        assert_eq!(settings.application.name, "hrms-rs");
    }

    #[test]
    fn test_settings_deserialize_cors() {
        let toml_str = r#"
            [cors]
            allowed_origins = ["http://localhost:5173", "https://hr.example.com"]
        "#;
        let settings: Settings = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(settings.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_logger_settings_into_logger_config_with_file() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: true,
                path: "logs/app.log".to_string(),
                append: true,
                format: "compact".to_string(),
                rotation: RotationSettings {
                    strategy: "hourly".to_string(),
                    max_size: 5 * 1024 * 1024,
                    max_files: 10,
                    compress: true,
                },
            },
        };

        let config = settings.into_logger_config().expect("Should convert");

        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert_eq!(config.file.path, PathBuf::from("logs/app.log"));
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.rotation.strategy, RotationStrategy::Hourly);
        assert_eq!(config.file.rotation.max_files, 10);
        assert!(config.file.rotation.compress);
    }

    #[test]
    fn test_invalid_rotation_strategy_names_field() {
        let settings = RotationSettings {
            strategy: "weekly".to_string(),
            ..Default::default()
        };
        match settings.into_rotation_config() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "logger.file.rotation.strategy")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_names_field() {
        let settings = FileSettings {
            format: "xml".to_string(),
            ..Default::default()
        };
        match settings.into_file_config() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "logger.file.format"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_both_outputs_disabled_rejected() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }
}
