//! Configuration management
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `HRMS_*` environment variables, `__` separating nested keys

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, CorsConfig, DatabaseConfig, EmployeesConfig,
    FileSettings, LoggerSettings, RotationSettings, ServerConfig, Settings,
};
