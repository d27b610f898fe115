//! Runtime configuration types for the logger

use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::logger::LoggerError;

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Level or full `EnvFilter` directive for the crate, e.g. `info`
    pub level: String,
}

impl LoggerConfig {
    /// Create a new logger configuration with validation
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ))),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors, only honored when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
    pub rotation: RotationConfig,
}

impl FileConfig {
    pub fn new(
        enabled: bool,
        path: PathBuf,
        append: bool,
        format: LogFormat,
        rotation: RotationConfig,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            enabled,
            path,
            append,
            format,
            rotation,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pure validation; the writer creates missing directories on startup.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.enabled {
            if self.path.as_os_str().is_empty() {
                return Err(LoggerError::config(
                    "File path cannot be empty when file output is enabled",
                ));
            }
            self.rotation.validate()?;
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/hrms.log"),
            append: true,
            format: LogFormat::Json,
            rotation: RotationConfig::default(),
        }
    }
}

/// File log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

/// File rotation configuration
#[derive(Debug, Clone)]
pub struct RotationConfig {
    pub strategy: RotationStrategy,
    /// Size threshold in bytes, used by the `Size` strategy
    pub max_size: u64,
    /// Rotated archives to keep next to the live file
    pub max_files: usize,
    pub compress: bool,
}

impl RotationConfig {
    pub fn new(
        strategy: RotationStrategy,
        max_size: u64,
        max_files: usize,
        compress: bool,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            strategy,
            max_size,
            max_files,
            compress,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.max_size == 0 {
            return Err(LoggerError::config("Maximum file size must be greater than 0"));
        }
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "Maximum number of files must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::Size,
            max_size: 10 * 1024 * 1024,
            max_files: 5,
            compress: false,
        }
    }
}

/// When the live log file is rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationStrategy {
    /// Once the file reaches `max_size` bytes
    #[default]
    Size,
    /// When the local calendar day changes
    Daily,
    /// When the local hour changes
    Hourly,
}

impl FromStr for RotationStrategy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" => Ok(RotationStrategy::Size),
            "daily" | "time" => Ok(RotationStrategy::Daily),
            "hourly" => Ok(RotationStrategy::Hourly),
            _ => Err(LoggerError::config(format!(
                "Invalid rotation strategy '{}'. Valid strategies are: size, daily, hourly",
                s
            ))),
        }
    }
}
