//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// HRMS employee service
#[derive(Parser, Debug)]
#[command(name = "hrms-rs")]
#[command(about = "Human resource management REST API")]
#[command(long_about = "
hrms-rs serves the HRMS REST API: employee records with paging and search,
uniqueness probes for the admin forms, and workforce statistics, backed by
PostgreSQL with embedded schema migrations.

EXAMPLES:
    # Start the server with default configuration
    hrms-rs serve

    # Start server on custom host and port
    hrms-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    hrms-rs --config /etc/hrms/production.toml serve

    # Check configuration without starting server
    hrms-rs serve --dry-run

    # Apply the schema, or preview what would be applied
    hrms-rs migrate
    hrms-rs migrate --dry-run

    # Rollback the last migration
    hrms-rs migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files under config/.
    /// HRMS_* environment variables still apply on top of it.
    ///
    /// Example: --config /etc/hrms/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which config/{env}.toml layer is loaded.
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum, env = "HRMS_APP_ENV")]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   hrms-rs serve                           # Start with defaults
    ///   hrms-rs serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   hrms-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (default: 5000)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   hrms-rs migrate                    # Apply all pending migrations
    ///   hrms-rs migrate --dry-run          # Show pending migrations without applying
    ///   hrms-rs migrate --rollback 1       # Revert the most recent migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1 to 100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
