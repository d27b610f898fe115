//! Command-line interface: argument parsing, configuration merging and
//! the serve/migrate command handlers.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::{CommandOutcome, execute_command};
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;
use crate::logger::init_logger;

/// Load configuration files, apply CLI overrides and validate the result.
///
/// Also returns the environment whose config layer was loaded.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, crate::config::Environment)> {
    let merger = ConfigurationMerger::from_cli(cli).context("Configuration error")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Configuration merge error")?;
    Ok((settings, merger.environment()))
}

/// Initialize the global logger from the `[logger]` settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(&logger_config).context("Logger initialization error")
}
