//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override file-based configuration, which in turn is
//! overridden by nothing: the merged result is validated before use.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment as AppEnvironment, settings::Settings};

/// Applies CLI overrides on top of a loaded configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: AppEnvironment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self {
            base_config,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Load the base configuration the CLI asks for.
    ///
    /// `--config` replaces the layered files; `--env` picks the environment
    /// layer. Validation is deferred to [`ConfigurationMerger::merge_cli_args`]
    /// so CLI overrides can fix values the files leave invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_loader(Self::configure_loader(ConfigLoader::new()?, cli))
    }

    fn configure_loader(mut loader: ConfigLoader, cli: &Cli) -> ConfigLoader {
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        loader
    }

    fn from_loader(loader: ConfigLoader) -> Result<Self, ConfigError> {
        Ok(Self {
            base_config: loader.load_unvalidated()?,
            environment: loader.environment(),
        })
    }

    /// Merge CLI arguments into the base configuration and validate the result.
    ///
    /// Precedence, highest first: subcommand flags, global flags, files.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);
        if let Some(command) = &cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                if let Some(level) = log_level {
                    config.logger.level = level.as_str().to_string();
                }
            }
            Commands::Migrate { .. } => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }

    /// Environment whose config layer was loaded
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }
}
