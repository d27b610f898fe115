//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// What the caller should do once a command has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Start the HTTP server with the merged settings
    StartServer,
    /// The command finished; exit
    Done,
}

/// Execute a CLI command with merged, validated settings.
///
/// Serving is not started here: a plain `serve` (or no subcommand) returns
/// [`CommandOutcome::StartServer`] and the caller runs the server.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<CommandOutcome> {
    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).validate_only().await?;
            Ok(CommandOutcome::Done)
        }
        Some(Commands::Serve { .. }) | None => Ok(CommandOutcome::StartServer),
        Some(Commands::Migrate { dry_run, rollback }) => {
            if let Some(steps) = rollback
                && *steps > 50
            {
                tracing::warn!(
                    steps,
                    "Rolling back many migrations at once; consider smaller steps"
                );
            }
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(CommandOutcome::Done)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["hrms-rs", "serve", "--dry-run"]).unwrap();
        let outcome = execute_command(&cli, create_valid_config()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Done);
    }

    #[tokio::test]
    async fn test_execute_serve_starts_server() {
        let cli = Cli::try_parse_from(["hrms-rs", "serve"]).unwrap();
        let outcome = execute_command(&cli, create_valid_config()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::StartServer);
    }

    #[tokio::test]
    async fn test_no_subcommand_starts_server() {
        let cli = Cli::try_parse_from(["hrms-rs"]).unwrap();
        let outcome = execute_command(&cli, create_valid_config()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::StartServer);
    }

    #[tokio::test]
    async fn test_dry_run_reports_invalid_config() {
        let cli = Cli::try_parse_from(["hrms-rs", "serve", "--dry-run"]).unwrap();
        let mut config = create_valid_config();
        config.employees.default_role_id = 0;
        assert!(execute_command(&cli, config).await.is_err());
    }
}
