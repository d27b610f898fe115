//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations.

use crate::config::settings::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// # Errors
    /// - Invalid database configuration
    /// - Connection or migration failures
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations().await,
            (false, Some(steps)) => self.rollback_migrations(steps).await,
            (false, None) => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = pending_migrations(&self.config.database.url).await?;
        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(&self.config.database.url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
            tracing::info!(count = applied.len(), "Database migration completed");
        }

        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {} migration(s)...", steps);

        let reverted = revert_migrations(&self.config.database.url, steps).await?;
        if reverted.is_empty() {
            println!("✓ No applied migrations to roll back");
        } else {
            for version in &reverted {
                println!("  - reverted {}", version);
            }
            if reverted.len() < steps as usize {
                println!(
                    "Only {} of {} requested migration(s) were applied; all have been reverted",
                    reverted.len(),
                    steps
                );
            }
            tracing::info!(count = reverted.len(), "Database rollback completed");
        }

        Ok(())
    }
}
