//! Serve command handler
//!
//! Server startup itself lives in [`crate::server::Server`]; this handler
//! covers `serve --dry-run`.

use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate the configuration and report what the server would do.
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: max {} connection(s), auto-migrate {}",
            self.config.database.max_connections,
            if self.config.database.auto_migrate { "on" } else { "off" }
        );
        println!(
            "✓ New employees default to role {}",
            self.config.employees.default_role_id
        );
        if self.config.cors.allowed_origins.is_empty() {
            println!("✓ CORS: any origin");
        } else {
            println!("✓ CORS: {}", self.config.cors.allowed_origins.join(", "));
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
