//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    /// Create a new server with the given settings and the environment they
    /// were loaded for
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// Applies pending migrations first when `database.auto_migrate` is set,
    /// then opens the pool, binds the listener and serves until a shutdown
    /// signal arrives.
    ///
    /// # Returns
    /// Returns Ok(()) on successful shutdown, or error on startup failure
    ///
    /// # Errors
    /// - Migration failures
    /// - Database connection pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        // Log application startup information
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment.as_str(),
            "Application starting"
        );

        // Log server configuration
        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        // Log database configuration (without sensitive URL details)
        tracing::info!(
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            "Database configuration loaded"
        );

        // Log logger configuration
        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        tracing::info!(
            default_role_id = %self.settings.employees.default_role_id,
            cors_origins = %self.settings.cors.allowed_origins.len(),
            "Employee configuration loaded"
        );

        tracing::info!("Configuration loaded successfully");

        if self.settings.database.auto_migrate {
            let applied = run_pending_migrations(&self.settings.database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Pending migrations applied");
        }

        // Initialize database connection pool
        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");

        // Create application state with services
        let state = AppState::new(pool, &self.settings.employees);
        tracing::info!("Application state created");

        // Create router with all routes and middleware
        let router = create_router(
            state,
            &self.settings.cors,
            Duration::from_secs(self.settings.server.request_timeout),
        );
        tracing::info!("Router configured");

        // Bind to the configured address
        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        // Start the server with graceful shutdown
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// This function returns when either signal is received, allowing
/// the server to perform graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
