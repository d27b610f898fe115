//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::EmployeesConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, used by health checks
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Creates the state with PostgreSQL-backed repositories on `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, &settings.employees);
    /// ```
    pub fn new(pool: AsyncDbPool, employees_config: &EmployeesConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        Self::with_repositories(pool, repos, employees_config)
    }

    /// Creates the state over an explicit set of stores.
    pub fn with_repositories(
        pool: AsyncDbPool,
        repos: Repositories,
        employees_config: &EmployeesConfig,
    ) -> Self {
        Self {
            services: Services::new(repos, employees_config),
            db_pool: pool,
        }
    }
}
