//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between
//! repositories and handlers.

mod employee_service;

pub use employee_service::EmployeeService;

use crate::config::EmployeesConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; services share their stores behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub employees: EmployeeService,
}

impl Services {
    pub fn new(repos: Repositories, employees_config: &EmployeesConfig) -> Self {
        Self {
            employees: EmployeeService::new(
                repos.employees,
                repos.roles,
                repos.departments,
                employees_config.default_role_id,
            ),
        }
    }
}
