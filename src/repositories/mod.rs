//! Repository layer for data access operations.
//!
//! Services depend on the store traits below rather than on Diesel directly,
//! so business rules can run against [`memory::MemoryStore`] in tests.

mod department_repo;
mod employee_repo;
#[cfg(test)]
pub mod memory;
mod role_repo;

pub use department_repo::DepartmentRepository;
pub use employee_repo::EmployeeRepository;
pub use role_repo::RoleRepository;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Employee, EmployeeDetail, EmployeeFilter, NewEmployee, Point};

/// Persistence operations on the employee aggregate.
///
/// Read paths return `Option` for missing rows; store failures surface as
/// `AppError` without retries.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employee row without relations
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// Employee with role and department names flattened in
    async fn find_detail(&self, id: i32) -> AppResult<Option<EmployeeDetail>>;

    /// One page of filtered employees ordered by id, plus the filtered total
    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<EmployeeDetail>, i64)>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn cccd_exists(&self, cccd: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn tax_code_exists(&self, tax_code: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    async fn count_total(&self) -> AppResult<i64>;

    async fn count_active(&self) -> AppResult<i64>;

    /// Counts keyed by status; NULL status is counted under `"unknown"`
    async fn count_by_status(&self) -> AppResult<BTreeMap<String, i64>>;

    /// Counts keyed by department name; no department is `"No Department"`
    async fn count_by_department(&self) -> AppResult<BTreeMap<String, i64>>;

    /// Insert the employee and its zero point balance atomically
    async fn create_with_point(&self, new_employee: NewEmployee) -> AppResult<Employee>;

    async fn insert(&self, new_employee: NewEmployee) -> AppResult<Employee>;

    /// Write every column of a loaded employee back, NULLs included
    async fn save(&self, employee: &Employee) -> AppResult<Employee>;

    /// Hard delete; returns the number of removed rows
    async fn delete(&self, id: i32) -> AppResult<usize>;

    async fn find_point(&self, employee_id: i32) -> AppResult<Option<Point>>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Aggregates all stores for convenient access.
///
/// Cloning is cheap; every store is behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub employees: Arc<dyn EmployeeStore>,
    pub roles: Arc<dyn RoleStore>,
    pub departments: Arc<dyn DepartmentStore>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            employees: Arc::new(EmployeeRepository::new(pool.clone())),
            roles: Arc::new(RoleRepository::new(pool.clone())),
            departments: Arc::new(DepartmentRepository::new(pool)),
        }
    }
}
