//! Employee service: validation sequence, transactional creation, soft
//! delete and statistics over the [`EmployeeStore`].

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{
    EmployeeCandidate, EmployeeChanges, EmployeeDetail, EmployeeQuery, EmployeeStatistics,
    EmployeeStatus, Page, PageRequest,
};
use crate::repositories::{DepartmentStore, EmployeeStore, RoleStore};

const ENTITY: &str = "employee";

fn not_found(id: i32) -> AppError {
    AppError::NotFound {
        entity: ENTITY.to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}

fn duplicate(field: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: ENTITY.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Employee business operations.
///
/// Cloning is cheap; the stores are shared behind `Arc`.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    roles: Arc<dyn RoleStore>,
    departments: Arc<dyn DepartmentStore>,
    default_role_id: i32,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        roles: Arc<dyn RoleStore>,
        departments: Arc<dyn DepartmentStore>,
        default_role_id: i32,
    ) -> Self {
        Self {
            employees,
            roles,
            departments,
            default_role_id,
        }
    }

    /// One page of employees matching the query, with clamped paging
    pub async fn list(&self, query: EmployeeQuery) -> AppResult<Page<EmployeeDetail>> {
        let request = PageRequest::clamped(query.page_number, query.page_size);
        let (items, total) = self
            .employees
            .find_page(&query.filter, request.offset(), request.limit())
            .await?;
        Ok(Page::new(items, total, request))
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<EmployeeDetail>> {
        self.employees.find_detail(id).await
    }

    /// Create an employee and its zero point balance.
    ///
    /// Checks run in order and stop at the first failure: email, CCCD and
    /// tax code uniqueness, then role (defaulted when missing or 0) and
    /// department existence.
    pub async fn create(&self, candidate: EmployeeCandidate) -> AppResult<EmployeeDetail> {
        if self.employees.email_exists(&candidate.email, None).await? {
            return Err(duplicate("email", &candidate.email));
        }
        if self.employees.cccd_exists(&candidate.cccd, None).await? {
            return Err(duplicate("cccd", &candidate.cccd));
        }
        if let Some(tax_code) = candidate.tax_code.as_deref() {
            if self.employees.tax_code_exists(tax_code, None).await? {
                return Err(duplicate("tax_code", tax_code));
            }
        }

        let role_id = match candidate.role_id {
            None | Some(0) => self.default_role_id,
            Some(role_id) => role_id,
        };
        if !self.roles.exists(role_id).await? {
            return Err(AppError::Validation {
                field: "role_id".to_string(),
                reason: format!("Role with ID {} does not exist", role_id),
            });
        }
        if let Some(department_id) = candidate.department_id {
            self.ensure_department(department_id).await?;
        }

        let new_employee = candidate.into_new_employee(role_id, jiff::Timestamp::now());
        let created = self.employees.create_with_point(new_employee).await?;
        tracing::info!(employee_id = created.id, role_id, "Employee created");

        self.detail_of(created.id).await
    }

    /// Apply the present fields of `changes` to an existing employee
    pub async fn update(&self, id: i32, changes: EmployeeChanges) -> AppResult<EmployeeDetail> {
        let mut employee = self.employees.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        if let Some(department_id) = changes.department_id {
            self.ensure_department(department_id).await?;
        }

        changes.apply_to(&mut employee);
        employee.touch();
        self.employees.save(&employee).await?;
        tracing::info!(employee_id = id, "Employee updated");

        self.detail_of(id).await
    }

    /// Soft delete: the employee becomes inactive and the row is kept
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut employee = self.employees.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        employee.status = Some(EmployeeStatus::Inactive);
        employee.touch();
        self.employees.save(&employee).await?;
        tracing::info!(employee_id = id, "Employee deactivated");

        Ok(())
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.employees.email_exists(email, exclude_id).await
    }

    pub async fn cccd_exists(&self, cccd: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.employees.cccd_exists(cccd, exclude_id).await
    }

    pub async fn tax_code_exists(&self, tax_code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        self.employees.tax_code_exists(tax_code, exclude_id).await
    }

    pub async fn statistics(&self) -> AppResult<EmployeeStatistics> {
        let total = self.employees.count_total().await?;
        let active = self.employees.count_active().await?;
        let by_status = self.employees.count_by_status().await?;
        let by_department = self.employees.count_by_department().await?;

        Ok(EmployeeStatistics {
            total,
            active,
            inactive: total - active,
            by_status,
            by_department,
        })
    }

    async fn ensure_department(&self, department_id: i32) -> AppResult<()> {
        if self.departments.exists(department_id).await? {
            Ok(())
        } else {
            Err(AppError::Validation {
                field: "department_id".to_string(),
                reason: format!("Department with ID {} does not exist", department_id),
            })
        }
    }

    /// Re-read the detail projection of an employee that was just written
    async fn detail_of(&self, id: i32) -> AppResult<EmployeeDetail> {
        self.employees
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}
