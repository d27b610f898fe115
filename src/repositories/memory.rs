//! In-memory stores for exercising services and handlers without PostgreSQL.
//!
//! Mirrors the relational rules the service relies on: unique email and
//! CCCD, the seeded roles, and all-or-nothing `create_with_point`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{
    Employee, EmployeeDetail, EmployeeFilter, EmployeeStatus, NO_DEPARTMENT_LABEL, NewEmployee,
    Point, UNKNOWN_STATUS_LABEL,
};
use crate::repositories::{DepartmentStore, EmployeeStore, Repositories, RoleStore};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<i32, Employee>,
    points: BTreeMap<i32, Point>,
    roles: BTreeMap<i32, String>,
    departments: BTreeMap<i32, String>,
    next_employee_id: i32,
    next_point_id: i32,
}

/// Shared in-memory tables implementing every store trait
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Makes the next point insert fail, to observe transaction rollback
    pub fail_point_insert: AtomicBool,
}

impl MemoryStore {
    /// A store seeded with the four standard roles
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        {
            let mut tables = store.lock();
            for (id, name) in [(1, "admin"), (2, "hr"), (3, "manager"), (4, "employee")] {
                tables.roles.insert(id, name.to_string());
            }
        }
        Arc::new(store)
    }

    pub fn add_department(&self, id: i32, name: &str) {
        self.lock().departments.insert(id, name.to_string());
    }

    pub fn employee_count(&self) -> usize {
        self.lock().employees.len()
    }

    pub fn point_count(&self) -> usize {
        self.lock().points.len()
    }

    /// Repositories backed by this store
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            employees: self.clone(),
            roles: self.clone(),
            departments: self.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

impl Tables {
    fn detail(&self, employee: &Employee) -> EmployeeDetail {
        EmployeeDetail {
            employee: employee.clone(),
            role_name: self.roles.get(&employee.role_id).cloned(),
            department_name: employee
                .department_id
                .and_then(|id| self.departments.get(&id).cloned()),
        }
    }

    fn check_unique(&self, candidate: &NewEmployee) -> AppResult<()> {
        for existing in self.employees.values() {
            if existing.email == candidate.email {
                return Err(duplicate("email", &candidate.email));
            }
            if existing.cccd == candidate.cccd {
                return Err(duplicate("cccd", &candidate.cccd));
            }
        }
        if !self.roles.contains_key(&candidate.role_id) {
            return Err(AppError::Validation {
                field: "role_id".to_string(),
                reason: "Referenced role does not exist".to_string(),
            });
        }
        Ok(())
    }

    fn insert_employee(&mut self, new_employee: NewEmployee) -> AppResult<Employee> {
        self.check_unique(&new_employee)?;
        self.next_employee_id += 1;
        let created = Employee {
            id: self.next_employee_id,
            fullname: new_employee.fullname,
            cccd: new_employee.cccd,
            tax_code: new_employee.tax_code,
            phone: new_employee.phone,
            address: new_employee.address,
            bank_account: new_employee.bank_account,
            join_date: new_employee.join_date,
            status: Some(new_employee.status),
            birthday: new_employee.birthday,
            gender: new_employee.gender,
            email: new_employee.email,
            role_id: new_employee.role_id,
            department_id: new_employee.department_id,
            created_at: Some(new_employee.created_at),
            updated_at: Some(new_employee.updated_at),
        };
        self.employees.insert(created.id, created.clone());
        Ok(created)
    }
}

fn duplicate(field: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: "employee".to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn matches_filter(employee: &Employee, filter: &EmployeeFilter) -> bool {
    if let Some(term) = filter.search_term() {
        let term = term.to_lowercase();
        let hit = [
            Some(employee.fullname.as_str()),
            Some(employee.email.as_str()),
            employee.phone.as_deref(),
            Some(employee.cccd.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }
    if filter.status.is_some() && employee.status != filter.status {
        return false;
    }
    if filter.department_id.is_some() && employee.department_id != filter.department_id {
        return false;
    }
    if filter.role_id.is_some_and(|role_id| employee.role_id != role_id) {
        return false;
    }
    true
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        Ok(self.lock().employees.get(&id).cloned())
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<EmployeeDetail>> {
        let tables = self.lock();
        Ok(tables.employees.get(&id).map(|e| tables.detail(e)))
    }

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<EmployeeDetail>, i64)> {
        let tables = self.lock();
        let matching: Vec<&Employee> = tables
            .employees
            .values()
            .filter(|e| matches_filter(e, filter))
            .collect();
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|e| tables.detail(e))
            .collect();
        Ok((items, total))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().employees.contains_key(&id))
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .lock()
            .employees
            .values()
            .any(|e| e.email == email && Some(e.id) != exclude_id))
    }

    async fn cccd_exists(&self, cccd: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .lock()
            .employees
            .values()
            .any(|e| e.cccd == cccd && Some(e.id) != exclude_id))
    }

    async fn tax_code_exists(&self, tax_code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .lock()
            .employees
            .values()
            .any(|e| e.tax_code.as_deref() == Some(tax_code) && Some(e.id) != exclude_id))
    }

    async fn count_total(&self) -> AppResult<i64> {
        Ok(self.lock().employees.len() as i64)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self
            .lock()
            .employees
            .values()
            .filter(|e| e.status == Some(EmployeeStatus::Active))
            .count() as i64)
    }

    async fn count_by_status(&self) -> AppResult<BTreeMap<String, i64>> {
        let mut counts = BTreeMap::new();
        for employee in self.lock().employees.values() {
            let label = employee
                .status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| UNKNOWN_STATUS_LABEL.to_string());
            *counts.entry(label).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_by_department(&self) -> AppResult<BTreeMap<String, i64>> {
        let tables = self.lock();
        let mut counts = BTreeMap::new();
        for employee in tables.employees.values() {
            let label = tables
                .detail(employee)
                .department_name
                .unwrap_or_else(|| NO_DEPARTMENT_LABEL.to_string());
            *counts.entry(label).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn create_with_point(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let mut tables = self.lock();
        let created = tables.insert_employee(new_employee)?;

        if self.fail_point_insert.swap(false, Ordering::SeqCst) {
            tables.employees.remove(&created.id);
            return Err(AppError::Database {
                operation: "seed point balance".to_string(),
                source: anyhow::anyhow!("simulated point insert failure"),
            });
        }

        tables.next_point_id += 1;
        let point = Point {
            id: tables.next_point_id,
            employee_id: created.id,
            point_total: Some(0),
            last_update: Some(jiff::Timestamp::now().to_diesel()),
        };
        tables.points.insert(point.id, point);
        Ok(created)
    }

    async fn insert(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        self.lock().insert_employee(new_employee)
    }

    async fn save(&self, employee: &Employee) -> AppResult<Employee> {
        let mut tables = self.lock();
        match tables.employees.get_mut(&employee.id) {
            Some(stored) => {
                *stored = employee.clone();
                Ok(employee.clone())
            }
            None => Err(AppError::from(diesel::result::Error::NotFound)),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        let mut tables = self.lock();
        let removed = tables.employees.remove(&id).is_some();
        if removed {
            tables.points.retain(|_, p| p.employee_id != id);
        }
        Ok(usize::from(removed))
    }

    async fn find_point(&self, employee_id: i32) -> AppResult<Option<Point>> {
        Ok(self
            .lock()
            .points
            .values()
            .find(|p| p.employee_id == employee_id)
            .cloned())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().roles.contains_key(&id))
    }
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().departments.contains_key(&id))
    }
}
