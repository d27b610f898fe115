//! Employee repository for async database operations.
//!
//! Queries join `role` and `department` for the detail projection; the
//! listing query is built twice from the same filter, once for the page and
//! once for the total count.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::helper_types::{IntoBoxed, LeftJoin};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    Employee, EmployeeDetail, EmployeeFilter, EmployeeStatus, NO_DEPARTMENT_LABEL, NewEmployee,
    NewPoint, Point, UNKNOWN_STATUS_LABEL,
};
use crate::repositories::EmployeeStore;
use crate::schema::{department, employee, point, role};

type EmployeeWithRelations = LeftJoin<LeftJoin<employee::table, role::table>, department::table>;
type BoxedEmployeeQuery<'a> = IntoBoxed<'a, EmployeeWithRelations, Pg>;

/// Wrap a user search term for `ILIKE`, escaping the LIKE metacharacters
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn filtered_query(filter: &EmployeeFilter) -> BoxedEmployeeQuery<'static> {
    let mut query = employee::table
        .left_join(role::table)
        .left_join(department::table)
        .into_boxed();

    if let Some(term) = filter.search_term() {
        let pattern = like_pattern(term);
        query = query.filter(
            employee::fullname
                .ilike(pattern.clone())
                .or(employee::email.ilike(pattern.clone()))
                .or(employee::phone.ilike(pattern.clone()))
                .or(employee::cccd.ilike(pattern)),
        );
    }
    if let Some(status) = filter.status {
        query = query.filter(employee::status.eq(status));
    }
    if let Some(department_id) = filter.department_id {
        query = query.filter(employee::department_id.eq(department_id));
    }
    if let Some(role_id) = filter.role_id {
        query = query.filter(employee::role_id.eq(role_id));
    }

    query
}

/// Employee repository holding an async connection pool.
///
/// `AsyncDbPool` is `Arc`-backed, so cloning the repository is cheap.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: AsyncDbPool,
}

impl EmployeeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn count_matching(
        &self,
        column_filter: impl FnOnce(
            IntoBoxed<'static, employee::table, Pg>,
        ) -> IntoBoxed<'static, employee::table, Pg>
        + Send,
        exclude_id: Option<i32>,
        operation: &str,
    ) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        let mut query = column_filter(employee::table.into_boxed());
        if let Some(exclude_id) = exclude_id {
            query = query.filter(employee::id.ne(exclude_id));
        }

        query
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, operation))
    }

    /// Insert the employee and the point row built by `balance` in one
    /// transaction; a failed point insert leaves no employee row behind.
    async fn create_with_balance(
        &self,
        new_employee: NewEmployee,
        balance: impl FnOnce(i32) -> NewPoint + Send + 'static,
    ) -> AppResult<Employee> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let created = diesel::insert_into(employee::table)
                    .values(&new_employee)
                    .returning(Employee::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert employee"))?;

                diesel::insert_into(point::table)
                    .values(&balance(created.id))
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(e, "seed point balance")
                    })?;

                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let mut conn = self.pool.get().await?;

        employee::table
            .find(id)
            .select(Employee::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find employee"))
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<EmployeeDetail>> {
        let mut conn = self.pool.get().await?;

        let row = employee::table
            .left_join(role::table)
            .left_join(department::table)
            .filter(employee::id.eq(id))
            .select((
                Employee::as_select(),
                role::name.nullable(),
                department::name.nullable(),
            ))
            .first::<(Employee, Option<String>, Option<String>)>(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find employee detail"))?;

        Ok(row.map(EmployeeDetail::from))
    }

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<EmployeeDetail>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = filtered_query(filter)
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count employees"))?;

        let rows = filtered_query(filter)
            .select((
                Employee::as_select(),
                role::name.nullable(),
                department::name.nullable(),
            ))
            .order(employee::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<(Employee, Option<String>, Option<String>)>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list employees"))?;

        tracing::debug!(
            total,
            returned = rows.len(),
            offset,
            limit,
            "Loaded employee page"
        );

        Ok((rows.into_iter().map(EmployeeDetail::from).collect(), total))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = self
            .count_matching(|q| q.filter(employee::id.eq(id)), None, "check employee exists")
            .await?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let email = email.to_string();
        let count = self
            .count_matching(
                move |q| q.filter(employee::email.eq(email)),
                exclude_id,
                "check employee email",
            )
            .await?;
        Ok(count > 0)
    }

    async fn cccd_exists(&self, cccd: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let cccd = cccd.to_string();
        let count = self
            .count_matching(
                move |q| q.filter(employee::cccd.eq(cccd)),
                exclude_id,
                "check employee cccd",
            )
            .await?;
        Ok(count > 0)
    }

    async fn tax_code_exists(&self, tax_code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let tax_code = tax_code.to_string();
        let count = self
            .count_matching(
                move |q| q.filter(employee::tax_code.eq(tax_code)),
                exclude_id,
                "check employee tax code",
            )
            .await?;
        Ok(count > 0)
    }

    async fn count_total(&self) -> AppResult<i64> {
        self.count_matching(|q| q, None, "count employees").await
    }

    async fn count_active(&self) -> AppResult<i64> {
        self.count_matching(
            |q| q.filter(employee::status.eq(EmployeeStatus::Active)),
            None,
            "count active employees",
        )
        .await
    }

    async fn count_by_status(&self) -> AppResult<BTreeMap<String, i64>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<(Option<String>, i64)> = employee::table
            .group_by(employee::status)
            .select((employee::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "count employees by status")
            })?;

        let mut counts = BTreeMap::new();
        for (status, count) in rows {
            let label = status.unwrap_or_else(|| UNKNOWN_STATUS_LABEL.to_string());
            *counts.entry(label).or_insert(0) += count;
        }
        Ok(counts)
    }

    async fn count_by_department(&self) -> AppResult<BTreeMap<String, i64>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<(Option<i32>, i64)> = employee::table
            .group_by(employee::department_id)
            .select((employee::department_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "count employees by department")
            })?;

        let names: BTreeMap<i32, String> = department::table
            .select((department::id, department::name))
            .load::<(i32, String)>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "load department names"))?
            .into_iter()
            .collect();

        // Departments sharing a name are reported together
        let mut counts = BTreeMap::new();
        for (department_id, count) in rows {
            let label = department_id
                .and_then(|id| names.get(&id).cloned())
                .unwrap_or_else(|| NO_DEPARTMENT_LABEL.to_string());
            *counts.entry(label).or_insert(0) += count;
        }
        Ok(counts)
    }

    async fn create_with_point(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let now = jiff::Timestamp::now().to_diesel();
        let created = self
            .create_with_balance(new_employee, move |employee_id| {
                NewPoint::zero_balance(employee_id, now)
            })
            .await?;

        tracing::info!(employee_id = created.id, "Created employee with point balance");
        Ok(created)
    }

    async fn insert(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(employee::table)
            .values(&new_employee)
            .returning(Employee::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert employee"))
    }

    async fn save(&self, employee: &Employee) -> AppResult<Employee> {
        let mut conn = self.pool.get().await?;

        diesel::update(employee::table.find(employee.id))
            .set(employee)
            .returning(Employee::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update employee"))
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(employee::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete employee"))
    }

    async fn find_point(&self, employee_id: i32) -> AppResult<Option<Point>> {
        let mut conn = self.pool.get().await?;

        point::table
            .filter(point::employee_id.eq(employee_id))
            .select(Point::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find point balance"))
    }
}
