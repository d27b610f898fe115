//! Department repository.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::repositories::DepartmentStore;
use crate::schema::department;

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: AsyncDbPool,
}

impl DepartmentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for DepartmentRepository {
    async fn exists(&self, id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let count: i64 = department::table
            .filter(department::id.eq(id))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "check department exists")
            })?;
        Ok(count > 0)
    }
}
