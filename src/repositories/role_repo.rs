//! Role repository.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::repositories::RoleStore;
use crate::schema::role;

#[derive(Clone)]
pub struct RoleRepository {
    pool: AsyncDbPool,
}

impl RoleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn exists(&self, id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let count: i64 = role::table
            .filter(role::id.eq(id))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "check role exists"))?;
        Ok(count > 0)
    }
}
