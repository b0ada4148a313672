//! Farm repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Farm, NewFarm};
use crate::repositories::{ensure_deleted, updated_or_missing};
use crate::schema;

/// Persistence operations for farms.
///
/// Every failure is already mapped to an [`AppError`]; callers never see
/// driver errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FarmRepository: Send + Sync {
    /// Inserts a farm. A taken slug or id yields `AppError::Duplicate`.
    async fn create(&self, new_farm: NewFarm) -> AppResult<Farm>;

    /// Saves `name` and `slug` of the row identified by `farm.id`.
    async fn update(&self, farm: &Farm) -> AppResult<Farm>;

    /// Removes the row identified by `farm.id`.
    async fn delete(&self, farm: &Farm) -> AppResult<()>;

    async fn get(&self, farm_id: i32) -> AppResult<Farm>;

    /// One page of farms ordered by id.
    async fn get_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Farm>>;
}

/// Farms ordered by id so consecutive pages neither overlap nor skip rows.
fn page_query(limit: i64, offset: i64) -> schema::farms::BoxedQuery<'static, Pg> {
    schema::farms::table
        .order(schema::farms::id.asc())
        .limit(limit)
        .offset(offset)
        .into_boxed()
}

/// PostgreSQL-backed [`FarmRepository`].
///
/// Cloning only bumps the pool's reference count.
#[derive(Clone)]
pub struct PgFarmRepository {
    pool: AsyncDbPool,
}

impl PgFarmRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FarmRepository for PgFarmRepository {
    async fn create(&self, new_farm: NewFarm) -> AppResult<Farm> {
        use crate::schema::farms::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let farm = diesel::insert_into(farms)
            .values(&new_farm)
            .returning(Farm::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert farm"))?;

        tracing::debug!(farm_id = farm.id, slug = %farm.slug, "Created farm");
        Ok(farm)
    }

    async fn update(&self, farm: &Farm) -> AppResult<Farm> {
        use crate::schema::farms::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let updated = diesel::update(farms.find(farm.id))
            .set(&farm.changeset())
            .returning(Farm::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update farm"))?;
        let updated = updated_or_missing(updated, "farm", farm.id)?;

        tracing::debug!(farm_id = updated.id, "Updated farm");
        Ok(updated)
    }

    async fn delete(&self, farm: &Farm) -> AppResult<()> {
        use crate::schema::farms::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let affected = diesel::delete(farms.find(farm.id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete farm"))?;

        ensure_deleted(affected, "farm", farm.id)?;

        tracing::debug!(farm_id = farm.id, "Deleted farm");
        Ok(())
    }

    async fn get(&self, farm_id: i32) -> AppResult<Farm> {
        use crate::schema::farms::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        farms
            .find(farm_id)
            .select(Farm::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find farm"))?
            .ok_or_else(|| AppError::not_found("farm", "id", farm_id))
    }

    async fn get_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Farm>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let page = page_query(limit, offset)
            .select(Farm::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list farms"))?;

        tracing::debug!(limit, offset, count = page.len(), "Loaded farm page");
        Ok(page)
    }
}
