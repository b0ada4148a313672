//! Pond repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

#[cfg(test)]
use mockall::automock;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewPond, Pond};
use crate::repositories::{ensure_deleted, updated_or_missing};

/// Persistence operations for ponds.
///
/// A `farm_id` with no matching farm is rejected by the schema and surfaces
/// as `AppError::Validation`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PondRepository: Send + Sync {
    async fn create(&self, new_pond: NewPond) -> AppResult<Pond>;

    /// Saves `farm_id`, `name` and `slug` of the row identified by `pond.id`.
    async fn update(&self, pond: &Pond) -> AppResult<Pond>;

    async fn delete(&self, pond: &Pond) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgPondRepository {
    pool: AsyncDbPool,
}

impl PgPondRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PondRepository for PgPondRepository {
    async fn create(&self, new_pond: NewPond) -> AppResult<Pond> {
        use crate::schema::ponds::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let pond = diesel::insert_into(ponds)
            .values(&new_pond)
            .returning(Pond::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert pond"))?;

        tracing::debug!(pond_id = pond.id, farm_id = pond.farm_id, "Created pond");
        Ok(pond)
    }

    async fn update(&self, pond: &Pond) -> AppResult<Pond> {
        use crate::schema::ponds::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let updated = diesel::update(ponds.find(pond.id))
            .set(&pond.changeset())
            .returning(Pond::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update pond"))?;
        let updated = updated_or_missing(updated, "pond", pond.id)?;

        tracing::debug!(pond_id = updated.id, farm_id = updated.farm_id, "Updated pond");
        Ok(updated)
    }

    async fn delete(&self, pond: &Pond) -> AppResult<()> {
        use crate::schema::ponds::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let affected = diesel::delete(ponds.find(pond.id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete pond"))?;

        ensure_deleted(affected, "pond", pond.id)?;

        tracing::debug!(pond_id = pond.id, "Deleted pond");
        Ok(())
    }
}
