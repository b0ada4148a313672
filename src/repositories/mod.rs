//! Repository layer for data access operations.
//!
//! Each entity gets a trait, so services can be tested against mocks, and a
//! PostgreSQL implementation over the shared async pool.

mod farm_repo;
mod pond_repo;

pub use farm_repo::{FarmRepository, PgFarmRepository};
pub use pond_repo::{PgPondRepository, PondRepository};

#[cfg(test)]
pub use farm_repo::MockFarmRepository;
#[cfg(test)]
pub use pond_repo::MockPondRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};

/// Aggregates all repositories for convenient access.
///
/// Cloning shares the underlying pool and trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub farms: Arc<dyn FarmRepository>,
    pub ponds: Arc<dyn PondRepository>,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            farms: Arc::new(PgFarmRepository::new(pool.clone())),
            ponds: Arc::new(PgPondRepository::new(pool)),
        }
    }
}

/// Maps a `RETURNING` update that matched no row to `NotFound`.
pub(crate) fn updated_or_missing<T>(row: Option<T>, entity: &str, id: i32) -> AppResult<T> {
    row.ok_or_else(|| AppError::not_found(entity, "id", id))
}

/// A delete that touched no row means the record was already gone.
pub(crate) fn ensure_deleted(affected: usize, entity: &str, id: i32) -> AppResult<()> {
    if affected == 0 {
        return Err(AppError::not_found(entity, "id", id));
    }
    Ok(())
}
