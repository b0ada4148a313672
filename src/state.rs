//! Shared application state handed to command handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Services wired to one connection pool.
///
/// Cloning is cheap: services hold `Arc`s over repositories sharing the pool.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Builds every repository and service on top of `pool`.
    ///
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            services: Services::new(Repositories::new(pool)),
        }
    }
}
