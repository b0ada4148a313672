//! Async database connection pool implementation.
//!
//! Uses the bb8 pool manager re-exported by diesel_async.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// `bb8::Pool` is reference counted internally, so cloning it is cheap and
/// holders can derive `Clone` without extra `Arc` wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async connection pool sized from `config`.
///
/// # Errors
///
/// `AppError::ConnectionPool` when the pool cannot be built, which includes
/// the database being unreachable while the pool fills `min_connections`.
///
/// # Example
///
/// ```ignore
/// let pool = establish_async_connection_pool(&settings.database).await?;
/// let mut conn = pool.get().await.map_err(AppError::pool)?;
/// ```
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(AppError::pool)?;

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool established"
    );

    Ok(pool)
}
