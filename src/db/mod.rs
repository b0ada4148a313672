//! Database access: async connection pool for request work and blocking
//! connections for schema migrations.

mod migrations;
mod pool;

pub use migrations::{
    MIGRATIONS, applied_migrations, pending_migrations, revert_migrations, run_pending_migrations,
};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
