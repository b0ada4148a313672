//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations.

use crate::config::DatabaseConfig;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: DatabaseConfig,
}

impl MigrateCommandHandler {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Execute the migrate command.
    ///
    /// `dry_run` lists pending migrations; `rollback` reverts that many of
    /// the most recent ones; neither applies everything pending.
    ///
    /// # Errors
    /// - `Validation` for a zero or too-large rollback
    /// - `Database` when the connection or a migration fails
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.validate()?;

        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations().await,
            (false, Some(steps)) => self.rollback_migrations(steps).await,
            (false, None) => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");
        let applied = db::applied_migrations(&self.config.url).await?;
        let pending = db::pending_migrations(&self.config.url).await?;
        println!("{} migration(s) already applied", applied.len());

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }
        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");
        let applied = db::run_pending_migrations(&self.config.url).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }
        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        println!("Rolling back {} migration(s)...", steps);
        let reverted = db::revert_migrations(&self.config.url, steps).await?;

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {}", version);
        }
        Ok(())
    }
}
