//! Command executor for dispatching CLI commands
//!
//! Record commands get a pool, optional auto-migration and the service
//! graph; their JSON result is written to stdout here.

use serde_json::Value;

use super::handlers::{FarmsCommandHandler, MigrateCommandHandler, PondsCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::db::{self, establish_async_connection_pool};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Execute a parsed command with merged settings.
///
/// # Errors
/// Returns errors from command handlers, pool creation or migrations
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    if let Commands::Migrate { dry_run, rollback } = &cli.command {
        return MigrateCommandHandler::new(settings.database)
            .execute(*dry_run, *rollback)
            .await;
    }

    let state = prepare_state(&settings).await?;
    let output = dispatch(&cli.command, &state).await?;
    print_json(&output)
}

/// Runs a record command against already-built services.
async fn dispatch(command: &Commands, state: &AppState) -> AppResult<Value> {
    match command {
        Commands::Farms(farms) => {
            FarmsCommandHandler::new(state.services.farms.clone())
                .execute(farms)
                .await
        }
        Commands::Ponds(ponds) => {
            PondsCommandHandler::new(state.services.ponds.clone())
                .execute(ponds)
                .await
        }
        Commands::Migrate { .. } => Err(AppError::validation(
            "command",
            "migrate is not a record command",
        )),
    }
}

async fn prepare_state(settings: &Settings) -> AppResult<AppState> {
    if settings.database.auto_migrate {
        db::run_pending_migrations(&settings.database.url).await?;
    }

    let pool = establish_async_connection_pool(&settings.database).await?;
    Ok(AppState::new(pool))
}

fn print_json(value: &Value) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?;
    println!("{}", rendered);
    Ok(())
}
