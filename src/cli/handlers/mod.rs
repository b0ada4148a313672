//! Command handlers for CLI operations
//!
//! Record handlers return the JSON document to print; the executor owns
//! stdout.

pub mod farms;
pub mod migrate;
pub mod ponds;

pub use farms::FarmsCommandHandler;
pub use migrate::MigrateCommandHandler;
pub use ponds::PondsCommandHandler;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};

pub(crate) fn to_output<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })
}

pub(crate) fn deleted_output(entity: &str, id: i32) -> Value {
    json!({ "entity": entity, "id": id, "deleted": true })
}
