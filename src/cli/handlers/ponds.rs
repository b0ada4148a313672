//! `ponds` command handler

use serde_json::Value;

use super::{deleted_output, to_output};
use crate::cli::parser::{PondFields, PondsCommand};
use crate::error::AppResult;
use crate::models::{NewPond, Pond};
use crate::services::PondService;

pub struct PondsCommandHandler {
    service: PondService,
}

impl PondsCommandHandler {
    pub fn new(service: PondService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, command: &PondsCommand) -> AppResult<Value> {
        match command {
            PondsCommand::Create { fields, id } => {
                let mut new_pond =
                    NewPond::new(fields.farm_id, fields.name.as_str(), fields.slug.as_str());
                new_pond.id = *id;
                let pond = self.service.create(new_pond).await?;
                tracing::info!(pond_id = pond.id, farm_id = pond.farm_id, "Pond created");
                to_output(&pond)
            }
            PondsCommand::Update { id, fields } => {
                let pond = self.service.update(&pond(*id, fields)).await?;
                tracing::info!(pond_id = pond.id, farm_id = pond.farm_id, "Pond updated");
                to_output(&pond)
            }
            PondsCommand::Delete { id } => {
                let pond = Pond {
                    id: *id,
                    ..Default::default()
                };
                self.service.delete(&pond).await?;
                tracing::info!(pond_id = id, "Pond deleted");
                Ok(deleted_output("pond", *id))
            }
        }
    }
}

fn pond(id: i32, fields: &PondFields) -> Pond {
    Pond {
        id,
        farm_id: fields.farm_id,
        name: fields.name.clone(),
        slug: fields.slug.clone(),
    }
}
