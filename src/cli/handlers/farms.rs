//! `farms` command handler

use serde_json::Value;

use super::{deleted_output, to_output};
use crate::cli::parser::{FarmFields, FarmsCommand};
use crate::error::AppResult;
use crate::models::{Farm, NewFarm};
use crate::services::FarmService;

pub struct FarmsCommandHandler {
    service: FarmService,
}

impl FarmsCommandHandler {
    pub fn new(service: FarmService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, command: &FarmsCommand) -> AppResult<Value> {
        match command {
            FarmsCommand::Get { id } => to_output(&self.service.get(*id).await?),
            FarmsCommand::List { limit, offset } => {
                to_output(&self.service.get_all(limit, offset).await?)
            }
            FarmsCommand::Create { fields, id } => {
                let mut new_farm = NewFarm::new(fields.name.as_str(), fields.slug.as_str());
                new_farm.id = *id;
                let farm = self.service.create(new_farm).await?;
                tracing::info!(farm_id = farm.id, "Farm created");
                to_output(&farm)
            }
            FarmsCommand::Update { id, fields } => {
                let farm = self.service.update(&Self::farm(*id, fields)).await?;
                tracing::info!(farm_id = farm.id, "Farm updated");
                to_output(&farm)
            }
            FarmsCommand::Delete { id } => {
                let farm = Farm {
                    id: *id,
                    ..Default::default()
                };
                self.service.delete(&farm).await?;
                tracing::info!(farm_id = id, "Farm deleted");
                Ok(deleted_output("farm", *id))
            }
        }
    }

    fn farm(id: i32, fields: &FarmFields) -> Farm {
        Farm {
            id,
            name: fields.name.clone(),
            slug: fields.slug.clone(),
        }
    }
}
