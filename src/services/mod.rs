//! Service layer for business logic operations.
//!
//! Services sit between the command handlers and the repository traits.

mod farm_service;
mod pond_service;

pub use farm_service::FarmService;
pub use pond_service::PondService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
#[derive(Clone)]
pub struct Services {
    pub farms: FarmService,
    pub ponds: PondService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            farms: FarmService::new(repos.farms),
            ponds: PondService::new(repos.ponds),
        }
    }
}
