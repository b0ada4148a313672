mod farm;
mod pond;

pub use farm::{Farm, NewFarm, UpdateFarm};
pub use pond::{NewPond, Pond, UpdatePond};
