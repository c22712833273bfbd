//! Procedural room-and-corridor layout generation.

pub mod model;

mod corridor;
mod floor_area;
mod generator;
mod layout;
mod placement;

pub use generator::DungeonGenerator;
pub use model::{GenerationResult, Link, RoomLink, RoomTable, TileSet};

use crate::config::{ConfigError, GenerationConfig};

pub fn generate(config: &GenerationConfig) -> Result<GenerationResult, ConfigError> {
    Ok(DungeonGenerator::new(config.clone())?.generate())
}
