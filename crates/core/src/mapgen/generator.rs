//! Generation driver: validates a config and runs the layout engine on a fresh stream.

use crate::config::{ConfigError, GenerationConfig};
use crate::rng::DungeonRng;

use super::layout::LayoutBuilder;
use super::model::GenerationResult;

pub struct DungeonGenerator {
    config: GenerationConfig,
}

impl DungeonGenerator {
    /// Rejects an invalid config before any generation work.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Same config, same output: the stream is reseeded from `config.seed` every call.
    pub fn generate(&self) -> GenerationResult {
        let mut rng = DungeonRng::new(self.config.seed);
        let result = LayoutBuilder::new(&self.config).build(&mut rng);

        #[cfg(feature = "tracing")]
        tracing::info!(
            seed = self.config.seed,
            rooms = result.rooms.len(),
            floor_tiles = result.floor_tiles.len(),
            corridor_tiles = result.corridor_tiles.len(),
            unconnected = result.unconnected_pairs.len(),
            blocked = result.blocked_placements,
            culling_fallbacks = result.culling_fallbacks,
            "dungeon generated"
        );
        result
    }
}
