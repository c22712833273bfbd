pub mod classify;
pub mod config;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use classify::{TileClassification, TileFlags, classify};
pub use config::{ConfigError, GenerationConfig};
pub use mapgen::{
    DungeonGenerator, GenerationResult, Link, RoomLink, RoomTable, TileSet, generate,
};
pub use rng::DungeonRng;
pub use types::*;
