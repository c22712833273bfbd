//! Per-run generation parameters and their validation.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest room side accepted; keeps anchor stepping well inside `i32`.
pub const MAX_ROOM_SIDE: u32 = 4_096;
/// Upper bound on rooms per run.
pub const MAX_ROOM_COUNT: u32 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u64,
    pub room_count: u32,
    pub room_size_min: u32,
    pub room_size_max: u32,
    /// Allow rooms to be placed flush against each other with no one-tile gap.
    pub merging: bool,
    pub floor_culling: bool,
    /// Bounds of the per-attempt tile removal count.
    pub floor_cull_min: u32,
    pub floor_cull_max: u32,
    pub branching: bool,
    /// Rooms that must be placed after a branch before the next voluntary branch.
    pub branching_threshold: u32,
    pub branching_chance: f64,
    /// Retry budget for culling and corridor searches; each search gets `max_loops + 1` attempts.
    pub max_loops: u32,
    /// Layer index stamped on every produced coordinate.
    pub z: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 100,
            room_count: 1,
            room_size_min: 3,
            room_size_max: 5,
            merging: true,
            floor_culling: false,
            floor_cull_min: 1,
            floor_cull_max: 10,
            branching: false,
            branching_threshold: 0,
            branching_chance: 0.5,
            max_loops: 15,
            z: 0,
        }
    }
}

impl GenerationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count < 1 {
            return Err(ConfigError::NoRooms);
        }
        if self.room_count > MAX_ROOM_COUNT {
            return Err(ConfigError::TooManyRooms { room_count: self.room_count });
        }
        if self.room_size_min < 1 {
            return Err(ConfigError::ZeroRoomSize);
        }
        if self.room_size_min > self.room_size_max {
            return Err(ConfigError::RoomSizeRange {
                min: self.room_size_min,
                max: self.room_size_max,
            });
        }
        if self.room_size_max > MAX_ROOM_SIDE {
            return Err(ConfigError::RoomTooLarge { max: self.room_size_max });
        }
        if self.floor_cull_min > self.floor_cull_max {
            return Err(ConfigError::CullRange {
                min: self.floor_cull_min,
                max: self.floor_cull_max,
            });
        }
        if !(0.0..=1.0).contains(&self.branching_chance) {
            return Err(ConfigError::BranchingChance { chance: self.branching_chance });
        }
        let reach = i64::from(self.room_count) * (i64::from(self.room_size_max) + 1);
        if reach + i64::from(self.room_size_max) >= i64::from(i32::MAX) {
            return Err(ConfigError::ExtentOverflow);
        }
        Ok(())
    }

    /// Distance between consecutive anchors; one extra tile keeps rooms apart without merging.
    pub(crate) fn placement_step(&self) -> i32 {
        let step = if self.merging { self.room_size_max } else { self.room_size_max + 1 };
        step as i32
    }

    pub(crate) fn attempt_budget(&self) -> u32 {
        self.max_loops.saturating_add(1)
    }
}

/// Describes why a configuration was rejected before generation started.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NoRooms,
    TooManyRooms { room_count: u32 },
    ZeroRoomSize,
    RoomSizeRange { min: u32, max: u32 },
    RoomTooLarge { max: u32 },
    CullRange { min: u32, max: u32 },
    BranchingChance { chance: f64 },
    ExtentOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRooms => write!(f, "room_count must be at least 1"),
            Self::TooManyRooms { room_count } => {
                write!(f, "room_count {room_count} exceeds the limit of {MAX_ROOM_COUNT}")
            }
            Self::ZeroRoomSize => write!(f, "room_size_min must be at least 1"),
            Self::RoomSizeRange { min, max } => {
                write!(f, "room_size_min ({min}) is greater than room_size_max ({max})")
            }
            Self::RoomTooLarge { max } => {
                write!(f, "room_size_max {max} exceeds the limit of {MAX_ROOM_SIDE}")
            }
            Self::CullRange { min, max } => {
                write!(f, "floor_cull_min ({min}) is greater than floor_cull_max ({max})")
            }
            Self::BranchingChance { chance } => {
                write!(f, "branching_chance {chance} must lie within [0, 1]")
            }
            Self::ExtentOverflow => {
                write!(f, "room_count and room_size_max could place rooms beyond i32 coordinates")
            }
        }
    }
}

impl Error for ConfigError {}
