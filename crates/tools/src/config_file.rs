//! Generation settings loaded from TOML, with command-line overrides on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dungeon_core::GenerationConfig;
use toml::{Table, Value};

pub fn load(path: &Path) -> Result<GenerationConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Missing keys keep their defaults. `seed` may be an integer or, for values past
/// `i64::MAX`, a decimal string.
pub fn parse(content: &str) -> Result<GenerationConfig> {
    let mut table: Table = toml::from_str(content)?;
    let seed = table.remove("seed").map(parse_seed).transpose()?;
    let mut config: GenerationConfig = Value::Table(table).try_into()?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn parse_seed(value: Value) -> Result<u64> {
    match value {
        Value::Integer(seed) => {
            u64::try_from(seed).with_context(|| format!("seed {seed} must not be negative"))
        }
        Value::String(text) => {
            text.parse::<u64>().with_context(|| format!("seed '{text}' must be a number"))
        }
        other => bail!("seed must be an integer or a string, found {}", other.type_str()),
    }
}

/// TOML integers are signed 64-bit, so seeds past `i64::MAX` are written as strings.
pub fn to_toml(config: &GenerationConfig) -> Result<String> {
    let Value::Table(mut table) = Value::try_from(config.clone().with_seed(0))
        .context("Failed to serialize config")?
    else {
        bail!("config did not serialize to a TOML table");
    };
    let seed = match i64::try_from(config.seed) {
        Ok(seed) => Value::Integer(seed),
        Err(_) => Value::String(config.seed.to_string()),
    };
    table.insert("seed".to_owned(), seed);
    toml::to_string_pretty(&table).context("Failed to serialize config")
}

/// Values given on the command line win over the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub room_count: Option<u32>,
    pub room_size_min: Option<u32>,
    pub room_size_max: Option<u32>,
    pub merging: Option<bool>,
    pub floor_culling: Option<bool>,
    pub branching: Option<bool>,
    pub max_loops: Option<u32>,
    pub z: Option<i32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut GenerationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(room_count) = self.room_count {
            config.room_count = room_count;
        }
        if let Some(min) = self.room_size_min {
            config.room_size_min = min;
        }
        if let Some(max) = self.room_size_max {
            config.room_size_max = max;
        }
        if let Some(merging) = self.merging {
            config.merging = merging;
        }
        if let Some(floor_culling) = self.floor_culling {
            config.floor_culling = floor_culling;
        }
        if let Some(branching) = self.branching {
            config.branching = branching;
        }
        if let Some(max_loops) = self.max_loops {
            config.max_loops = max_loops;
        }
        if let Some(z) = self.z {
            config.z = z;
        }
    }
}
