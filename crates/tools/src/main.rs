use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dungeon_core::{DungeonGenerator, GenerationConfig};
use tracing_subscriber::EnvFilter;

mod config_file;
mod render;
mod seed;

use config_file::Overrides;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dungeon layout and print it
    Generate(GenerateArgs),
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Ascii,
    Json,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Path to a TOML generation config
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, conflicts_with = "new_seed")]
    seed: Option<u64>,
    /// Ignore the configured seed and draw a fresh one
    #[arg(long)]
    new_seed: bool,
    #[arg(short, long)]
    rooms: Option<u32>,
    #[arg(long)]
    room_size_min: Option<u32>,
    #[arg(long)]
    room_size_max: Option<u32>,
    #[arg(long)]
    merging: Option<bool>,
    #[arg(long)]
    culling: Option<bool>,
    #[arg(long)]
    branching: Option<bool>,
    #[arg(long)]
    max_loops: Option<u32>,
    #[arg(short, long, allow_negative_numbers = true)]
    z: Option<i32>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

impl GenerateArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: if self.new_seed { Some(seed::fresh_seed()) } else { self.seed },
            room_count: self.rooms,
            room_size_min: self.room_size_min,
            room_size_max: self.room_size_max,
            merging: self.merging,
            floor_culling: self.culling,
            branching: self.branching,
            max_loops: self.max_loops,
            z: self.z,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::DefaultConfig => {
            print!("{}", config_file::to_toml(&GenerationConfig::default())?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => config_file::load(path)?,
        None => GenerationConfig::default(),
    };
    args.overrides().apply(&mut config);
    if args.new_seed {
        eprintln!("Seed: {}", config.seed);
    }

    let generator = DungeonGenerator::new(config).context("Rejected generation config")?;
    let started = Instant::now();
    let result = generator.generate();
    tracing::info!(
        seed = generator.config().seed,
        elapsed_us = started.elapsed().as_micros() as u64,
        "generation finished"
    );

    for (from, to) in &result.unconnected_pairs {
        tracing::warn!(?from, ?to, "rooms left without a corridor");
    }
    if result.blocked_placements > 0 {
        tracing::warn!(
            blocked = result.blocked_placements,
            "room slots skipped because every direction was blocked"
        );
    }

    match args.format {
        OutputFormat::Ascii => print!("{}", render::ascii(&result)),
        OutputFormat::Json => {
            println!("{}", render::json(&result).context("Failed to serialize result")?);
        }
    }
    Ok(())
}
