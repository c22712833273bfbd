use std::collections::VecDeque;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{Coordinate, GenerationConfig, GenerationResult, Link, TileSet, generate};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn below(rng: &mut ChaCha8Rng, bound: u32) -> u32 {
    (rng.next_u64() % u64::from(bound)) as u32
}

fn random_config(rng: &mut ChaCha8Rng) -> GenerationConfig {
    let room_size_min = 1 + below(rng, 6);
    let floor_cull_min = below(rng, 8);
    GenerationConfig {
        seed: rng.next_u64(),
        room_count: 1 + below(rng, 60),
        room_size_min,
        room_size_max: room_size_min + below(rng, 6),
        merging: rng.next_u64() & 1 == 0,
        floor_culling: rng.next_u64() & 1 == 0,
        floor_cull_min,
        floor_cull_max: floor_cull_min + below(rng, 30),
        branching: rng.next_u64() & 1 == 0,
        branching_threshold: below(rng, 8),
        branching_chance: f64::from(below(rng, 101)) / 100.0,
        max_loops: below(rng, 25),
        z: below(rng, 5) as i32 - 2,
    }
}

fn check_invariants(config: &GenerationConfig, result: &GenerationResult) -> Result<(), String> {
    if let Some(tile) = result.corridor_tiles.iter().find(|t| result.floor_tiles.contains(*t)) {
        return Err(format!("corridor tile {tile:?} overlaps floor"));
    }
    if result.rooms.len() as u32 + result.blocked_placements != config.room_count {
        return Err(format!(
            "{} rooms + {} blocked placements != room_count {}",
            result.rooms.len(),
            result.blocked_placements,
            config.room_count
        ));
    }
    for room in result.rooms.iter() {
        if room.extents.x < room.anchor.x || room.extents.y < room.anchor.y {
            return Err(format!("room {room:?} has extents behind its anchor"));
        }
    }
    for connection in &result.connections {
        let (Some(from), Some(to)) =
            (result.rooms.get(connection.from), result.rooms.get(connection.to))
        else {
            return Err(format!("link {connection:?} names a room missing from the table"));
        };
        if let Link::Corridor { exit, entry } = connection.link {
            let exit_ok = from.contains_xy(exit) && result.floor_tiles.contains(&exit);
            let entry_ok = to.contains_xy(entry) && result.floor_tiles.contains(&entry);
            if !(exit_ok && entry_ok) {
                return Err(format!("corridor ends of {connection:?} are not room floor"));
            }
        }
    }
    let off_layer =
        result.floor_tiles.iter().chain(&result.corridor_tiles).find(|t| t.z != config.z);
    if let Some(tile) = off_layer {
        return Err(format!("tile {tile:?} is off layer {}", config.z));
    }
    for &tile in &result.corridor_tiles {
        if !reaches_floor(result, tile) {
            return Err(format!("corridor tile {tile:?} is cut off from every room"));
        }
    }
    Ok(())
}

fn reaches_floor(result: &GenerationResult, start: Coordinate) -> bool {
    let mut seen = TileSet::default();
    seen.insert(start);
    let mut open = VecDeque::from([start]);
    while let Some(tile) = open.pop_front() {
        for next in tile.axis_neighbors() {
            if result.floor_tiles.contains(&next) {
                return true;
            }
            if result.corridor_tiles.contains(&next) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    false
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut unconnected = 0_usize;

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let result = match generate(&config) {
            Ok(result) => result,
            Err(err) => bail!("run {run}: generated config was rejected: {err}"),
        };
        if let Err(violation) = check_invariants(&config, &result) {
            bail!("run {run}: invariant failed for {config:?}: {violation}");
        }
        if generate(&config).map(|again| again.fingerprint()).ok() != Some(result.fingerprint()) {
            bail!("run {run}: repeated generation diverged for {config:?}");
        }
        unconnected += result.unconnected_pairs.len();
    }

    println!("Fuzzing completed successfully ({unconnected} unconnected room pairs reported).");
    Ok(())
}
