//! Room floor construction: a random rectangle, optionally culled into an irregular
//! shape that stays 4-connected.

use std::collections::VecDeque;

use crate::config::GenerationConfig;
use crate::rng::DungeonRng;
use crate::types::Coordinate;

use super::model::TileSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CullOutcome {
    Disabled,
    Culled,
    /// Every attempt left too small a region; the uncut rectangle was kept.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FloorArea {
    pub(crate) tiles: Vec<Coordinate>,
    pub(crate) extents: Coordinate,
    pub(crate) outcome: CullOutcome,
}

pub(crate) fn build_floor_area(
    anchor: Coordinate,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> FloorArea {
    let min_side = config.room_size_min as i32;
    let max_side = config.room_size_max as i32;
    let width = rng.int_range(min_side, max_side);
    let height = rng.int_range(min_side, max_side);
    let rectangle: Vec<Coordinate> = (0..width * height)
        .map(|i| Coordinate::new(i / height + anchor.x, i % height + anchor.y, anchor.z))
        .collect();

    if !config.floor_culling {
        return finish(anchor, rectangle, CullOutcome::Disabled);
    }

    let minimum_area = (config.room_size_min as usize).pow(2);
    for _ in 0..config.attempt_budget() {
        let mut remaining = rectangle.clone();
        let cull_count = draw_cull_count(config, remaining.len(), rng);
        for _ in 0..cull_count {
            let index = rng.index(remaining.len());
            remaining.remove(index);
        }

        let connected = connected_region(&remaining);
        if connected.len() > minimum_area {
            return finish(anchor, connected, CullOutcome::Culled);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(?anchor, width, height, "floor culling exhausted; keeping full rectangle");
    finish(anchor, rectangle, CullOutcome::Fallback)
}

/// Tiles to strip this attempt, never more than a quarter of the room.
fn draw_cull_count(config: &GenerationConfig, tile_count: usize, rng: &mut DungeonRng) -> usize {
    let drawn =
        rng.float_range(f64::from(config.floor_cull_min), f64::from(config.floor_cull_max)) as i64;
    (drawn - 1).clamp(0, (tile_count / 4) as i64) as usize
}

/// Breadth-first expansion from the first tile over axis neighbours; islands are dropped.
pub(crate) fn connected_region(tiles: &[Coordinate]) -> Vec<Coordinate> {
    let Some(&start) = tiles.first() else {
        return Vec::new();
    };

    let mut unvisited: TileSet = tiles.iter().copied().collect();
    unvisited.remove(&start);
    let mut region = vec![start];
    let mut open = VecDeque::from([start]);
    while let Some(tile) = open.pop_front() {
        for next in tile.axis_neighbors() {
            if unvisited.remove(&next) {
                region.push(next);
                open.push_back(next);
            }
        }
    }
    region
}

fn finish(anchor: Coordinate, tiles: Vec<Coordinate>, outcome: CullOutcome) -> FloorArea {
    let max_x = tiles.iter().map(|tile| tile.x).max().unwrap_or(anchor.x);
    let max_y = tiles.iter().map(|tile| tile.y).max().unwrap_or(anchor.y);
    FloorArea { tiles, extents: Coordinate::new(max_x, max_y, anchor.z), outcome }
}
