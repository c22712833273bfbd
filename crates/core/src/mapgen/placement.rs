//! Choosing where the next room goes relative to the active anchor.

use crate::config::GenerationConfig;
use crate::rng::DungeonRng;
use crate::types::Coordinate;

use super::model::{RoomTable, TileSet};

/// Unit offsets of the eight candidate directions, scaled by the placement step.
const DIRECTIONS: [(i32, i32); 8] =
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Open(Coordinate),
    /// All eight directions land on existing floor.
    Blocked,
}

/// Draws untried directions without replacement until one lands off the floor.
/// An anchor whose tile was culled away still belongs to its room and is skipped too.
pub(crate) fn find_next_location(
    active_anchor: Coordinate,
    floor_tiles: &TileSet,
    rooms: &RoomTable,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Placement {
    let step = config.placement_step();
    let mut untried: Vec<usize> = (0..DIRECTIONS.len()).collect();
    while !untried.is_empty() {
        let pick = rng.index(untried.len());
        let (dx, dy) = DIRECTIONS[untried[pick]];
        let candidate = active_anchor.offset(dx * step, dy * step);
        if !floor_tiles.contains(&candidate) && rooms.get(candidate).is_none() {
            return Placement::Open(candidate);
        }
        untried.swap_remove(pick);
    }
    Placement::Blocked
}
