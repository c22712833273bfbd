//! Room layout engine: grows the dungeon one room slot at a time, branching back
//! to earlier rooms and connecting each new room to the one it grew from.

use crate::config::GenerationConfig;
use crate::rng::DungeonRng;
use crate::types::{Coordinate, Room};

use super::corridor::{Connection, CorridorRouter};
use super::floor_area::{CullOutcome, build_floor_area};
use super::model::{GenerationResult, Link, RoomLink, RoomTable, TileSet};
use super::placement::{Placement, find_next_location};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutPhase {
    PlacingFirstRoom,
    PlacingSubsequentRoom { index: u32 },
    Done,
}

pub(crate) struct LayoutBuilder<'a> {
    config: &'a GenerationConfig,
    floor_tiles: TileSet,
    corridor_tiles: TileSet,
    rooms: RoomTable,
    connections: Vec<RoomLink>,
    unconnected_pairs: Vec<(Coordinate, Coordinate)>,
    blocked_placements: u32,
    culling_fallbacks: u32,
    /// Room the next placement grows from.
    active_anchor: Coordinate,
    /// Room count when the last branch happened; voluntary branches wait for the threshold past it.
    last_branch: usize,
}

impl<'a> LayoutBuilder<'a> {
    pub(crate) fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            floor_tiles: TileSet::default(),
            corridor_tiles: TileSet::default(),
            rooms: RoomTable::new(),
            connections: Vec::new(),
            unconnected_pairs: Vec::new(),
            blocked_placements: 0,
            culling_fallbacks: 0,
            active_anchor: Coordinate::new(0, 0, config.z),
            last_branch: 0,
        }
    }

    pub(crate) fn build(mut self, rng: &mut DungeonRng) -> GenerationResult {
        let mut phase = LayoutPhase::PlacingFirstRoom;
        loop {
            phase = match phase {
                LayoutPhase::PlacingFirstRoom => {
                    self.place_first_room(rng);
                    self.advance(1)
                }
                LayoutPhase::PlacingSubsequentRoom { index } => {
                    self.place_next_room(rng);
                    self.advance(index + 1)
                }
                LayoutPhase::Done => break,
            };
        }
        self.finish()
    }

    fn advance(&self, next_index: u32) -> LayoutPhase {
        if next_index < self.config.room_count {
            LayoutPhase::PlacingSubsequentRoom { index: next_index }
        } else {
            LayoutPhase::Done
        }
    }

    fn place_first_room(&mut self, rng: &mut DungeonRng) {
        let origin = self.active_anchor;
        self.add_room(origin, rng);
    }

    fn place_next_room(&mut self, rng: &mut DungeonRng) {
        if self.branch_is_due() && rng.weighted_bool(self.config.branching_chance) {
            self.branch_to_random_room(rng);
        }

        let placement = find_next_location(
            self.active_anchor,
            &self.floor_tiles,
            &self.rooms,
            self.config,
            rng,
        );
        match placement {
            Placement::Open(anchor) => {
                let previous = self.rooms.get(self.active_anchor).copied();
                let placed = self.add_room(anchor, rng);
                if let Some(previous) = previous {
                    self.connect(&previous, &placed, rng);
                }
                self.active_anchor = anchor;
            }
            Placement::Blocked => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    anchor = ?self.active_anchor,
                    "every direction blocked; forcing a branch"
                );
                self.blocked_placements += 1;
                self.branch_to_random_room(rng);
            }
        }
    }

    fn branch_is_due(&self) -> bool {
        self.config.branching
            && self.rooms.len() > self.config.branching_threshold as usize + self.last_branch
    }

    fn branch_to_random_room(&mut self, rng: &mut DungeonRng) {
        let pick = rng.index(self.rooms.len());
        if let Some(room) = self.rooms.at(pick) {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = ?self.active_anchor, to = ?room.anchor, "branching");
            self.active_anchor = room.anchor;
        }
        self.last_branch = self.rooms.len();
    }

    fn add_room(&mut self, anchor: Coordinate, rng: &mut DungeonRng) -> Room {
        let area = build_floor_area(anchor, self.config, rng);
        if area.outcome == CullOutcome::Fallback {
            self.culling_fallbacks += 1;
        }
        self.floor_tiles.extend(area.tiles.iter().copied());
        self.rooms.insert(anchor, area.extents);
        Room { anchor, extents: area.extents }
    }

    fn connect(&mut self, from: &Room, to: &Room, rng: &mut DungeonRng) {
        let mut router =
            CorridorRouter::new(&self.floor_tiles, &mut self.corridor_tiles, self.config);
        let link = match router.connect(from, to, rng) {
            Connection::Touching => Link::Touching,
            Connection::Carved { exit, entry } => Link::Corridor { exit, entry },
            Connection::Unconnected => {
                #[cfg(feature = "tracing")]
                tracing::debug!(from = ?from.anchor, to = ?to.anchor, "corridor routing exhausted");
                self.unconnected_pairs.push((from.anchor, to.anchor));
                return;
            }
        };
        self.connections.push(RoomLink { from: from.anchor, to: to.anchor, link });
    }

    fn finish(self) -> GenerationResult {
        let Self {
            floor_tiles,
            mut corridor_tiles,
            rooms,
            connections,
            unconnected_pairs,
            blocked_placements,
            culling_fallbacks,
            ..
        } = self;
        // Later rooms may cover tiles carved for earlier corridors.
        corridor_tiles.retain(|tile| !floor_tiles.contains(tile));
        GenerationResult {
            floor_tiles,
            corridor_tiles,
            rooms,
            connections,
            unconnected_pairs,
            blocked_placements,
            culling_fallbacks,
        }
    }
}
