//! Public data models for a generated dungeon layout.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Coordinate, Room};

/// Hash-backed tile membership. Fx hashing carries no per-process state, so
/// iteration order depends only on the insertion sequence.
pub type TileSet = FxHashSet<Coordinate>;

/// Rooms keyed by anchor, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Room>", into = "Vec<Room>")]
pub struct RoomTable {
    rooms: Vec<Room>,
    slots: FxHashMap<Coordinate, usize>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a room. An existing anchor keeps its slot and takes the new extents.
    pub fn insert(&mut self, anchor: Coordinate, extents: Coordinate) {
        match self.slots.get(&anchor) {
            Some(&slot) => self.rooms[slot].extents = extents,
            None => {
                self.slots.insert(anchor, self.rooms.len());
                self.rooms.push(Room { anchor, extents });
            }
        }
    }

    pub fn get(&self, anchor: Coordinate) -> Option<&Room> {
        self.slots.get(&anchor).map(|&slot| &self.rooms[slot])
    }

    pub fn extents_of(&self, anchor: Coordinate) -> Option<Coordinate> {
        self.get(anchor).map(|room| room.extents)
    }

    pub fn at(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn anchors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.rooms.iter().map(|room| room.anchor)
    }
}

impl From<Vec<Room>> for RoomTable {
    fn from(rooms: Vec<Room>) -> Self {
        let mut table = Self::new();
        for room in rooms {
            table.insert(room.anchor, room.extents);
        }
        table
    }
}

impl From<RoomTable> for Vec<Room> {
    fn from(table: RoomTable) -> Self {
        table.rooms
    }
}

/// How a routed pair of rooms is joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Link {
    /// Facing edges are at most one tile apart, so no corridor was carved.
    Touching,
    /// Corridor from `exit`, a floor tile of the first room, to `entry`, one of the second.
    Corridor { exit: Coordinate, entry: Coordinate },
}

/// A room grown from `from` and joined to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomLink {
    pub from: Coordinate,
    pub to: Coordinate,
    pub link: Link,
}

/// Output of one generation run, handed to renderers and spawners read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub floor_tiles: TileSet,
    pub corridor_tiles: TileSet,
    pub rooms: RoomTable,
    /// Routed room pairs in placement order, excluding the unconnected ones.
    pub connections: Vec<RoomLink>,
    /// Room pairs whose corridor could not be routed within the retry budget.
    pub unconnected_pairs: Vec<(Coordinate, Coordinate)>,
    /// Room slots consumed by a forced branch because every direction was blocked.
    pub blocked_placements: u32,
    /// Rooms that kept their uncut rectangle after culling ran out of attempts.
    pub culling_fallbacks: u32,
}

impl GenerationResult {
    pub fn is_fully_connected(&self) -> bool {
        self.unconnected_pairs.is_empty()
    }

    /// Sorted tiles a spawner may draw from; corridors are optional like a rooms-only spawn list.
    pub fn walkable_tiles(&self, include_corridors: bool) -> Vec<Coordinate> {
        let mut tiles: Vec<Coordinate> = self.floor_tiles.iter().copied().collect();
        if include_corridors {
            tiles.extend(
                self.corridor_tiles.iter().filter(|tile| !self.floor_tiles.contains(*tile)),
            );
        }
        tiles.sort_unstable();
        tiles
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        push_sorted_tiles(&mut bytes, &self.floor_tiles);
        push_sorted_tiles(&mut bytes, &self.corridor_tiles);

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in self.rooms.iter() {
            push_coordinate(&mut bytes, room.anchor);
            push_coordinate(&mut bytes, room.extents);
        }

        bytes.extend((self.connections.len() as u32).to_le_bytes());
        for connection in &self.connections {
            push_coordinate(&mut bytes, connection.from);
            push_coordinate(&mut bytes, connection.to);
            match connection.link {
                Link::Touching => bytes.push(0),
                Link::Corridor { exit, entry } => {
                    bytes.push(1);
                    push_coordinate(&mut bytes, exit);
                    push_coordinate(&mut bytes, entry);
                }
            }
        }

        bytes.extend((self.unconnected_pairs.len() as u32).to_le_bytes());
        for &(from, to) in &self.unconnected_pairs {
            push_coordinate(&mut bytes, from);
            push_coordinate(&mut bytes, to);
        }
        bytes.extend(self.blocked_placements.to_le_bytes());
        bytes.extend(self.culling_fallbacks.to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_sorted_tiles(bytes: &mut Vec<u8>, tiles: &TileSet) {
    let mut sorted: Vec<Coordinate> = tiles.iter().copied().collect();
    sorted.sort_unstable();
    bytes.extend((sorted.len() as u32).to_le_bytes());
    for tile in sorted {
        push_coordinate(bytes, tile);
    }
}

fn push_coordinate(bytes: &mut Vec<u8>, pos: Coordinate) {
    bytes.extend(pos.x.to_le_bytes());
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.z.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_table_keeps_insertion_order_and_overwrites_duplicates() {
        let mut table = RoomTable::new();
        let first = Coordinate::new(0, 0, 0);
        let second = Coordinate::new(6, 0, 0);
        table.insert(first, Coordinate::new(3, 3, 0));
        table.insert(second, Coordinate::new(9, 2, 0));
        table.insert(first, Coordinate::new(4, 4, 0));

        assert_eq!(table.len(), 2);
        assert_eq!(table.anchors().collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(table.extents_of(first), Some(Coordinate::new(4, 4, 0)));
        assert_eq!(table.at(1).map(|room| room.anchor), Some(second));
    }

    #[test]
    fn room_table_serializes_as_ordered_list() {
        let mut table = RoomTable::new();
        table.insert(Coordinate::new(5, 0, 0), Coordinate::new(7, 2, 0));
        table.insert(Coordinate::new(0, 0, 0), Coordinate::new(2, 2, 0));

        let json = serde_json::to_string(&table).expect("serialize");
        assert!(json.starts_with(r#"[{"anchor":{"x":5"#), "{json}");
        let decoded: RoomTable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, table);
        assert_eq!(decoded.get(Coordinate::new(0, 0, 0)).map(|room| room.extents.x), Some(2));
    }

    #[test]
    fn canonical_bytes_ignore_set_insertion_order() {
        let tiles = [Coordinate::new(0, 0, 0), Coordinate::new(1, 0, 0), Coordinate::new(0, 1, 0)];
        let forward: TileSet = tiles.iter().copied().collect();
        let backward: TileSet = tiles.iter().rev().copied().collect();

        let make = |floor_tiles: TileSet| GenerationResult {
            floor_tiles,
            corridor_tiles: TileSet::default(),
            rooms: RoomTable::new(),
            connections: Vec::new(),
            unconnected_pairs: Vec::new(),
            blocked_placements: 0,
            culling_fallbacks: 0,
        };
        assert_eq!(make(forward).fingerprint(), make(backward).fingerprint());
    }
}
