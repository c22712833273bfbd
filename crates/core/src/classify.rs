//! Wall, corner and door classification over a finished layout.
//!
//! Renderers place one wall piece per exposed side, one inner corner piece where two
//! walls meet (both flanking sides and the diagonal are empty), and one outer corner
//! piece where both flanking sides are open and only the diagonal is missing. Each
//! flag maps to a [`Side`] or [`Quadrant`], whose `yaw_degrees` gives the piece rotation.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::mapgen::TileSet;
use crate::types::{Coordinate, Quadrant, Side};

bitflags! {
    /// Axis sides of a tile.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SideFlags: u8 {
        const POS_X = 1 << 0;
        const POS_Y = 1 << 1;
        const NEG_X = 1 << 2;
        const NEG_Y = 1 << 3;
    }
}

bitflags! {
    /// Diagonal quadrants of a tile.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct QuadrantFlags: u8 {
        const POS_X_NEG_Y = 1 << 0;
        const POS_X_POS_Y = 1 << 1;
        const NEG_X_POS_Y = 1 << 2;
        const NEG_X_NEG_Y = 1 << 3;
    }
}

impl From<Side> for SideFlags {
    fn from(side: Side) -> Self {
        match side {
            Side::PosX => Self::POS_X,
            Side::PosY => Self::POS_Y,
            Side::NegX => Self::NEG_X,
            Side::NegY => Self::NEG_Y,
        }
    }
}

impl From<Quadrant> for QuadrantFlags {
    fn from(quadrant: Quadrant) -> Self {
        match quadrant {
            Quadrant::PosXNegY => Self::POS_X_NEG_Y,
            Quadrant::PosXPosY => Self::POS_X_POS_Y,
            Quadrant::NegXPosY => Self::NEG_X_POS_Y,
            Quadrant::NegXNegY => Self::NEG_X_NEG_Y,
        }
    }
}

impl SideFlags {
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&side| self.contains(side.into()))
    }
}

impl QuadrantFlags {
    pub fn quadrants(self) -> impl Iterator<Item = Quadrant> {
        Quadrant::ALL.into_iter().filter(move |&quadrant| self.contains(quadrant.into()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Room,
    Corridor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileFlags {
    pub kind: TileKind,
    pub walls: SideFlags,
    pub inner_corners: QuadrantFlags,
    pub outer_corners: QuadrantFlags,
    /// Corridor sides that open onto room floor.
    pub doors: SideFlags,
}

impl TileFlags {
    /// A corridor tile touching room floor on exactly one side.
    pub fn is_door(&self) -> bool {
        self.kind == TileKind::Corridor && self.doors.bits().count_ones() == 1
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileClassification {
    tiles: BTreeMap<Coordinate, TileFlags>,
}

impl TileClassification {
    pub fn get(&self, pos: Coordinate) -> Option<&TileFlags> {
        self.tiles.get(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &TileFlags)> {
        self.tiles.iter().map(|(&pos, flags)| (pos, flags))
    }

    pub fn doors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter().filter(|(_, flags)| flags.is_door()).map(|(pos, _)| pos)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Classify every room and corridor tile. Corridor tiles that coincide with room
/// floor count as room floor.
pub fn classify(floor_tiles: &TileSet, corridor_tiles: &TileSet) -> TileClassification {
    let corridors: TileSet =
        corridor_tiles.iter().copied().filter(|tile| !floor_tiles.contains(tile)).collect();
    let walkable = |pos: Coordinate| floor_tiles.contains(&pos) || corridors.contains(&pos);

    let mut tiles = BTreeMap::new();
    let kinds = floor_tiles
        .iter()
        .map(|&pos| (pos, TileKind::Room))
        .chain(corridors.iter().map(|&pos| (pos, TileKind::Corridor)));
    for (pos, kind) in kinds {
        let open = |side: Side| {
            let (dx, dy) = side.delta();
            walkable(pos.offset(dx, dy))
        };

        let mut flags = TileFlags {
            kind,
            walls: SideFlags::empty(),
            inner_corners: QuadrantFlags::empty(),
            outer_corners: QuadrantFlags::empty(),
            doors: SideFlags::empty(),
        };
        for side in Side::ALL {
            if !open(side) {
                flags.walls |= side.into();
            }
            let (dx, dy) = side.delta();
            if kind == TileKind::Corridor && floor_tiles.contains(&pos.offset(dx, dy)) {
                flags.doors |= side.into();
            }
        }
        for quadrant in Quadrant::ALL {
            let (dx, dy) = quadrant.delta();
            if walkable(pos.offset(dx, dy)) {
                continue;
            }
            let (first, second) = quadrant.flanking_sides();
            match (open(first), open(second)) {
                (false, false) => flags.inner_corners |= quadrant.into(),
                (true, true) => flags.outer_corners |= quadrant.into(),
                _ => {}
            }
        }
        tiles.insert(pos, flags);
    }

    TileClassification { tiles }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tiles: &[(i32, i32)]) -> TileSet {
        tiles.iter().map(|&(x, y)| Coordinate::new(x, y, 0)).collect()
    }

    fn at(classification: &TileClassification, x: i32, y: i32) -> TileFlags {
        *classification.get(Coordinate::new(x, y, 0)).expect("classified tile")
    }

    #[test]
    fn lone_tile_is_walled_on_every_side() {
        let result = classify(&set(&[(0, 0)]), &TileSet::default());
        let flags = at(&result, 0, 0);
        assert_eq!(flags.walls, SideFlags::all());
        assert_eq!(flags.inner_corners, QuadrantFlags::all());
        assert!(flags.outer_corners.is_empty());
        assert!(!flags.is_door());
    }

    #[test]
    fn square_room_has_walls_and_inner_corners_on_its_rim() {
        let floor: Vec<(i32, i32)> = (0..3).flat_map(|x| (0..3).map(move |y| (x, y))).collect();
        let result = classify(&set(&floor), &TileSet::default());

        assert_eq!(result.len(), 9);
        let centre = at(&result, 1, 1);
        assert!(centre.walls.is_empty() && centre.inner_corners.is_empty());

        let corner = at(&result, 2, 2);
        assert_eq!(corner.walls, SideFlags::POS_X | SideFlags::POS_Y);
        assert_eq!(corner.inner_corners, QuadrantFlags::POS_X_POS_Y);
        assert_eq!(corner.walls.sides().collect::<Vec<_>>(), vec![Side::PosX, Side::PosY]);

        let edge = at(&result, 2, 1);
        assert_eq!(edge.walls, SideFlags::POS_X);
        assert!(edge.inner_corners.is_empty());
    }

    #[test]
    fn concave_notch_produces_outer_corner() {
        // An L-shape: the missing (1, 1) sits diagonal to (0, 0).
        let result = classify(&set(&[(0, 0), (1, 0), (0, 1)]), &TileSet::default());
        let elbow = at(&result, 0, 0);
        assert_eq!(elbow.outer_corners, QuadrantFlags::POS_X_POS_Y);
        assert_eq!(elbow.outer_corners.quadrants().collect::<Vec<_>>(), vec![Quadrant::PosXPosY]);
    }

    #[test]
    fn inner_corner_sits_where_two_walls_meet() {
        let result = classify(&set(&[(0, 0), (1, 0), (0, 1)]), &TileSet::default());
        let arm = at(&result, 1, 0);
        assert!(arm.walls.contains(SideFlags::POS_X | SideFlags::POS_Y));
        assert!(arm.inner_corners.contains(QuadrantFlags::POS_X_POS_Y));
        assert!(!arm.outer_corners.contains(QuadrantFlags::POS_X_POS_Y));

        let elbow = at(&result, 0, 0);
        assert!(!elbow.walls.intersects(SideFlags::POS_X | SideFlags::POS_Y));
        assert!(!elbow.inner_corners.contains(QuadrantFlags::POS_X_POS_Y));
    }

    #[test]
    fn corridor_touching_one_room_is_a_door() {
        let floor = set(&[(0, 0), (4, 0)]);
        let corridors = set(&[(1, 0), (2, 0), (3, 0)]);
        let result = classify(&floor, &corridors);

        let left = at(&result, 1, 0);
        assert_eq!(left.kind, TileKind::Corridor);
        assert_eq!(left.doors, SideFlags::NEG_X);
        assert!(left.is_door());
        assert!(!at(&result, 2, 0).is_door());
        assert_eq!(
            result.doors().collect::<Vec<_>>(),
            vec![Coordinate::new(1, 0, 0), Coordinate::new(3, 0, 0)]
        );
    }

    #[test]
    fn corridor_between_two_rooms_is_not_a_door() {
        let result = classify(&set(&[(0, 0), (2, 0)]), &set(&[(1, 0)]));
        let bridge = at(&result, 1, 0);
        assert_eq!(bridge.doors, SideFlags::POS_X | SideFlags::NEG_X);
        assert!(!bridge.is_door());
    }

    #[test]
    fn corridor_tiles_on_floor_are_pruned_to_room_tiles() {
        let result = classify(&set(&[(0, 0), (1, 0)]), &set(&[(1, 0), (2, 0)]));
        assert_eq!(result.len(), 3);
        assert_eq!(at(&result, 1, 0).kind, TileKind::Room);
        assert_eq!(at(&result, 2, 0).kind, TileKind::Corridor);
    }

    #[test]
    fn iteration_is_ordered_by_coordinate() {
        let result = classify(&set(&[(3, 0), (0, 2), (0, 0)]), &TileSet::default());
        let order: Vec<Coordinate> = result.iter().map(|(pos, _)| pos).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }
}
