//! Corridor routing between two placed rooms.
//!
//! Rooms sharing a column range get a straight corridor along Y, rooms sharing a
//! row range get one along X, and diagonal neighbours get an L-shaped corridor
//! whose elbow order is picked at random, with one fallback to the other order.
//! Endpoints must already be floor; carved tiles never include floor tiles.

use crate::config::GenerationConfig;
use crate::rng::DungeonRng;
use crate::types::{Coordinate, Room};

use super::model::TileSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Connection {
    /// Corridor from `exit`, a floor tile of the first room, to `entry`, one of the second.
    Carved { exit: Coordinate, entry: Coordinate },
    /// The rooms already touch or overlap along the corridor axis.
    Touching,
    Unconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, pos: Coordinate) -> i32 {
        match self {
            Self::X => pos.x,
            Self::Y => pos.y,
        }
    }

    fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Coordinate whose component on `self` is `along` and on the other axis is `across`.
    fn point(self, along: i32, across: i32, z: i32) -> Coordinate {
        match self {
            Self::X => Coordinate::new(along, across, z),
            Self::Y => Coordinate::new(across, along, z),
        }
    }

    /// Inclusive range both rooms cover on this axis, if any.
    fn shared_range(self, a: &Room, b: &Room) -> Option<(i32, i32)> {
        let lo = self.of(a.anchor).max(self.of(b.anchor));
        let hi = self.of(a.extents).min(self.of(b.extents));
        (lo <= hi).then_some((lo, hi))
    }
}

/// Which leg of an L-shaped corridor leaves the first room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElbowOrder {
    XFirst,
    YFirst,
}

impl ElbowOrder {
    fn leaving_axis(self) -> Axis {
        match self {
            Self::XFirst => Axis::X,
            Self::YFirst => Axis::Y,
        }
    }

    fn alternate(self) -> Self {
        match self {
            Self::XFirst => Self::YFirst,
            Self::YFirst => Self::XFirst,
        }
    }
}

pub(crate) struct CorridorRouter<'a> {
    floor: &'a TileSet,
    corridors: &'a mut TileSet,
    attempts: u32,
}

impl<'a> CorridorRouter<'a> {
    pub(crate) fn new(
        floor: &'a TileSet,
        corridors: &'a mut TileSet,
        config: &GenerationConfig,
    ) -> Self {
        Self { floor, corridors, attempts: config.attempt_budget() }
    }

    pub(crate) fn connect(&mut self, from: &Room, to: &Room, rng: &mut DungeonRng) -> Connection {
        if let Some(lanes) = Axis::X.shared_range(from, to) {
            return self.straight(Axis::Y, lanes, from, to, rng);
        }
        if let Some(lanes) = Axis::Y.shared_range(from, to) {
            return self.straight(Axis::X, lanes, from, to, rng);
        }

        let first = if rng.bool() { ElbowOrder::XFirst } else { ElbowOrder::YFirst };
        for order in [first, first.alternate()] {
            if let Some((exit, entry)) = self.elbow(order.leaving_axis(), from, to, rng) {
                return Connection::Carved { exit, entry };
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(?order, from = ?from.anchor, to = ?to.anchor, "elbow order exhausted");
        }
        Connection::Unconnected
    }

    /// Single corridor running along `run` between the facing edges, on a lane both rooms share.
    fn straight(
        &mut self,
        run: Axis,
        (lane_lo, lane_hi): (i32, i32),
        a: &Room,
        b: &Room,
        rng: &mut DungeonRng,
    ) -> Connection {
        let a_is_near = run.of(b.anchor) > run.of(a.anchor);
        let (near, far) = if a_is_near { (a, b) } else { (b, a) };
        let start = run.of(near.extents);
        let end = run.of(far.anchor);
        if end - start <= 1 {
            return Connection::Touching;
        }

        let z = a.anchor.z;
        for _ in 0..self.attempts {
            let lane = rng.int_range(lane_lo, lane_hi);
            let from = run.point(start, lane, z);
            let to = run.point(end, lane, z);
            if self.floor.contains(&from) && self.floor.contains(&to) {
                self.carve_between(from, to);
                let (exit, entry) = if a_is_near { (from, to) } else { (to, from) };
                return Connection::Carved { exit, entry };
            }
        }
        Connection::Unconnected
    }

    /// L-shaped corridor leaving `a` along `leave` and entering `b` along the other axis.
    fn elbow(
        &mut self,
        leave: Axis,
        a: &Room,
        b: &Room,
        rng: &mut DungeonRng,
    ) -> Option<(Coordinate, Coordinate)> {
        let turn = leave.other();
        let exit_face = if leave.of(b.anchor) > leave.of(a.anchor) {
            leave.of(a.extents)
        } else {
            leave.of(a.anchor)
        };
        let entry_face = if turn.of(b.anchor) > turn.of(a.anchor) {
            turn.of(b.anchor)
        } else {
            turn.of(b.extents)
        };

        let z = a.anchor.z;
        for _ in 0..self.attempts {
            let lane_in_b = rng.int_range(leave.of(b.anchor), leave.of(b.extents));
            let lane_in_a = rng.int_range(turn.of(a.anchor), turn.of(a.extents));
            let from = leave.point(exit_face, lane_in_a, z);
            let to = leave.point(lane_in_b, entry_face, z);
            if !(self.floor.contains(&from) && self.floor.contains(&to)) {
                continue;
            }

            let joint = leave.point(lane_in_b, lane_in_a, z);
            if !self.floor.contains(&joint) {
                self.corridors.insert(joint);
            }
            self.carve_between(from, joint);
            self.carve_between(joint, to);
            return Some((from, to));
        }
        None
    }

    /// Marks every non-floor tile strictly between two axis-aligned points.
    fn carve_between(&mut self, from: Coordinate, to: Coordinate) {
        debug_assert!(from.x == to.x || from.y == to.y);
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        let mut cursor = from.offset(dx, dy);
        while cursor != to {
            if !self.floor.contains(&cursor) {
                self.corridors.insert(cursor);
            }
            cursor = cursor.offset(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn room(x: i32, y: i32, width: i32, height: i32) -> (Room, Vec<Coordinate>) {
        let anchor = Coordinate::new(x, y, 0);
        let extents = Coordinate::new(x + width - 1, y + height - 1, 0);
        let tiles = (x..x + width)
            .flat_map(|tx| (y..y + height).map(move |ty| Coordinate::new(tx, ty, 0)))
            .collect();
        (Room { anchor, extents }, tiles)
    }

    fn floor_of(rooms: &[&[Coordinate]]) -> TileSet {
        rooms.iter().flat_map(|tiles| tiles.iter().copied()).collect()
    }

    fn reachable(
        floor: &TileSet,
        corridors: &TileSet,
        start: Coordinate,
        goal: Coordinate,
    ) -> bool {
        let walkable = |pos: &Coordinate| floor.contains(pos) || corridors.contains(pos);
        let mut seen = TileSet::default();
        seen.insert(start);
        let mut open = VecDeque::from([start]);
        while let Some(pos) = open.pop_front() {
            if pos == goal {
                return true;
            }
            for next in pos.axis_neighbors() {
                if walkable(&next) && seen.insert(next) {
                    open.push_back(next);
                }
            }
        }
        false
    }

    fn route(a: &Room, b: &Room, floor: &TileSet, seed: u64) -> (Connection, TileSet) {
        route_with(&GenerationConfig::default(), a, b, floor, seed)
    }

    fn route_with(
        config: &GenerationConfig,
        a: &Room,
        b: &Room,
        floor: &TileSet,
        seed: u64,
    ) -> (Connection, TileSet) {
        let mut corridors = TileSet::default();
        let mut rng = DungeonRng::new(seed);
        let connection = CorridorRouter::new(floor, &mut corridors, config).connect(a, b, &mut rng);
        (connection, corridors)
    }

    #[test]
    fn straight_corridor_along_y_between_column_overlapping_rooms() {
        let (a, a_tiles) = room(0, 0, 4, 4);
        let (b, b_tiles) = room(1, 8, 4, 3);
        let floor = floor_of(&[&a_tiles, &b_tiles]);

        for seed in 0..10 {
            let (connection, corridors) = route(&a, &b, &floor, seed);
            let Connection::Carved { exit, entry } = connection else {
                panic!("expected a carved corridor, got {connection:?}");
            };
            assert_eq!((exit.y, entry.y), (3, 8));
            assert_eq!(exit.x, entry.x);
            assert_eq!(corridors.len(), 4, "gap rows 4..=7 should be carved");
            let column = corridors.iter().next().map(|pos| pos.x).unwrap_or_default();
            assert!((1..=3).contains(&column));
            assert!(corridors.iter().all(|pos| pos.x == column && (4..=7).contains(&pos.y)));
            assert!(reachable(&floor, &corridors, a.anchor, b.anchor));
        }
    }

    #[test]
    fn straight_corridor_along_x_when_b_is_behind() {
        let (a, a_tiles) = room(10, 0, 3, 5);
        let (b, b_tiles) = room(0, 2, 4, 4);
        let floor = floor_of(&[&a_tiles, &b_tiles]);

        let (connection, corridors) = route(&a, &b, &floor, 3);
        let Connection::Carved { exit, entry } = connection else {
            panic!("expected a carved corridor, got {connection:?}");
        };
        assert_eq!((exit.x, entry.x), (10, 3), "exit stays on the first room's facing edge");
        assert_eq!(corridors.len(), 6);
        assert!(corridors.iter().all(|pos| (4..=9).contains(&pos.x) && (2..=4).contains(&pos.y)));
        assert!(reachable(&floor, &corridors, a.anchor, b.anchor));
    }

    #[test]
    fn touching_rooms_need_no_corridor() {
        let (a, a_tiles) = room(0, 0, 5, 5);
        let (b, b_tiles) = room(0, 5, 5, 5);
        let floor = floor_of(&[&a_tiles, &b_tiles]);
        let (connection, corridors) = route(&a, &b, &floor, 1);
        assert_eq!(connection, Connection::Touching);
        assert!(corridors.is_empty());
    }

    #[test]
    fn diagonal_rooms_get_an_l_shaped_corridor_in_every_quadrant() {
        let (a, a_tiles) = room(0, 0, 3, 3);
        for (bx, by) in [(8, 8), (8, -8), (-8, 8), (-8, -8)] {
            let (b, b_tiles) = room(bx, by, 3, 3);
            let floor = floor_of(&[&a_tiles, &b_tiles]);
            for seed in 0..8 {
                let (connection, corridors) = route(&a, &b, &floor, seed);
                let Connection::Carved { exit, entry } = connection else {
                    panic!("quadrant ({bx},{by}) seed {seed}: got {connection:?}");
                };
                assert!(a.contains_xy(exit) && b.contains_xy(entry));
                assert!(floor.contains(&exit) && floor.contains(&entry));
                assert!(corridors.iter().all(|pos| !floor.contains(pos)));
                assert!(
                    reachable(&floor, &corridors, a.anchor, b.anchor),
                    "quadrant ({bx},{by}) seed {seed} should be walkable end to end"
                );
            }
        }
    }

    #[test]
    fn elbow_falls_back_to_alternate_order() {
        // Only row y=0 of A and (8, 8) of B are floor, so only the X-first order can work.
        let config = GenerationConfig { max_loops: 200, ..GenerationConfig::default() };
        let a = Room { anchor: Coordinate::new(0, 0, 0), extents: Coordinate::new(2, 2, 0) };
        let b = Room { anchor: Coordinate::new(8, 8, 0), extents: Coordinate::new(10, 10, 0) };
        let floor: TileSet = [
            Coordinate::new(0, 0, 0),
            Coordinate::new(1, 0, 0),
            Coordinate::new(2, 0, 0),
            Coordinate::new(8, 8, 0),
        ]
        .into_iter()
        .collect();

        for seed in 0..16 {
            let (connection, corridors) = route_with(&config, &a, &b, &floor, seed);
            assert!(matches!(connection, Connection::Carved { .. }), "seed {seed}");
            assert!(corridors.contains(&Coordinate::new(8, 0, 0)), "elbow joint is reserved");
            assert!(reachable(&floor, &corridors, Coordinate::new(2, 0, 0), b.anchor));
        }
    }

    #[test]
    fn unreachable_endpoints_leave_rooms_unconnected() {
        let a = Room { anchor: Coordinate::new(0, 0, 0), extents: Coordinate::new(2, 2, 0) };
        let b = Room { anchor: Coordinate::new(8, 8, 0), extents: Coordinate::new(10, 10, 0) };
        let floor = TileSet::default();
        let (connection, corridors) = route(&a, &b, &floor, 5);
        assert_eq!(connection, Connection::Unconnected);
        assert!(corridors.is_empty());
    }
}
