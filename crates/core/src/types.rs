use serde::{Deserialize, Serialize};

/// Integer grid position. `z` is the layer index and stays constant within a run.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, z: self.z }
    }

    pub fn axis_neighbors(self) -> [Self; 4] {
        [self.offset(1, 0), self.offset(0, 1), self.offset(-1, 0), self.offset(0, -1)]
    }

    pub fn is_axis_adjacent(self, other: Self) -> bool {
        self.z == other.z && self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// One placed room: the near corner it was built from and the far corner of its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub anchor: Coordinate,
    pub extents: Coordinate,
}

impl Room {
    pub fn contains_xy(&self, pos: Coordinate) -> bool {
        pos.x >= self.anchor.x
            && pos.x <= self.extents.x
            && pos.y >= self.anchor.y
            && pos.y <= self.extents.y
    }
}

/// The four axis-aligned sides of a tile, in the order walls are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    PosX,
    PosY,
    NegX,
    NegY,
}

impl Side {
    pub const ALL: [Self; 4] = [Self::PosX, Self::PosY, Self::NegX, Self::NegY];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::PosX => (1, 0),
            Self::PosY => (0, 1),
            Self::NegX => (-1, 0),
            Self::NegY => (0, -1),
        }
    }

    /// Yaw in degrees a renderer would give a wall piece on this side.
    pub const fn yaw_degrees(self) -> f32 {
        match self {
            Self::PosX => 0.0,
            Self::PosY => 90.0,
            Self::NegX => 180.0,
            Self::NegY => -90.0,
        }
    }
}

/// Diagonal quadrants used for corner pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    PosXNegY,
    PosXPosY,
    NegXPosY,
    NegXNegY,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [Self::PosXNegY, Self::PosXPosY, Self::NegXPosY, Self::NegXNegY];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::PosXNegY => (1, -1),
            Self::PosXPosY => (1, 1),
            Self::NegXPosY => (-1, 1),
            Self::NegXNegY => (-1, -1),
        }
    }

    /// The two axis sides that flank this diagonal.
    pub const fn flanking_sides(self) -> (Side, Side) {
        match self {
            Self::PosXNegY => (Side::NegY, Side::PosX),
            Self::PosXPosY => (Side::PosY, Side::PosX),
            Self::NegXPosY => (Side::PosY, Side::NegX),
            Self::NegXNegY => (Side::NegY, Side::NegX),
        }
    }

    pub const fn yaw_degrees(self) -> f32 {
        match self {
            Self::PosXNegY => 0.0,
            Self::PosXPosY => 90.0,
            Self::NegXPosY => 180.0,
            Self::NegXNegY => -90.0,
        }
    }
}
