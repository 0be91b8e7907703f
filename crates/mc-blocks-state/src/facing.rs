//! Block faces, axes, and the horizontal-facing capability record.

use serde::{Deserialize, Serialize};

use crate::error::StateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Down,
        Facing::Up,
        Facing::North,
        Facing::South,
        Facing::West,
        Facing::East,
    ];

    /// Horizontal faces in scan order. Flow-direction tie-breaking depends on it.
    pub const HORIZONTAL: [Facing; 4] = [Facing::North, Facing::South, Facing::West, Facing::East];

    pub fn opposite(self) -> Facing {
        match self {
            Facing::Down => Facing::Up,
            Facing::Up => Facing::Down,
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Facing::Down | Facing::Up => Axis::Y,
            Facing::North | Facing::South => Axis::Z,
            Facing::West | Facing::East => Axis::X,
        }
    }

    /// Whether the face points along the positive direction of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Facing::Up | Facing::South | Facing::East)
    }

    pub fn is_horizontal(self) -> bool {
        self.axis() != Axis::Y
    }

    /// Unit offset `(dx, dy, dz)` of the neighbor on this face.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Facing::Down => (0, -1, 0),
            Facing::Up => (0, 1, 0),
            Facing::North => (0, 0, -1),
            Facing::South => (0, 0, 1),
            Facing::West => (-1, 0, 0),
            Facing::East => (1, 0, 0),
        }
    }

    /// Rotate a horizontal face around the Y axis. Vertical faces are returned unchanged.
    pub fn rotate_y(self, clockwise: bool) -> Facing {
        let rotated = match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
            other => return other,
        };
        if clockwise {
            rotated
        } else {
            rotated.opposite()
        }
    }
}

/// A facing restricted to the four horizontal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorizontalFacing(Facing);

impl HorizontalFacing {
    pub const NORTH: HorizontalFacing = HorizontalFacing(Facing::North);
    pub const EAST: HorizontalFacing = HorizontalFacing(Facing::East);
    pub const SOUTH: HorizontalFacing = HorizontalFacing(Facing::South);
    pub const WEST: HorizontalFacing = HorizontalFacing(Facing::West);

    pub fn new(facing: Facing) -> Result<Self, StateError> {
        if !facing.is_horizontal() {
            return Err(StateError::NotHorizontal(facing));
        }
        Ok(Self(facing))
    }

    pub fn get(self) -> Facing {
        self.0
    }

    pub fn opposite(self) -> Self {
        Self(self.0.opposite())
    }

    /// Decode the two-bit legacy value (clockwise from north).
    pub fn from_legacy(raw: u8) -> Self {
        match raw & 0x03 {
            0 => Self::NORTH,
            1 => Self::EAST,
            2 => Self::SOUTH,
            _ => Self::WEST,
        }
    }

    pub fn to_legacy(self) -> u8 {
        match self.0 {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
            _ => unreachable!("HorizontalFacing only holds horizontal faces"),
        }
    }
}

impl Default for HorizontalFacing {
    fn default() -> Self {
        Self::NORTH
    }
}

impl From<HorizontalFacing> for Facing {
    fn from(value: HorizontalFacing) -> Self {
        value.0
    }
}

/// Decode a three-bit any-facing value. 6 and 7 are undefined.
pub fn read_facing(raw: u8) -> Option<Facing> {
    match raw {
        0 => Some(Facing::Down),
        1 => Some(Facing::Up),
        2 => Some(Facing::North),
        3 => Some(Facing::South),
        4 => Some(Facing::West),
        5 => Some(Facing::East),
        _ => None,
    }
}

pub fn write_facing(facing: Facing) -> u8 {
    match facing {
        Facing::Down => 0,
        Facing::Up => 1,
        Facing::North => 2,
        Facing::South => 3,
        Facing::West => 4,
        Facing::East => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for f in Facing::ALL {
            assert_eq!(f.opposite().opposite(), f);
            assert_ne!(f.opposite(), f);
            assert_eq!(f.opposite().axis(), f.axis());
        }
    }

    #[test]
    fn rotate_y_clockwise_cycle() {
        assert_eq!(Facing::North.rotate_y(true), Facing::East);
        assert_eq!(Facing::East.rotate_y(true), Facing::South);
        assert_eq!(Facing::South.rotate_y(true), Facing::West);
        assert_eq!(Facing::West.rotate_y(true), Facing::North);
        assert_eq!(Facing::North.rotate_y(false), Facing::West);
        assert_eq!(Facing::Up.rotate_y(true), Facing::Up);
    }

    #[test]
    fn horizontal_rejects_vertical() {
        assert!(HorizontalFacing::new(Facing::Up).is_err());
        assert_eq!(
            HorizontalFacing::new(Facing::West).unwrap(),
            HorizontalFacing::WEST
        );
    }

    #[test]
    fn legacy_horizontal_mapping() {
        assert_eq!(HorizontalFacing::from_legacy(1), HorizontalFacing::EAST);
        for raw in 0..4 {
            assert_eq!(HorizontalFacing::from_legacy(raw).to_legacy(), raw);
        }
    }

    #[test]
    fn any_facing_mapping() {
        for f in Facing::ALL {
            assert_eq!(read_facing(write_facing(f)), Some(f));
        }
        assert_eq!(read_facing(6), None);
        assert_eq!(read_facing(7), None);
    }
}
