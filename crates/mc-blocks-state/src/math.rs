//! Block positions, vectors, and axis-aligned boxes.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::facing::{Axis, Facing};

/// Integer world coordinates of a block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn side(self, facing: Facing) -> Self {
        let (dx, dy, dz) = facing.offset();
        self.offset(dx, dy, dz)
    }

    pub fn up(self) -> Self {
        self.side(Facing::Up)
    }

    pub fn down(self) -> Self {
        self.side(Facing::Down)
    }

    /// The six face-adjacent positions, in [`Facing::ALL`] order.
    pub fn sides(self) -> [BlockPos; 6] {
        Facing::ALL.map(|f| self.side(f))
    }
}

/// A floating point vector (click positions, flow vectors).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len)
        } else {
            Self::ZERO
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Axis-aligned box in block-local coordinates (the unit cube is `0..1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Aabb {
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// The full unit cube.
    pub const fn one() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }

    /// Move the given face outward by `distance` (inward when negative).
    pub fn stretch(mut self, face: Facing, distance: f64) -> Self {
        match face {
            Facing::Down => self.min_y -= distance,
            Facing::Up => self.max_y += distance,
            Facing::North => self.min_z -= distance,
            Facing::South => self.max_z += distance,
            Facing::West => self.min_x -= distance,
            Facing::East => self.max_x += distance,
        }
        self
    }

    /// Move the given face inward by `distance`.
    pub fn trim(self, face: Facing, distance: f64) -> Self {
        self.stretch(face, -distance)
    }

    /// Shrink both faces on `axis` inward by `distance`.
    pub fn squash(self, axis: Axis, distance: f64) -> Self {
        match axis {
            Axis::X => self.trim(Facing::West, distance).trim(Facing::East, distance),
            Axis::Y => self.trim(Facing::Down, distance).trim(Facing::Up, distance),
            Axis::Z => self.trim(Facing::North, distance).trim(Facing::South, distance),
        }
    }

    pub fn contract(self, x: f64, y: f64, z: f64) -> Self {
        self.squash(Axis::X, x).squash(Axis::Y, y).squash(Axis::Z, z)
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
