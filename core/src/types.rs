//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};

/// A host frame counter. One frame = one `update()` call.
pub type Frame = u64;

/// In-game day number, starting at 1.
pub type Day = u32;

/// In-game minutes since midnight.
pub type Minutes = f64;

/// A stable identifier for any shelf, employee or customer.
pub type EntityId = u64;

/// The canonical run identifier.
pub type RunId = String;

/// Integer grid coordinate. Walls live one cell outside the floor,
/// so coordinates may be -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// World-space point on the shop plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
