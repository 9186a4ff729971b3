//! Floor and wall layout around the shop floor.
//!
//! The floor spans cells [0,w) x [0,h). Walls sit on the ring one cell
//! outside it. The bottom row (y = -1) is open between the two bottom
//! corners: only an entrance or exit could go there, and none of the
//! three wall sides reaches it.

use crate::types::{Cell, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width:     i32,
    pub height:    i32,
    pub cell_size: f32,
    pub origin:    Vec2,
}

impl GridSpec {
    /// Corner of a cell in world space.
    pub fn corner_position(&self, x: i32, y: i32) -> Vec2 {
        self.origin + Vec2::new(x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    /// Centre of a cell in world space.
    pub fn cell_world_position(&self, x: i32, y: i32) -> Vec2 {
        let half = self.cell_size * 0.5;
        self.corner_position(x, y) + Vec2::new(half, half)
    }

    /// Floor cell containing a world point, or None off the floor.
    pub fn cell_at(&self, world: Vec2) -> Option<Cell> {
        let x = ((world.x - self.origin.x) / self.cell_size).floor() as i32;
        let y = ((world.y - self.origin.y) / self.cell_size).floor() as i32;
        let cell = Cell::new(x, y);
        self.contains(cell).then_some(cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Estimated rent: `(height - 1) * (width - 1) * 7`.
    pub fn rent(&self) -> i64 {
        i64::from(self.height - 1) * i64::from(self.width - 1) * 7
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Top,
    Left,
    Right,
}

/// Where the doors go. Offsets run along the side: y for Left/Right,
/// x for Top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSpec {
    pub entrance_side:   WallSide,
    pub entrance_offset: i32,
    pub exit_side:       WallSide,
    pub exit_offset:     i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    FloorTile,
    Entrance,
    Exit,
    SideWall,
    TopWall,
    BottomWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub piece:    Piece,
    pub cell:     Cell,
    pub position: Vec2,
}

/// Receives one request per object the host should materialize.
pub trait LayoutSink {
    fn place(&mut self, request: PlacementRequest);
}

impl LayoutSink for Vec<PlacementRequest> {
    fn place(&mut self, request: PlacementRequest) {
        self.push(request);
    }
}

/// Emit a floor tile for every cell of the grid, column by column.
pub fn generate_floor(grid: &GridSpec, sink: &mut impl LayoutSink) {
    for x in 0..grid.width {
        for y in 0..grid.height {
            sink.place(request(grid, Piece::FloorTile, x, y));
        }
    }
}

/// Emit doors first, then the generic walls that don't collide with them.
pub fn generate_walls(grid: &GridSpec, walls: &WallSpec, sink: &mut impl LayoutSink) {
    let mut doors: HashSet<Cell> = HashSet::new();

    for x in -1..=grid.width {
        for y in -1..=grid.height {
            if let Some(piece) = door_at(grid, walls, x, y) {
                doors.insert(Cell::new(x, y));
                sink.place(request(grid, piece, x, y));
            }
        }
    }

    let mut wall = |piece: Piece, x: i32, y: i32| {
        if !doors.contains(&Cell::new(x, y)) {
            sink.place(request(grid, piece, x, y));
        }
    };

    for x in 0..grid.width {
        wall(Piece::TopWall, x, grid.height);
    }
    for y in 1..=grid.height {
        wall(Piece::SideWall, -1, y);
        wall(Piece::SideWall, grid.width, y);
    }
    wall(Piece::BottomWall, -1, 0);
    wall(Piece::BottomWall, grid.width, 0);
}

/// Door precedence: left entrance, left exit, right entrance, right
/// exit, top entrance, top exit.
fn door_at(grid: &GridSpec, walls: &WallSpec, x: i32, y: i32) -> Option<Piece> {
    let on = |side: WallSide, offset: i32| match side {
        WallSide::Left  => x == -1 && y == offset,
        WallSide::Right => x == grid.width && y == offset,
        WallSide::Top   => y == grid.height && x == offset,
    };
    let sides = [WallSide::Left, WallSide::Right, WallSide::Top];
    sides.into_iter().find_map(|side| {
        if walls.entrance_side == side && on(side, walls.entrance_offset) {
            Some(Piece::Entrance)
        } else if walls.exit_side == side && on(side, walls.exit_offset) {
            Some(Piece::Exit)
        } else {
            None
        }
    })
}

fn request(grid: &GridSpec, piece: Piece, x: i32, y: i32) -> PlacementRequest {
    PlacementRequest {
        piece,
        cell: Cell::new(x, y),
        position: grid.cell_world_position(x, y),
    }
}
