//! Shelf placement mode.
//!
//! The player arms a shelf slot from the build menu, then places it on
//! a free floor cell. Placement stays armed after a drop so several
//! shelves of the same kind can go down in a row.

use crate::{
    config::{ShelfKind, ShopConfig},
    error::{SimError, SimResult},
    layout::GridSpec,
    shop::{IdAllocator, Shelf},
    types::{Cell, Vec2},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfPlacement {
    selected: Option<ShelfKind>,
}

impl ShelfPlacement {
    /// Arm placement with a build-menu slot (0 = table, 1 = apple, ...).
    pub fn select(&mut self, slot: usize, config: &ShopConfig) -> SimResult<ShelfKind> {
        let kind = ShelfKind::from_slot(slot)
            .filter(|kind| config.shelf_template(*kind).is_some())
            .ok_or(SimError::UnknownShelfSlot { slot })?;
        self.selected = Some(kind);
        Ok(kind)
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<ShelfKind> {
        self.selected
    }

    pub fn place(
        &self,
        cell: Cell,
        grid: &GridSpec,
        config: &ShopConfig,
        shelves: &[Shelf],
        ids: &mut IdAllocator,
    ) -> SimResult<Shelf> {
        let kind = self.selected.ok_or(SimError::NoShelfSelected)?;
        let template = config
            .shelf_template(kind)
            .ok_or(SimError::UnknownShelfSlot { slot: kind.slot() })?;
        if !grid.contains(cell) {
            return Err(SimError::CellOutOfBounds { cell });
        }
        if shelves.iter().any(|s| s.cell == cell) {
            return Err(SimError::CellOccupied { cell });
        }
        Ok(Shelf::from_template(ids.next_id(), cell, template))
    }

    /// Map a world point (e.g. the cursor) to a floor cell.
    pub fn cell_under(world: Vec2, grid: &GridSpec) -> SimResult<Cell> {
        grid.cell_at(world).ok_or_else(|| SimError::CellOutOfBounds {
            cell: Cell::new(
                ((world.x - grid.origin.x) / grid.cell_size).floor() as i32,
                ((world.y - grid.origin.y) / grid.cell_size).floor() as i32,
            ),
        })
    }
}
