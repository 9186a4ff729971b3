//! Entities the shop owns: shelves on the floor and the staff.

use crate::{
    config::{ShelfKind, ShelfTemplate},
    types::{Cell, Day, EntityId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id:                  EntityId,
    pub kind:                ShelfKind,
    pub cell:                Cell,
    pub cost_to_maintain:    i64,
    pub load_amount:         u32,
    pub initial_load_amount: u32,
    pub unit_price:          f64,
}

impl Shelf {
    pub fn from_template(id: EntityId, cell: Cell, template: &ShelfTemplate) -> Self {
        Self {
            id,
            kind: template.kind,
            cell,
            cost_to_maintain: template.cost_to_maintain,
            load_amount: template.initial_load_amount,
            initial_load_amount: template.initial_load_amount,
            unit_price: template.unit_price,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.load_amount > 0
    }

    /// Take one unit off the shelf. Returns the price paid, or None if empty.
    pub fn take_one(&mut self) -> Option<f64> {
        if !self.in_stock() {
            return None;
        }
        self.load_amount -= 1;
        Some(self.unit_price)
    }

    pub fn restock(&mut self) {
        self.load_amount = self.initial_load_amount;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id:       EntityId,
    pub hired_on: Day,
}

/// Hands out entity ids. Ids are never reused within a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: EntityId,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        self.next += 1;
        self.next
    }
}
