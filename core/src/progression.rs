//! Difficulty progression — what changes between one day and the next.

use crate::{
    customers::CustomerGenerator,
    day_cycle::DayCycle,
    ledger::Ledger,
    shop::Shelf,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIFFICULTY_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level:  u32,
    pub factor: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY_FACTOR)
    }
}

/// Result of a day advance, for logging and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAdvance {
    pub level:             u32,
    pub customers_cleared: u32,
    pub max_customers:     u32,
}

impl Difficulty {
    pub fn new(factor: f64) -> Self {
        Self { level: 1, factor }
    }

    /// Move to the next level and reset every per-day piece of state.
    /// The layout is left as is.
    pub fn advance_day(
        &mut self,
        customers: &mut CustomerGenerator,
        shelves: &mut [Shelf],
        ledger: &mut Ledger,
        cycle: &mut DayCycle,
    ) -> DayAdvance {
        self.level += 1;
        self.adjust_difficulty();

        let customers_cleared = customers.clear();
        let max_customers = customers.scale_cap(self.factor);

        shelves.iter_mut().for_each(Shelf::restock);
        ledger.roll_over();
        cycle.start_day();

        log::info!(
            "advanced to level {}: cleared {customers_cleared} customers, cap now {max_customers}",
            self.level
        );

        DayAdvance {
            level: self.level,
            customers_cleared,
            max_customers,
        }
    }

    /// Hook for level-driven tuning. Customer cap scaling in
    /// `advance_day` is the only difficulty lever today.
    pub fn adjust_difficulty(&mut self) {}
}
