//! Cash ledger and end-of-day settlement.
//!
//! Settlement runs exactly once per day, on the frame the day enters
//! END. Rent is an estimate shown to the player; it is not charged.

use crate::{
    layout::GridSpec,
    shop::{Employee, Shelf},
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat daily wage per employee.
pub const WAGE_PER_EMPLOYEE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub money:           f64,
    pub yesterday_money: f64,
}

impl Ledger {
    /// Open a ledger whose day starts with `money` on hand.
    pub fn new(money: f64) -> Self {
        Self {
            money,
            yesterday_money: money,
        }
    }

    pub fn add_money(&mut self, amount: f64) {
        self.money += amount;
    }

    /// Snapshot the balance as the baseline for the next day's revenue.
    pub fn roll_over(&mut self) {
        self.yesterday_money = self.money;
    }

    pub fn settle(
        &mut self,
        day: Day,
        shelves: &[Shelf],
        employees: &[Employee],
        grid: &GridSpec,
    ) -> DailySummary {
        let revenue = self.money - self.yesterday_money;
        let shelf_cost: i64 = shelves.iter().map(|s| s.cost_to_maintain).sum();
        let wage_cost = WAGE_PER_EMPLOYEE * employees.len() as i64;
        let rent = grid.rent();
        let total = revenue - shelf_cost as f64 - wage_cost as f64;
        self.money += total;

        log::info!(
            "day {day} settled: revenue={revenue} shelves={shelf_cost} wages={wage_cost} total={total} money={}",
            self.money
        );

        DailySummary {
            day,
            revenue,
            shelf_cost,
            wage_cost,
            total,
            rent,
            money_after: self.money,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day:         Day,
    pub revenue:     f64,
    pub shelf_cost:  i64,
    pub wage_cost:   i64,
    pub total:       f64,
    pub rent:        i64,
    pub money_after: f64,
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Revenue Gained {}\nSupplies for shelves: {}\nEmployee Wages: {}\nTotal: {}\n\nEST. RENT DUE SUNDAY: {}",
            self.revenue, self.shelf_cost, self.wage_cost, self.total, self.rent
        )
    }
}
