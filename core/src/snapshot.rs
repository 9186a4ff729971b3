//! Snapshot serialization — end-of-day state to JSON.
//!
//! A snapshot is written after every settlement so a run can be
//! inspected day by day without replaying the event log.

use crate::{
    clock::DayClock,
    day_cycle::DayState,
    ledger::Ledger,
    progression::Difficulty,
    shop::{Employee, Shelf},
    types::{Day, RunId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub run_id:        RunId,
    pub day:           Day,
    pub state:         DayState,
    pub clock:         DayClock,
    pub ledger:        Ledger,
    pub difficulty:    Difficulty,
    pub max_customers: u32,
    pub customers:     u32,
    pub shelves:       Vec<Shelf>,
    pub employees:     Vec<Employee>,
}
