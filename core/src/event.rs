//! Everything the simulation reports back to the host.
//!
//! Every event is also appended to the store's event log, so the log is
//! a complete replay of a run.

use crate::{
    config::ShelfKind,
    day_cycle::DayState,
    ledger::DailySummary,
    types::{Cell, Day, EntityId, Frame, Minutes, RunId},
};
use serde::{Deserialize, Serialize};

/// Variants are appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShopEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id: RunId,
        seed: u64,
    },
    LayoutGenerated {
        floor_tiles: usize,
        wall_pieces: usize,
    },
    RunRestarted {
        previous_run_id: RunId,
        run_id: RunId,
    },

    // ── Day cycle ──────────────────────────────────
    PhaseChanged {
        day: Day,
        from: DayState,
        to: DayState,
        minute: Minutes,
    },
    DaySettled {
        summary: DailySummary,
    },
    SummaryConfirmed {
        day: Day,
    },
    DayAdvanced {
        day: Day,
        level: u32,
        customers_cleared: u32,
        max_customers: u32,
    },

    // ── Shop floor ─────────────────────────────────
    CustomerArrived {
        day: Day,
        customer_id: EntityId,
        shelf_id: Option<EntityId>,
        spent: f64,
    },
    ShelfPlaced {
        day: Day,
        shelf_id: EntityId,
        kind: ShelfKind,
        cell: Cell,
    },
    EmployeeHired {
        day: Day,
        employee_id: EntityId,
    },
    MoneyAdded {
        day: Day,
        amount: f64,
    },
}

impl ShopEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }   => "run_initialized",
            Self::LayoutGenerated { .. }  => "layout_generated",
            Self::RunRestarted { .. }     => "run_restarted",
            Self::PhaseChanged { .. }     => "phase_changed",
            Self::DaySettled { .. }       => "day_settled",
            Self::SummaryConfirmed { .. } => "summary_confirmed",
            Self::DayAdvanced { .. }      => "day_advanced",
            Self::CustomerArrived { .. }  => "customer_arrived",
            Self::ShelfPlaced { .. }      => "shelf_placed",
            Self::EmployeeHired { .. }    => "employee_hired",
            Self::MoneyAdded { .. }       => "money_added",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub run_id: RunId,
    pub day: Day,
    pub frame: Frame,
    pub event_type: String,
    pub payload: String, // JSON-serialized ShopEvent
}
