use serde::{Deserialize, Serialize};

/// All player-issued commands.
/// Variants are appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Build menu ────────────────────────────────
    SelectShelf { slot: usize },
    CancelPlacement,
    PlaceShelf { x: i32, y: i32 },
    PlaceShelfAt { world_x: f32, world_y: f32 },

    // ── Staff and cash ────────────────────────────
    HireEmployee,
    AddMoney { amount: f64 },

    // ── End-of-day panels ─────────────────────────
    ConfirmSummary,
    ConfirmUpgrade,

    // ── Scene ─────────────────────────────────────
    Restart,
}
