use crate::{day_cycle::DayState, types::Cell};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("No shelf configured for slot {slot}")]
    UnknownShelfSlot { slot: usize },

    #[error("No shelf selected for placement")]
    NoShelfSelected,

    #[error("Cell ({}, {}) is outside the shop floor", .cell.x, .cell.y)]
    CellOutOfBounds { cell: Cell },

    #[error("Cell ({}, {}) already holds a shelf", .cell.x, .cell.y)]
    CellOccupied { cell: Cell },

    #[error("Expected the {expected} panel, but {actual} is showing")]
    WrongPanel { expected: &'static str, actual: &'static str },

    #[error("Not allowed during {state:?}")]
    WrongPhase { state: DayState },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
