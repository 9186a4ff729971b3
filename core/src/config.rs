use crate::{
    error::{SimError, SimResult},
    layout::{GridSpec, WallSide, WallSpec},
    types::{Minutes, Vec2},
};
use serde::{Deserialize, Serialize};

/// An hour/minute pair on the in-game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn as_minutes(&self) -> Minutes {
        f64::from(self.hour) * 60.0 + f64::from(self.minute)
    }
}

/// The ten placeable shelf slots, in the order the build menu lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelfKind {
    Table,
    Apple,
    Durian,
    DragonFruit,
    Halberd,
    Axe,
    Sword,
    Love,
    Haste,
    Poison,
}

impl ShelfKind {
    pub const ALL: [ShelfKind; 10] = [
        ShelfKind::Table,
        ShelfKind::Apple,
        ShelfKind::Durian,
        ShelfKind::DragonFruit,
        ShelfKind::Halberd,
        ShelfKind::Axe,
        ShelfKind::Sword,
        ShelfKind::Love,
        ShelfKind::Haste,
        ShelfKind::Poison,
    ];

    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    pub fn slot(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfTemplate {
    pub kind: ShelfKind,
    pub label: String,
    /// Daily supplies bill charged at settlement.
    pub cost_to_maintain: i64,
    pub initial_load_amount: u32,
    /// Paid by a customer for one unit.
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub initial_time: ClockTime,
    pub store_open_time: ClockTime,
    pub store_close_time: ClockTime,
    /// In-game minutes per real second.
    pub time_scale_factor: f64,
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: f32,
    #[serde(default)]
    pub origin: Vec2,
    pub difficulty_factor: f64,
    pub entrance_side: WallSide,
    pub entrance_offset: i32,
    pub exit_side: WallSide,
    pub exit_offset: i32,
    pub starting_money: f64,
    pub initial_max_customers: u32,
    pub spawn_interval_minutes: Minutes,
    pub shelves: Vec<ShelfTemplate>,
}

impl ShopConfig {
    /// Load from a JSON file.
    /// In tests, use ShopConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ShopConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        let fail = |reason: &str| -> SimResult<()> {
            Err(SimError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return fail("grid dimensions must be positive");
        }
        if !(self.cell_size > 0.0) {
            return fail("cell_size must be positive");
        }
        if !(self.time_scale_factor >= 0.0) {
            return fail("time_scale_factor must not be negative");
        }
        if self.store_open_time.as_minutes() > self.store_close_time.as_minutes() {
            return fail("store must open before it closes");
        }
        if !(self.difficulty_factor > 0.0) {
            return fail("difficulty_factor must be positive");
        }
        if !(self.spawn_interval_minutes > 0.0) {
            return fail("spawn_interval_minutes must be positive");
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec {
            width: self.grid_width,
            height: self.grid_height,
            cell_size: self.cell_size,
            origin: self.origin,
        }
    }

    pub fn walls(&self) -> WallSpec {
        WallSpec {
            entrance_side: self.entrance_side,
            entrance_offset: self.entrance_offset,
            exit_side: self.exit_side,
            exit_offset: self.exit_offset,
        }
    }

    pub fn shelf_template(&self, kind: ShelfKind) -> Option<&ShelfTemplate> {
        self.shelves.iter().find(|t| t.kind == kind)
    }

    /// Minimal config for tests: a 10x10 floor open 09:00-18:00.
    pub fn default_test() -> Self {
        let shelf = |kind, label: &str, cost, load, price| ShelfTemplate {
            kind,
            label: label.into(),
            cost_to_maintain: cost,
            initial_load_amount: load,
            unit_price: price,
        };
        Self {
            initial_time: ClockTime::new(8, 0),
            store_open_time: ClockTime::new(9, 0),
            store_close_time: ClockTime::new(18, 0),
            time_scale_factor: 60.0,
            grid_width: 10,
            grid_height: 10,
            cell_size: 1.0,
            origin: Vec2::ZERO,
            difficulty_factor: 1.2,
            entrance_side: WallSide::Left,
            entrance_offset: 2,
            exit_side: WallSide::Right,
            exit_offset: 2,
            starting_money: 100.0,
            initial_max_customers: 10,
            spawn_interval_minutes: 30.0,
            shelves: vec![
                shelf(ShelfKind::Table, "Table", 2, 0, 0.0),
                shelf(ShelfKind::Apple, "Apple", 5, 10, 4.0),
                shelf(ShelfKind::Durian, "Durian", 8, 6, 9.0),
                shelf(ShelfKind::Sword, "Sword", 12, 3, 25.0),
            ],
        }
    }
}
