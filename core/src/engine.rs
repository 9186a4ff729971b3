//! The shop engine — the one context object that owns a run.
//!
//! FRAME ORDER (fixed, documented, never reordered):
//!   1. Day cycle      (clock advance, PREP → STORE → END)
//!   2. Customers      (only for the minutes the store was open)
//!   3. Settlement     (only on the frame the day enters END)
//!
//! Between days the host drives the two end-of-day panels:
//!   Summary --confirm_summary--> Upgrade --confirm_upgrade--> next day
//!
//! RULES:
//!   - The engine owns every shelf, employee and customer; nothing is
//!     looked up globally.
//!   - All randomness flows through the RngBank streams.
//!   - Every emitted event is appended to the store's event log.

use crate::{
    command::PlayerCommand,
    config::ShopConfig,
    customers::CustomerGenerator,
    day_cycle::{DayCycle, DayState},
    error::{SimError, SimResult},
    event::{EventLogEntry, ShopEvent},
    layout::{generate_floor, generate_walls, GridSpec, Piece, PlacementRequest},
    ledger::{DailySummary, Ledger},
    placement::ShelfPlacement,
    progression::Difficulty,
    rng::{RngBank, StreamRng, StreamSlot},
    shop::{Employee, IdAllocator, Shelf},
    snapshot::ShopSnapshot,
    store::SimStore,
    types::{Cell, Day, Frame, RunId, Vec2},
};
use serde::{Deserialize, Serialize};

/// Upper bound on frames spent waiting for a single day to end.
const MAX_FRAMES_PER_DAY: u64 = 10_000_000;

/// Which end-of-day panel the host should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    None,
    Summary,
    Upgrade,
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None    => "none",
            Self::Summary => "summary",
            Self::Upgrade => "upgrade",
        }
    }
}

pub struct ShopEngine {
    pub run_id:       RunId,
    pub config:       ShopConfig,
    pub frame:        Frame,
    pub day:          Day,
    pub cycle:        DayCycle,
    pub grid:         GridSpec,
    pub layout:       Vec<PlacementRequest>,
    pub shelves:      Vec<Shelf>,
    pub employees:    Vec<Employee>,
    pub customers:    CustomerGenerator,
    pub ledger:       Ledger,
    pub difficulty:   Difficulty,
    pub placement:    ShelfPlacement,
    pub panel:        Panel,
    pub last_summary: Option<DailySummary>,
    seed:             u64,
    base_run_id:      RunId,
    restarts:         u32,
    ids:              IdAllocator,
    purchases_rng:    StreamRng,
    store:            SimStore,
}

impl ShopEngine {
    /// Build an engine and lay out the first day.
    /// The run row must already exist in `store`.
    pub fn new(run_id: RunId, seed: u64, config: ShopConfig, store: SimStore) -> SimResult<Self> {
        config.validate()?;
        let bank = RngBank::new(seed);
        let mut engine = Self {
            cycle:        DayCycle::new(&config),
            grid:         config.grid(),
            customers:    CustomerGenerator::new(
                config.initial_max_customers,
                config.spawn_interval_minutes,
            ),
            ledger:       Ledger::new(config.starting_money),
            difficulty:   Difficulty::new(config.difficulty_factor),
            frame:        0,
            day:          1,
            layout:       Vec::new(),
            shelves:      Vec::new(),
            employees:    Vec::new(),
            placement:    ShelfPlacement::default(),
            panel:        Panel::None,
            last_summary: None,
            ids:          IdAllocator::default(),
            purchases_rng: bank.stream(StreamSlot::Purchases),
            restarts:     0,
            base_run_id:  run_id.clone(),
            seed,
            config,
            store,
            run_id,
        };

        let init = ShopEvent::RunInitialized {
            run_id: engine.run_id.clone(),
            seed,
        };
        let layout = engine.initialize_level();
        engine.record(&[init, layout])?;
        Ok(engine)
    }

    /// Engine over an in-memory store with the test config.
    pub fn build_test(run_id: RunId, seed: u64) -> SimResult<Self> {
        Self::build_test_with(run_id, seed, ShopConfig::default_test())
    }

    pub fn build_test_with(run_id: RunId, seed: u64, config: ShopConfig) -> SimResult<Self> {
        let store = SimStore::in_memory()?;
        store.migrate()?;
        store.insert_run(&run_id, seed, "0.1.0-test")?;
        Self::new(run_id, seed, config, store)
    }

    /// Advance one host frame by `delta_real_seconds` of real time.
    pub fn update(&mut self, delta_real_seconds: f64) -> SimResult<Vec<ShopEvent>> {
        self.frame += 1;
        let mut events = Vec::new();

        let state_before = self.cycle.state;
        let before = self.cycle.clock.elapsed;
        let step = self.cycle.advance(delta_real_seconds);
        let now = self.cycle.clock.elapsed;

        for change in &step.changes {
            events.push(ShopEvent::PhaseChanged {
                day:    self.day,
                from:   change.from,
                to:     change.to,
                minute: change.at,
            });
        }

        let opened_this_frame = step.changes.iter().any(|c| c.to == DayState::Store);
        if state_before == DayState::Store || opened_this_frame {
            let open_minutes =
                now.min(self.cycle.close_at()) - before.max(self.cycle.open_at());
            if open_minutes > 0.0 {
                let window_end = now.min(self.cycle.close_at());
                events.extend(self.run_customers(open_minutes, window_end));
            }
        }

        if step.settlement_due {
            events.push(self.settle()?);
        }

        self.record(&events)?;
        Ok(events)
    }

    /// Apply a player command. Returns the events it produced.
    pub fn apply(&mut self, command: PlayerCommand) -> SimResult<Vec<ShopEvent>> {
        let events = match command {
            PlayerCommand::SelectShelf { slot } => {
                let kind = self.placement.select(slot, &self.config)?;
                log::debug!("placement armed with {kind:?}");
                vec![]
            }
            PlayerCommand::CancelPlacement => {
                self.placement.cancel();
                vec![]
            }
            PlayerCommand::PlaceShelf { x, y } => vec![self.place_shelf(Cell::new(x, y))?],
            PlayerCommand::PlaceShelfAt { world_x, world_y } => {
                let cell = ShelfPlacement::cell_under(Vec2::new(world_x, world_y), &self.grid)?;
                vec![self.place_shelf(cell)?]
            }
            PlayerCommand::HireEmployee => {
                let employee = Employee {
                    id: self.ids.next_id(),
                    hired_on: self.day,
                };
                let event = ShopEvent::EmployeeHired {
                    day: self.day,
                    employee_id: employee.id,
                };
                self.employees.push(employee);
                vec![event]
            }
            PlayerCommand::AddMoney { amount } => {
                self.ledger.add_money(amount);
                vec![ShopEvent::MoneyAdded { day: self.day, amount }]
            }
            PlayerCommand::ConfirmSummary => {
                self.expect_panel(Panel::Summary)?;
                self.panel = Panel::Upgrade;
                vec![ShopEvent::SummaryConfirmed { day: self.day }]
            }
            PlayerCommand::ConfirmUpgrade => {
                self.expect_panel(Panel::Upgrade)?;
                self.panel = Panel::None;
                vec![self.start_next_level()]
            }
            PlayerCommand::Restart => self.restart()?,
        };
        self.record(&events)?;
        Ok(events)
    }

    /// Run frames of `delta_real_seconds` until `days` days have been
    /// settled and advanced. Panels are confirmed automatically.
    pub fn run_days(&mut self, days: u32, delta_real_seconds: f64) -> SimResult<Vec<DailySummary>> {
        if !(delta_real_seconds > 0.0) || !(self.cycle.clock.time_scale_factor > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: "run_days needs a positive frame delta and time scale".into(),
            });
        }

        let mut summaries = Vec::new();
        for _ in 0..days {
            let mut frames = 0;
            while self.panel == Panel::None {
                self.update(delta_real_seconds)?;
                frames += 1;
                if frames > MAX_FRAMES_PER_DAY {
                    return Err(SimError::Other(anyhow::anyhow!(
                        "day {} did not end within {MAX_FRAMES_PER_DAY} frames",
                        self.day
                    )));
                }
            }
            if let Some(summary) = &self.last_summary {
                summaries.push(summary.clone());
            }
            if self.panel == Panel::Summary {
                self.apply(PlayerCommand::ConfirmSummary)?;
            }
            self.apply(PlayerCommand::ConfirmUpgrade)?;
        }
        Ok(summaries)
    }

    pub fn state(&self) -> DayState {
        self.cycle.state
    }

    /// Rendered text for the summary panel, if a day has been settled.
    pub fn summary_text(&self) -> Option<String> {
        self.last_summary.as_ref().map(ToString::to_string)
    }

    pub fn snapshot(&self) -> ShopSnapshot {
        ShopSnapshot {
            run_id:        self.run_id.clone(),
            day:           self.day,
            state:         self.cycle.state,
            clock:         self.cycle.clock.clone(),
            ledger:        self.ledger.clone(),
            difficulty:    self.difficulty.clone(),
            max_customers: self.customers.max_customers,
            customers:     self.customers.current_customers,
            shelves:       self.shelves.clone(),
            employees:     self.employees.clone(),
        }
    }

    pub fn store(&self) -> &SimStore {
        &self.store
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ── Internals ──────────────────────────────────────────────

    /// Lay out the floor and walls and start day one in PREP.
    fn initialize_level(&mut self) -> ShopEvent {
        self.ledger.roll_over();
        self.layout.clear();
        generate_floor(&self.grid, &mut self.layout);
        generate_walls(&self.grid, &self.config.walls(), &mut self.layout);
        self.cycle.start_day();

        let floor_tiles = self
            .layout
            .iter()
            .filter(|r| r.piece == Piece::FloorTile)
            .count();
        let wall_pieces = self.layout.len() - floor_tiles;
        log::info!(
            "level initialized: {}x{} floor, {floor_tiles} tiles, {wall_pieces} wall pieces",
            self.grid.width,
            self.grid.height
        );
        ShopEvent::LayoutGenerated { floor_tiles, wall_pieces }
    }

    fn run_customers(&mut self, open_minutes: f64, window_end: f64) -> Vec<ShopEvent> {
        let arrivals = self.customers.update(
            open_minutes,
            window_end,
            &mut self.shelves,
            &mut self.ids,
            &mut self.purchases_rng,
        );
        arrivals
            .into_iter()
            .map(|arrival| {
                self.ledger.add_money(arrival.spent);
                ShopEvent::CustomerArrived {
                    day:         self.day,
                    customer_id: arrival.customer.id,
                    shelf_id:    arrival.customer.bought_from,
                    spent:       arrival.spent,
                }
            })
            .collect()
    }

    fn settle(&mut self) -> SimResult<ShopEvent> {
        let summary = self
            .ledger
            .settle(self.day, &self.shelves, &self.employees, &self.grid);
        self.panel = Panel::Summary;
        self.store.save_settlement(&self.run_id, &summary)?;

        let json = serde_json::to_string(&self.snapshot())?;
        self.store.save_snapshot(&self.run_id, self.day, &json)?;
        log::debug!("snapshot saved for day {}", self.day);

        self.last_summary = Some(summary.clone());
        Ok(ShopEvent::DaySettled { summary })
    }

    fn start_next_level(&mut self) -> ShopEvent {
        self.day += 1;
        let advance = self.difficulty.advance_day(
            &mut self.customers,
            &mut self.shelves,
            &mut self.ledger,
            &mut self.cycle,
        );
        ShopEvent::DayAdvanced {
            day:               self.day,
            level:             advance.level,
            customers_cleared: advance.customers_cleared,
            max_customers:     advance.max_customers,
        }
    }

    fn place_shelf(&mut self, cell: Cell) -> SimResult<ShopEvent> {
        if self.cycle.state == DayState::End {
            return Err(SimError::WrongPhase { state: self.cycle.state });
        }
        let shelf = self.placement.place(
            cell,
            &self.grid,
            &self.config,
            &self.shelves,
            &mut self.ids,
        )?;
        log::debug!("placed {:?} shelf {} at ({}, {})", shelf.kind, shelf.id, cell.x, cell.y);
        let event = ShopEvent::ShelfPlaced {
            day:      self.day,
            shelf_id: shelf.id,
            kind:     shelf.kind,
            cell,
        };
        self.shelves.push(shelf);
        Ok(event)
    }

    /// Throw the whole shop away and start over from config.
    /// The fresh attempt logs under its own run id, so the audit trail
    /// of the abandoned attempt stays intact.
    fn restart(&mut self) -> SimResult<Vec<ShopEvent>> {
        self.restarts += 1;
        let previous_run_id = std::mem::replace(
            &mut self.run_id,
            format!("{}-restart-{}", self.base_run_id, self.restarts),
        );
        self.store
            .insert_run(&self.run_id, self.seed, env!("CARGO_PKG_VERSION"))?;

        let bank = RngBank::new(self.seed);
        self.purchases_rng = bank.stream(StreamSlot::Purchases);
        self.cycle = DayCycle::new(&self.config);
        self.customers = CustomerGenerator::new(
            self.config.initial_max_customers,
            self.config.spawn_interval_minutes,
        );
        self.ledger = Ledger::new(self.config.starting_money);
        self.difficulty = Difficulty::new(self.config.difficulty_factor);
        self.day = 1;
        self.frame = 0;
        self.shelves.clear();
        self.employees.clear();
        self.placement.cancel();
        self.panel = Panel::None;
        self.last_summary = None;
        self.ids = IdAllocator::default();

        log::info!("run {previous_run_id} restarted as {}", self.run_id);
        Ok(vec![
            ShopEvent::RunRestarted {
                previous_run_id,
                run_id: self.run_id.clone(),
            },
            self.initialize_level(),
        ])
    }

    fn expect_panel(&self, expected: Panel) -> SimResult<()> {
        if self.panel != expected {
            return Err(SimError::WrongPanel {
                expected: expected.name(),
                actual:   self.panel.name(),
            });
        }
        Ok(())
    }

    fn record(&self, events: &[ShopEvent]) -> SimResult<()> {
        for event in events {
            let entry = EventLogEntry {
                id:         None,
                run_id:     self.run_id.clone(),
                day:        self.day,
                frame:      self.frame,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            };
            self.store.append_event(&entry)?;
        }
        Ok(())
    }
}
