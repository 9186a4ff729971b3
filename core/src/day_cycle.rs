//! Day cycle — the PREP → STORE → END state machine.
//!
//! Transitions are driven only by the scaled clock crossing the
//! configured open and close thresholds. Both transitions may fire in
//! the same frame when a large delta jumps past both. END stops the
//! clock; only `start_day()` brings the cycle back to PREP.

use crate::{clock::DayClock, config::ShopConfig, types::Minutes};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// Doors closed, the player lays out shelves.
    Prep,
    /// Doors open, customers arrive.
    Store,
    /// Doors closed, waiting on the summary.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub from: DayState,
    pub to:   DayState,
    pub at:   Minutes,
}

/// What happened during one `advance()` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleStep {
    pub changes:        Vec<PhaseChange>,
    /// Set on the single frame the day enters END.
    pub settlement_due: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCycle {
    pub clock: DayClock,
    pub state: DayState,
    open:      Minutes,
    close:     Minutes,
    settled:   bool,
}

impl DayCycle {
    pub fn new(config: &ShopConfig) -> Self {
        Self {
            clock:   DayClock::new(config.initial_time.as_minutes(), config.time_scale_factor),
            state:   DayState::Prep,
            open:    config.store_open_time.as_minutes(),
            close:   config.store_close_time.as_minutes(),
            settled: false,
        }
    }

    pub fn advance(&mut self, delta_real_seconds: f64) -> CycleStep {
        let mut step = CycleStep::default();

        if self.clock.running {
            let now = self.clock.advance(delta_real_seconds);
            if self.state == DayState::Prep && now >= self.open {
                self.transition(DayState::Store, &mut step);
            }
            if self.state == DayState::Store && now >= self.close {
                self.transition(DayState::End, &mut step);
            }
            if self.state == DayState::End && !self.settled {
                self.settled = true;
                step.settlement_due = true;
            }
        }

        match self.state {
            DayState::Prep | DayState::Store => self.clock.resume(),
            DayState::End => self.clock.stop(),
        }
        step
    }

    /// Rewind to the start of a fresh day: initial time, PREP, running.
    pub fn start_day(&mut self) {
        self.clock.reset();
        self.state = DayState::Prep;
        self.settled = false;
        self.clock.resume();
    }

    pub fn open_at(&self) -> Minutes  { self.open }
    pub fn close_at(&self) -> Minutes { self.close }

    fn transition(&mut self, to: DayState, step: &mut CycleStep) {
        log::info!(
            "day cycle: {:?} -> {:?} at {}",
            self.state,
            to,
            self.clock.label()
        );
        step.changes.push(PhaseChange {
            from: self.state,
            to,
            at: self.clock.elapsed,
        });
        self.state = to;
    }
}
