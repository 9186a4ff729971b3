//! In-game clock — scaled elapsed minutes and the running flag.

use crate::types::Minutes;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayClock {
    pub elapsed:           Minutes,
    pub running:           bool,
    /// In-game minutes per real second.
    pub time_scale_factor: f64,
    initial:               Minutes,
}

impl DayClock {
    pub fn new(initial: Minutes, time_scale_factor: f64) -> Self {
        Self {
            elapsed: initial,
            running: true,
            time_scale_factor,
            initial,
        }
    }

    /// Advance by a real-time delta. Returns the new elapsed minutes.
    /// A stopped clock does not move.
    pub fn advance(&mut self, delta_real_seconds: f64) -> Minutes {
        if self.running {
            self.elapsed += self.time_scale_factor * delta_real_seconds;
        }
        self.elapsed
    }

    pub fn stop(&mut self)   { self.running = false; }
    pub fn resume(&mut self) { self.running = true;  }

    /// Rewind to the configured start-of-day time.
    pub fn reset(&mut self) {
        self.elapsed = self.initial;
    }

    /// Wall-clock style "HH:MM" label, wrapping past midnight.
    pub fn label(&self) -> String {
        let minutes = self.elapsed.max(0.0).rem_euclid(MINUTES_PER_DAY);
        let seconds = (minutes * 60.0) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_hours_and_minutes() {
        let clock = DayClock::new(8.0 * 60.0 + 5.0, 1.0);
        assert_eq!(clock.label(), "08:05");
    }

    #[test]
    fn label_wraps_past_midnight() {
        let clock = DayClock::new(25.0 * 60.0 + 30.0, 1.0);
        assert_eq!(clock.label(), "01:30");
    }

    #[test]
    fn stopped_clock_does_not_advance() {
        let mut clock = DayClock::new(0.0, 60.0);
        clock.advance(1.0);
        assert_eq!(clock.elapsed, 60.0);
        clock.stop();
        clock.advance(5.0);
        assert_eq!(clock.elapsed, 60.0);
    }
}
