//! Day cycle state machine tests.
//!
//! Test config: start 08:00, open 09:00, close 18:00, 60 game minutes
//! per real second.

use shopkeep_core::{
    config::ShopConfig,
    day_cycle::{DayCycle, DayState},
};

fn cycle() -> DayCycle {
    DayCycle::new(&ShopConfig::default_test())
}

#[test]
fn starts_in_prep_at_initial_time() {
    let c = cycle();
    assert_eq!(c.state, DayState::Prep);
    assert_eq!(c.clock.elapsed, 480.0);
    assert!(c.clock.running);
}

#[test]
fn stays_in_prep_until_open_threshold() {
    let mut c = cycle();
    let step = c.advance(0.5);
    assert_eq!(c.clock.elapsed, 510.0);
    assert_eq!(c.state, DayState::Prep);
    assert!(step.changes.is_empty());
    assert!(!step.settlement_due);
}

#[test]
fn opens_exactly_at_threshold() {
    let mut c = cycle();
    let step = c.advance(1.0);
    assert_eq!(c.state, DayState::Store);
    assert_eq!(step.changes.len(), 1);
    assert_eq!(step.changes[0].from, DayState::Prep);
    assert_eq!(step.changes[0].to, DayState::Store);
    assert_eq!(step.changes[0].at, 540.0);
}

#[test]
fn closes_at_threshold_and_settles_once() {
    let mut c = cycle();
    c.advance(1.0);
    let step = c.advance(8.5);
    assert_eq!(c.state, DayState::Store);
    assert!(!step.settlement_due);

    let step = c.advance(0.5);
    assert_eq!(c.state, DayState::End);
    assert!(step.settlement_due);
    assert!(!c.clock.running);

    for _ in 0..5 {
        let step = c.advance(1.0);
        assert!(!step.settlement_due);
        assert!(step.changes.is_empty());
    }
    assert_eq!(c.clock.elapsed, 1080.0, "clock must stop in END");
}

#[test]
fn large_delta_crosses_both_thresholds_in_one_call() {
    let mut c = cycle();
    let step = c.advance(100.0);
    let path: Vec<_> = step.changes.iter().map(|ch| (ch.from, ch.to)).collect();
    assert_eq!(
        path,
        vec![(DayState::Prep, DayState::Store), (DayState::Store, DayState::End)]
    );
    assert!(step.settlement_due);
}

#[test]
fn start_day_returns_to_prep() {
    let mut c = cycle();
    c.advance(100.0);
    c.start_day();
    assert_eq!(c.state, DayState::Prep);
    assert_eq!(c.clock.elapsed, 480.0);
    assert!(c.clock.running);

    let step = c.advance(100.0);
    assert!(step.settlement_due, "a new day settles again");
}

#[test]
fn zero_time_scale_never_opens() {
    let mut config = ShopConfig::default_test();
    config.time_scale_factor = 0.0;
    let mut c = DayCycle::new(&config);
    for _ in 0..100 {
        c.advance(1.0);
    }
    assert_eq!(c.state, DayState::Prep);
}
