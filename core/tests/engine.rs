//! Full-day engine tests: clock, customers, settlement, panels.

use shopkeep_core::{
    command::PlayerCommand,
    config::ShopConfig,
    day_cycle::DayState,
    engine::{Panel, ShopEngine},
    error::SimError,
    event::ShopEvent,
    layout::Piece,
};

fn build(run_id: &str, seed: u64) -> ShopEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    ShopEngine::build_test(run_id.to_string(), seed).expect("build test engine")
}

/// Run one-second frames until the summary panel shows.
fn run_to_close(engine: &mut ShopEngine) -> Vec<ShopEvent> {
    let mut events = Vec::new();
    for _ in 0..100 {
        events.extend(engine.update(1.0).unwrap());
        if engine.panel == Panel::Summary {
            return events;
        }
    }
    panic!("day never closed");
}

fn spent(events: &[ShopEvent]) -> f64 {
    events
        .iter()
        .filter_map(|e| match e {
            ShopEvent::CustomerArrived { spent, .. } => Some(*spent),
            _ => None,
        })
        .sum()
}

#[test]
fn new_engine_lays_out_the_shop() {
    let engine = build("engine-init", 1);

    assert_eq!(engine.day, 1);
    assert_eq!(engine.state(), DayState::Prep);
    assert_eq!(engine.panel, Panel::None);
    assert_eq!(engine.ledger.money, 100.0);
    assert_eq!(engine.ledger.yesterday_money, 100.0);
    assert_eq!(engine.layout.iter().filter(|r| r.piece == Piece::FloorTile).count(), 100);
    assert_eq!(engine.layout.len(), 132);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = ShopConfig::default_test();
    config.store_open_time = config.store_close_time;
    config.store_close_time.hour -= 1;

    let err = ShopEngine::build_test_with("engine-bad".into(), 1, config).err();
    assert!(matches!(err, Some(SimError::InvalidConfig { .. })));
}

#[test]
fn a_day_runs_prep_store_end() {
    let mut engine = build("engine-day", 2);
    let events = run_to_close(&mut engine);

    let phases: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ShopEvent::PhaseChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![(DayState::Prep, DayState::Store), (DayState::Store, DayState::End)]
    );
    assert_eq!(engine.frame, 10);
    assert!(!engine.cycle.clock.running);
}

#[test]
fn customers_stop_at_the_cap() {
    let mut engine = build("engine-cap", 3);
    run_to_close(&mut engine);

    // 540 open minutes at one arrival per 30 would be 18; the cap is 10.
    assert_eq!(engine.customers.current_customers, 10);
    assert_eq!(engine.customers.customers.len(), 10);
}

#[test]
fn no_customers_without_a_store_phase() {
    let mut engine = build("engine-prep", 3);
    for _ in 0..50 {
        engine.update(0.01).unwrap();
    }
    assert_eq!(engine.state(), DayState::Prep);
    assert_eq!(engine.customers.current_customers, 0);
}

#[test]
fn sales_flow_into_the_settlement() {
    let mut engine = build("engine-sales", 4);
    engine.apply(PlayerCommand::SelectShelf { slot: 1 }).unwrap();
    engine.apply(PlayerCommand::PlaceShelf { x: 2, y: 2 }).unwrap();
    engine.apply(PlayerCommand::HireEmployee).unwrap();

    let events = run_to_close(&mut engine);
    let takings = spent(&events);
    let summary = engine.last_summary.clone().expect("settled");

    assert_eq!(summary.revenue, takings);
    assert_eq!(summary.shelf_cost, 5);
    assert_eq!(summary.wage_cost, 20);
    assert_eq!(summary.total, takings - 25.0);
    assert_eq!(engine.ledger.money, 100.0 + takings + summary.total);

    let sold = (takings / 4.0) as u32;
    assert_eq!(engine.shelves[0].load_amount, 10 - sold);
}

#[test]
fn stocked_shelf_serves_every_arrival() {
    let mut engine = build("engine-stocked", 3);
    engine.apply(PlayerCommand::SelectShelf { slot: 1 }).unwrap();
    engine.apply(PlayerCommand::PlaceShelf { x: 2, y: 2 }).unwrap();

    let events = run_to_close(&mut engine);
    let shelf_ids: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ShopEvent::CustomerArrived { shelf_id, .. } => Some(*shelf_id),
            _ => None,
        })
        .collect();

    // Ten units on the shelf, ten customers under the cap.
    assert_eq!(shelf_ids.len(), 10);
    assert!(shelf_ids.iter().all(|id| *id == Some(engine.shelves[0].id)));
    assert_eq!(engine.shelves[0].load_amount, 0);
    assert_eq!(spent(&events), 40.0);
}

#[test]
fn empty_shelves_send_customers_away_empty_handed() {
    let mut engine = build("engine-empty", 3);
    // Tables carry no stock.
    engine.apply(PlayerCommand::SelectShelf { slot: 0 }).unwrap();
    engine.apply(PlayerCommand::PlaceShelf { x: 2, y: 2 }).unwrap();

    let events = run_to_close(&mut engine);
    assert!(events.iter().all(|e| !matches!(
        e,
        ShopEvent::CustomerArrived { shelf_id: Some(_), .. }
    )));
    assert_eq!(spent(&events), 0.0);
    assert_eq!(engine.customers.current_customers, 10);
}

#[test]
fn arrivals_are_stamped_with_their_own_minute() {
    let mut engine = build("engine-arrival-times", 3);
    run_to_close(&mut engine);

    // Open at 540, one arrival per 30 minutes, two per one-second frame.
    let times: Vec<f64> = engine.customers.customers.iter().map(|c| c.arrived_at).collect();
    let expected: Vec<f64> = (1..=10).map(|i| 540.0 + 30.0 * f64::from(i)).collect();
    assert_eq!(times, expected);
}

#[test]
fn added_money_counts_as_revenue() {
    let mut engine = build("engine-add", 5);
    engine.apply(PlayerCommand::AddMoney { amount: 50.0 }).unwrap();
    run_to_close(&mut engine);

    let summary = engine.last_summary.clone().unwrap();
    assert_eq!(summary.revenue, 50.0);
    assert_eq!(engine.ledger.money, 200.0);
}

#[test]
fn settlement_happens_once_per_day() {
    let mut engine = build("engine-once", 6);
    run_to_close(&mut engine);
    let money = engine.ledger.money;

    for _ in 0..20 {
        let events = engine.update(1.0).unwrap();
        assert!(events.is_empty());
    }
    assert_eq!(engine.ledger.money, money);
    assert_eq!(engine.store().event_count("engine-once", "day_settled").unwrap(), 1);
}

#[test]
fn summary_text_is_available_after_close() {
    let mut engine = build("engine-text", 7);
    assert_eq!(engine.summary_text(), None);
    run_to_close(&mut engine);

    let text = engine.summary_text().unwrap();
    assert!(text.starts_with("Revenue Gained 0\n"));
    assert!(text.ends_with("\n\nEST. RENT DUE SUNDAY: 567"));
}

#[test]
fn panels_must_be_confirmed_in_order() {
    let mut engine = build("engine-panels", 8);

    let err = engine.apply(PlayerCommand::ConfirmSummary).unwrap_err();
    assert!(matches!(err, SimError::WrongPanel { expected: "summary", actual: "none" }));

    run_to_close(&mut engine);
    let err = engine.apply(PlayerCommand::ConfirmUpgrade).unwrap_err();
    assert!(matches!(err, SimError::WrongPanel { expected: "upgrade", actual: "summary" }));

    engine.apply(PlayerCommand::ConfirmSummary).unwrap();
    assert_eq!(engine.panel, Panel::Upgrade);
    assert_eq!(engine.state(), DayState::End, "still closed until upgrade is confirmed");

    let events = engine.apply(PlayerCommand::ConfirmUpgrade).unwrap();
    assert_eq!(engine.panel, Panel::None);
    assert!(matches!(
        events.as_slice(),
        [ShopEvent::DayAdvanced { day: 2, level: 2, customers_cleared: 10, max_customers: 12 }]
    ));
}

#[test]
fn next_day_starts_fresh() {
    let mut engine = build("engine-next", 9);
    engine.apply(PlayerCommand::SelectShelf { slot: 1 }).unwrap();
    engine.apply(PlayerCommand::PlaceShelf { x: 2, y: 2 }).unwrap();
    let layout_len = engine.layout.len();

    engine.run_days(1, 1.0).unwrap();

    assert_eq!(engine.day, 2);
    assert_eq!(engine.difficulty.level, 2);
    assert_eq!(engine.state(), DayState::Prep);
    assert_eq!(engine.cycle.clock.elapsed, 480.0);
    assert_eq!(engine.customers.current_customers, 0);
    assert_eq!(engine.customers.max_customers, 12);
    assert_eq!(engine.shelves[0].load_amount, 10);
    assert_eq!(engine.ledger.yesterday_money, engine.ledger.money);
    assert_eq!(engine.layout.len(), layout_len, "layout is kept between days");
}

#[test]
fn run_days_returns_one_summary_per_day() {
    let mut engine = build("engine-days", 10);
    let summaries = engine.run_days(3, 1.0).unwrap();

    let days: Vec<_> = summaries.iter().map(|s| s.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert_eq!(engine.day, 4);
    assert_eq!(engine.customers.max_customers, 17);
}

#[test]
fn run_days_refuses_a_frozen_clock() {
    let mut engine = build("engine-frozen", 11);
    let err = engine.run_days(1, 0.0).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig { .. }));
}

#[test]
fn restart_rebuilds_from_config() {
    let mut engine = build("engine-restart", 12);
    engine.apply(PlayerCommand::SelectShelf { slot: 1 }).unwrap();
    engine.apply(PlayerCommand::PlaceShelf { x: 2, y: 2 }).unwrap();
    engine.apply(PlayerCommand::HireEmployee).unwrap();
    engine.run_days(2, 1.0).unwrap();

    let events = engine.apply(PlayerCommand::Restart).unwrap();

    assert!(matches!(
        &events[0],
        ShopEvent::RunRestarted { previous_run_id, run_id }
            if previous_run_id == "engine-restart" && run_id == "engine-restart-restart-1"
    ));
    assert_eq!(engine.run_id, "engine-restart-restart-1");
    assert_eq!(engine.frame, 0);
    assert_eq!(engine.day, 1);
    assert_eq!(engine.difficulty.level, 1);
    assert_eq!(engine.ledger.money, 100.0);
    assert_eq!(engine.customers.max_customers, 10);
    assert!(engine.shelves.is_empty());
    assert!(engine.employees.is_empty());
    assert_eq!(engine.placement.selected(), None);
    assert_eq!(engine.state(), DayState::Prep);
    assert_eq!(engine.last_summary, None);
}
