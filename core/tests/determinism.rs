//! Two engines, same seed, same commands.
//! They must produce byte-identical event logs.

use shopkeep_core::{command::PlayerCommand, engine::ShopEngine};

fn build_engine(run_id: &str, seed: u64) -> ShopEngine {
    let mut engine = ShopEngine::build_test(run_id.to_string(), seed).expect("build engine");
    for (slot, x) in [(1usize, 1), (2, 3), (6, 5)] {
        engine.apply(PlayerCommand::SelectShelf { slot }).expect("select");
        engine.apply(PlayerCommand::PlaceShelf { x, y: 4 }).expect("place");
    }
    engine
}

fn collect_event_log(engine: &ShopEngine) -> Vec<String> {
    (1..=engine.day)
        .flat_map(|day| {
            engine
                .store()
                .events_for_day(&engine.run_id, day)
                .expect("read events")
                .into_iter()
                .map(|e| e.payload)
        })
        .collect()
}

#[test]
fn same_seed_produces_identical_event_logs() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let mut engine_a = build_engine("det-a", SEED);
    let mut engine_b = build_engine("det-b", SEED);

    engine_a.run_days(5, 0.25).expect("engine_a run");
    engine_b.run_days(5, 0.25).expect("engine_b run");

    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    // run_id only appears in the very first event.
    assert_eq!(log_a.len(), log_b.len());
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate().skip(1) {
        assert_eq!(a, b, "Event log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
    assert_eq!(engine_a.ledger, engine_b.ledger);
}

#[test]
fn different_seeds_produce_different_logs() {
    let mut engine_a = build_engine("det-42", 42);
    let mut engine_b = build_engine("det-99", 99);

    engine_a.run_days(3, 0.25).expect("run a");
    engine_b.run_days(3, 0.25).expect("run b");

    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    let any_different = log_a.iter().zip(log_b.iter()).skip(1).any(|(a, b)| a != b);
    assert!(any_different, "Different seeds produced identical logs — seed is not being used");
}
