//! day-runner: headless runner for the Shopkeep simulation.
//!
//! Usage:
//!   day-runner --seed 12345 --days 7 --db run.db --config data/shop_config.json
//!   day-runner --seed 12345 --ipc-mode

use anyhow::Result;
use shopkeep_core::{
    command::PlayerCommand,
    config::ShopConfig,
    day_cycle::DayState,
    engine::{Panel, ShopEngine},
    ledger::DailySummary,
    store::SimStore,
    types::{Day, Frame},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Frames {
        count: u64,
    },
    Command {
        command: PlayerCommand,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    frame: Frame,
    day: Day,
    level: u32,
    state: DayState,
    clock: String,
    running: bool,
    panel: Panel,
    money: f64,
    shelves: usize,
    employees: usize,
    customers: u32,
    max_customers: u32,
    summary_text: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 7u32);
    let frame_ms = parse_arg(&args, "--frame-ms", 16u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let config_path = string_arg(&args, "--config").unwrap_or("./data/shop_config.json");

    if !ipc_mode {
        println!("Shopkeep — day-runner");
        println!("  seed:      {seed}");
        println!("  days:      {days}");
        println!("  frame:     {frame_ms} ms");
        println!("  db:        {db}");
        println!("  config:    {config_path}");
        println!();
    }

    let config = ShopConfig::load(config_path)?;
    let store = SimStore::open(db)?;
    store.migrate()?;

    let run_id = format!("run-{seed}-{}", unix_seconds());
    store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"))?;

    let mut engine = ShopEngine::new(run_id, seed, config, store)?;
    let delta = frame_ms as f64 / 1000.0;

    if ipc_mode {
        run_ipc_loop(&mut engine, delta)?;
    } else {
        seed_starter_shop(&mut engine)?;
        let summaries = engine.run_days(days, delta)?;
        print_summary(&engine, &summaries);
    }

    Ok(())
}

/// A table, one fruit shelf and one clerk, so a headless run has
/// something to sell.
fn seed_starter_shop(engine: &mut ShopEngine) -> Result<()> {
    for (slot, x, y) in [(0usize, 4, 4), (1, 2, 5), (1, 6, 5)] {
        engine.apply(PlayerCommand::SelectShelf { slot })?;
        engine.apply(PlayerCommand::PlaceShelf { x, y })?;
    }
    engine.apply(PlayerCommand::CancelPlacement)?;
    engine.apply(PlayerCommand::HireEmployee)?;
    Ok(())
}

fn run_ipc_loop(engine: &mut ShopEngine, delta: f64) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown IPC command: {}", buffer.trim());
                write_json(&mut stdout, &serde_json::json!({ "error": e.to_string() }))?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Frames { count } => {
                for _ in 0..count {
                    engine.update(delta)?;
                }
                write_json(&mut stdout, &build_ui_state(engine))?;
            }
            IpcCommand::GetState => {
                write_json(&mut stdout, &build_ui_state(engine))?;
            }
            IpcCommand::Command { command } => match engine.apply(command) {
                Ok(_) => write_json(&mut stdout, &build_ui_state(engine))?,
                // Rejected commands are the player's problem, not the runner's.
                Err(e) => write_json(&mut stdout, &serde_json::json!({ "error": e.to_string() }))?,
            },
        }
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(value)?)?;
    out.flush()?;
    Ok(())
}

fn build_ui_state(engine: &ShopEngine) -> UiState {
    UiState {
        frame: engine.frame,
        day: engine.day,
        level: engine.difficulty.level,
        state: engine.state(),
        clock: engine.cycle.clock.label(),
        running: engine.cycle.clock.running,
        panel: engine.panel,
        money: engine.ledger.money,
        shelves: engine.shelves.len(),
        employees: engine.employees.len(),
        customers: engine.customers.current_customers,
        max_customers: engine.customers.max_customers,
        summary_text: engine.summary_text(),
    }
}

fn print_summary(engine: &ShopEngine, summaries: &[DailySummary]) {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {}", engine.run_id);
    println!("  frames:         {}", engine.frame);
    println!("  level:          {}", engine.difficulty.level);
    println!("  money:          {:.2}", engine.ledger.money);
    println!("  customer cap:   {}", engine.customers.max_customers);

    println!();
    println!("=== DAILY SETTLEMENTS ===");
    if summaries.is_empty() {
        println!("  (No days completed)");
    }
    for s in summaries {
        println!(
            "  Day {:>3} | Revenue: {:>8.2} | Shelves: {:>4} | Wages: {:>4} | Total: {:>8.2} | Rent est.: {}",
            s.day, s.revenue, s.shelf_cost, s.wage_cost, s.total, s.rent
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
