use std::process::exit;

use log::info;
use wordlebot::harness::Harness;
use wordlebot_strategies::{Entropy, Frequency, Hybrid, Minimax};

const RESULTS_PATH: &str = "strategy_results.json";

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        exit(1);
    }
}

fn run() -> wordlebot::Result<()> {
    let mut harness = Harness::new()
        .verbose()
        .add_baseline(Box::new(Entropy))
        .add_strategy(Box::new(Minimax))
        .add_strategy(Box::new(Frequency))
        .add_strategy(Box::new(Hybrid));

    // `wordlebot_runner all` tests every answer; `wordlebot_runner N`
    // samples N of them. The default matches a quick local run.
    harness = match std::env::args().nth(1).as_deref() {
        Some("all") => harness.test_all(),
        Some(n) => harness.test_num(n.parse().unwrap_or(200)),
        None => harness.test_num(200),
    };

    let record = harness.run()?;
    record.print_report()?;

    record.write_json(RESULTS_PATH)?;
    info!("wrote per-strategy results to {}", RESULTS_PATH);

    Ok(())
}
