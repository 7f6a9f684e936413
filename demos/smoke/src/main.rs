//! End-to-end smoke run: the classic 10-tunnel, 100-vehicle scenario.
//!
//! Prints each event line, replays the log through the verifier, and exports
//! `events.csv` into the working directory.
//!
//! ```text
//! cargo run -p tn-smoke
//! ```

use std::path::Path;
use std::process::ExitCode;

use tn_core::Vehicle;
use tn_sim::{RunSummary, SimBuilder, SimConfig, SimError, SimObserver};

struct Progress;

impl SimObserver for Progress {
    fn on_vehicle_done(&mut self, vehicle: &Vehicle) {
        println!("{vehicle} has completed");
    }
}

fn run() -> Result<RunSummary, SimError> {
    let mut sim = SimBuilder::new(SimConfig::default()).build()?;
    let summary = sim.run(&mut Progress)?;

    for event in &summary.events {
        println!("{event}");
    }
    println!("{}", summary.verify);

    tn_log::write_events(Path::new("events.csv"), &summary.events)?;
    println!("wrote {} events to events.csv", summary.events.len());

    Ok(summary)
}

fn main() -> ExitCode {
    match run() {
        Ok(summary) if summary.verify.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("smoke run failed: {e}");
            ExitCode::FAILURE
        }
    }
}
