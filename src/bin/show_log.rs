//! Prints a saved movement log step by step
//!
//! Reads the JSON file written by the `save` command.

use gridbot::movement_log::MovementLog;
use gridbot::render::step_report;
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <robot_path.json>", args[0]);
        eprintln!("Prints every logged step of a saved movement log");
        std::process::exit(1);
    }

    let filename = &args[1];
    let log = match MovementLog::load_from_file(filename) {
        Ok(log) => log,
        Err(e) => {
            log::error!("Failed to read {}: {}", filename, e);
            std::process::exit(1);
        }
    };

    println!("=== Movement Log: {} ===\n", filename);

    for (step, record) in log.iter() {
        println!("Step {}", step);
        println!("{}\n", step_report(record));
    }

    let summary = log.summary();
    println!("=== Summary ===");
    println!("Total steps: {}", summary.total);
    println!("Moves: {}", summary.moves);
    println!("Turns: {}", summary.turns);
    println!("Blocked: {}", summary.blocked);
}
