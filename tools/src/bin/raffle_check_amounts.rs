//! raffle-check-amounts: census of mail amounts against the ticket cost.
//!
//! Usage:
//!   raffle-check-amounts RaffleManager_Generated.lua
//!   raffle-check-amounts RaffleManager_Generated.lua -t 500 --json

use raffle_core::amounts;
use raffle_tools::{fail_usage, flag_present, opt_value, positionals, EXIT_ERROR, EXIT_FINDINGS};
use std::env;
use std::path::Path;
use std::process::exit;

const USAGE: &str = "\
Usage: raffle-check-amounts <file.lua> [options]

Options:
  -t, --ticket-cost <gold>  override the ticket cost instead of reading
                            it from the file's first account
      --json                emit the report as JSON

Reports what share of mail amounts divide evenly by the ticket cost.
Exits 0 when the distribution looks healthy, 1 when it is anomalous,
2 when the file cannot be read or parsed.";

const VALUE_FLAGS: &[&str] = &["--ticket-cost", "-t"];

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let json = flag_present(&args, "--json");

    let files = positionals(&args, VALUE_FLAGS);
    let [file] = files.as_slice() else {
        fail_usage(USAGE, format!("expected exactly one file, got {}", files.len()));
    };
    let path = Path::new(file);

    let override_cost = match opt_value(&args, VALUE_FLAGS) {
        Some(raw) => match raw.parse() {
            Ok(cost) => Some(cost),
            Err(_) => fail_usage(USAGE, format!("ticket cost must be an integer, got {raw:?}")),
        },
        None => None,
    };

    let report = match amounts::check_file(path, override_cost) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            exit(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                exit(EXIT_ERROR);
            }
        }
    } else {
        println!("Ticket cost: {}", report.ticket_cost);
        println!();
        println!("Total mail entries: {}", report.total_entries);
        println!(
            "Valid amounts (divisible by {}): {} ({:.1}%)",
            report.ticket_cost,
            report.valid_count,
            report.valid_percent()
        );
        println!(
            "Invalid amounts: {} ({:.1}%)",
            report.invalid_count,
            report.invalid_percent()
        );
        if !report.invalid_sample.is_empty() {
            println!();
            println!("Sample invalid amounts:");
            for sample in &report.invalid_sample {
                println!(
                    "  {} (remainder: {}, from {})",
                    sample.amount, sample.remainder, sample.account
                );
            }
        }
        if report.is_anomalous() {
            println!();
            println!(
                "Distribution anomaly: valid share {:.1}% is outside {:.0}% ± {:.0}%",
                report.valid_percent(),
                amounts::EXPECTED_VALID_RATE * 100.0,
                amounts::VALID_RATE_TOLERANCE * 100.0
            );
        }
    }

    if report.is_anomalous() {
        exit(EXIT_FINDINGS);
    }
}
