//! raffle-validate: check roster day-window consistency of a saved file.
//!
//! Usage:
//!   raffle-validate RaffleManager_Generated.lua
//!   raffle-validate RaffleManager_Generated.lua --json

use raffle_core::consistency;
use raffle_tools::{fail_usage, flag_present, positionals, EXIT_ERROR, EXIT_FINDINGS};
use std::env;
use std::path::Path;
use std::process::exit;

/// How many violations the console listing shows before truncating.
const LISTING_LIMIT: usize = 10;

const USAGE: &str = "\
Usage: raffle-validate <file.lua> [--json]

Checks that every roster entry's 10-day totals never exceed its 30-day
totals. Exits 0 when all entries are consistent, 1 when violations are
found, 2 when the file cannot be read or parsed.";

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let json = flag_present(&args, "--json");

    let files = positionals(&args, &[]);
    let [file] = files.as_slice() else {
        fail_usage(USAGE, format!("expected exactly one file, got {}", files.len()));
    };
    let path = Path::new(file);

    let report = match consistency::check_file(path) {
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
        println!("Validated {} roster entries", report.entries_checked);
        if report.is_consistent() {
            println!("All entries are logically consistent");
        } else {
            println!(
                "Found {} logical inconsistencies:",
                report.violations.len()
            );
            for violation in report.violations.iter().take(LISTING_LIMIT) {
                println!(
                    "  - {} / {}: {}10 ({}) > {}30 ({})",
                    violation.account,
                    violation.member,
                    violation.field,
                    violation.short_total,
                    violation.field,
                    violation.long_total
                );
            }
            if report.violations.len() > LISTING_LIMIT {
                println!(
                    "  ... and {} more",
                    report.violations.len() - LISTING_LIMIT
                );
            }
        }
    }

    if !report.is_consistent() {
        exit(EXIT_FINDINGS);
    }
}
