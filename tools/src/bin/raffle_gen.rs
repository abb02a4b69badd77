//! raffle-gen: generate synthetic RaffleManager saved-variables files.
//!
//! Usage:
//!   raffle-gen 5 10 15 20
//!   raffle-gen 100 0 0 0 --filename large_blank.lua
//!   raffle-gen 0 0 50 0 -o out --ticket-cost 500 --seed 7

use anyhow::Result;
use raffle_core::config::{
    self, GenConfig, DEFAULT_TICKET_COST, DEFAULT_TIMESTAMP_DATE, DEFAULT_TIMESTAMP_TIME,
};
use raffle_core::generator::{self, Generator};
use raffle_tools::{fail_usage, opt_value, positionals};
use std::env;
use std::path::Path;

const DEFAULT_FILENAME: &str = "RaffleManager_Generated.lua";

const USAGE: &str = "\
Usage: raffle-gen <blank_count> <roster_count> <mail_count> <mixed_count> [options]

Options:
  -f, --filename <name>       output filename (default: RaffleManager_Generated.lua)
  -o, --output-folder <dir>   folder the file is written into (default: .)
  -t, --ticket-cost <gold>    gold per raffle ticket (default: 1000)
      --timestamp-date <d>    base date, MM/DD/YYYY (default: 07/20/2025)
      --timestamp-time <t>    base time, HH:MM:SS (default: 00:00:00)
      --seed <n>              RNG seed (default: wall clock)

Counts are non-negative; at least one account must be requested.
An existing output file is never overwritten; a _N suffix is added instead.";

const VALUE_FLAGS: &[&str] = &[
    "--filename",
    "-f",
    "--output-folder",
    "-o",
    "--ticket-cost",
    "-t",
    "--timestamp-date",
    "--timestamp-time",
    "--seed",
];

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();

    let counts = positionals(&args, VALUE_FLAGS);
    if counts.len() != 4 {
        fail_usage(
            USAGE,
            format!("expected 4 account counts, got {}", counts.len()),
        );
    }
    let mut parsed_counts = [0usize; 4];
    for (slot, raw) in parsed_counts.iter_mut().zip(&counts) {
        *slot = match raw.parse() {
            Ok(n) => n,
            Err(_) => fail_usage(
                USAGE,
                format!("account counts must be non-negative integers, got {raw:?}"),
            ),
        };
    }
    let [blank_count, roster_count, mail_count, mixed_count] = parsed_counts;

    let ticket_cost = match opt_value(&args, &["--ticket-cost", "-t"]) {
        Some(raw) => match raw.parse() {
            Ok(cost) => cost,
            Err(_) => fail_usage(USAGE, format!("ticket cost must be an integer, got {raw:?}")),
        },
        None => DEFAULT_TICKET_COST,
    };

    let date = opt_value(&args, &["--timestamp-date"]).unwrap_or(DEFAULT_TIMESTAMP_DATE);
    let time = opt_value(&args, &["--timestamp-time"]).unwrap_or(DEFAULT_TIMESTAMP_TIME);
    let base_timestamp = match config::parse_base_timestamp(date, time) {
        Ok(ts) => ts,
        Err(e) => fail_usage(USAGE, e.to_string()),
    };

    let seed = match opt_value(&args, &["--seed"]) {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(_) => fail_usage(USAGE, format!("seed must be a u64, got {raw:?}")),
        },
        None => wall_clock_seed(),
    };

    let filename = opt_value(&args, &["--filename", "-f"]).unwrap_or(DEFAULT_FILENAME);
    let folder = opt_value(&args, &["--output-folder", "-o"]).unwrap_or(".");
    let target = Path::new(folder).join(filename);

    let config = GenConfig {
        blank_count,
        roster_count,
        mail_count,
        mixed_count,
        ticket_cost,
        base_timestamp,
        seed,
    };
    if let Err(e) = config.validate() {
        fail_usage(USAGE, e.to_string());
    }
    log::debug!("generating with {config:?} into {}", target.display());

    let data = Generator::new(config.clone()).generate()?;
    let path = generator::write_file(&data, &target)?;

    println!(
        "Generated {} with {} accounts:",
        path.display(),
        data.accounts.len()
    );
    println!("  - {} blank accounts", config.blank_count);
    println!("  - {} roster accounts", config.roster_count);
    println!("  - {} mail accounts", config.mail_count);
    println!("  - {} mixed accounts", config.mixed_count);
    println!("  seed: {}", config.seed);
    Ok(())
}

fn wall_clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
