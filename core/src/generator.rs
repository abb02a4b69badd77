//! Account generation and file output.
//!
//! All draws flow through per-concern RNG streams from the run's master
//! seed; the same config always produces byte-identical output.

use crate::config::GenConfig;
use crate::error::RaffleResult;
use crate::model::{
    Account, MailBlock, MailEntry, Rank, RosterBlock, RosterEntry, SavedVariables, DATA_VERSION,
};
use crate::name_generator::NameGenerator;
use crate::rng::{RngBank, StreamRng, StreamSlot};
use crate::savedvars;
use crate::types::{Gold, UnixSeconds};
use std::path::{Path, PathBuf};

/// 30-day sales ceiling per roster entry.
pub const SALES30_MAX: Gold = 5_000_000;
/// 30-day purchases ceiling per roster entry.
pub const PURCHASES30_MAX: Gold = 100_000;
/// Every generated mail amount lands inside these bounds.
pub const MAIL_AMOUNT_MIN: Gold = 5_000;
pub const MAIL_AMOUNT_MAX: Gold = 1_000_000;
/// Fraction of mail amounts that are exact ticket multiples.
pub const VALID_MAIL_RATE: f64 = 0.90;
/// Roster entries per roster-bearing account.
pub const ROSTER_ENTRIES_MIN: i64 = 5;
pub const ROSTER_ENTRIES_MAX: i64 = 50;
/// Mail entries per mail-bearing account.
pub const MAIL_ENTRIES_MIN: i64 = 10;
pub const MAIL_ENTRIES_MAX: i64 = 30;
/// Jitter applied to block activity timestamps (±7 days).
pub const ACTIVITY_JITTER_SECS: i64 = 7 * 86_400;
/// Jitter applied to per-account dates such as roster join dates (±30 days).
pub const ACCOUNT_JITTER_SECS: i64 = 30 * 86_400;

const MAIL_SUBJECT_RATE: f64 = 0.9;
const MAIL_BODY_RATE: f64 = 0.3;

const MAIL_SUBJECTS: &[&str] = &[
    "tix",
    "tickets",
    "raffle",
    "raffle tickets",
    "weekly raffle",
    "raffle entry",
    "BBC raffle",
    "guild raffle",
    "raffle tix",
    "tickets please",
    "raffle please",
    "",
    "Gold",
    "entry fee",
];

const MAIL_BODIES: &[&str] = &[
    "Hello, <<1>>!\r\n\r\nConfirming your purchase for the Guild Raffle!\r\n\r\nNumber of \
     Tickets Purchased:|cFFD000    <<2>>|r\r\n\r\nAdditional tickets can be purchased until \
     Tuesday Night.\r\n\r\nDrawings are held weekly.",
    "Welcome to the raffle, <<1>>!\r\n\r\nTickets purchased: <<2>>\r\n\r\nGood luck in this \
     week's drawing!",
    "Raffle confirmation for <<1>>\r\n\r\nTickets: <<2>>\r\n\r\nThank you for participating!",
];

pub struct Generator {
    config: GenConfig,
    names: NameGenerator,
    name_rng: StreamRng,
    roster_rng: StreamRng,
    mail_rng: StreamRng,
    time_rng: StreamRng,
}

impl Generator {
    pub fn new(config: GenConfig) -> Self {
        let bank = RngBank::new(config.seed);
        Self {
            names: NameGenerator::new(),
            name_rng: bank.for_stream(StreamSlot::Username),
            roster_rng: bank.for_stream(StreamSlot::Roster),
            mail_rng: bank.for_stream(StreamSlot::Mail),
            time_rng: bank.for_stream(StreamSlot::Timestamp),
            config,
        }
    }

    /// Generate the full account set. Pure in-memory; no files touched.
    pub fn generate(&mut self) -> RaffleResult<SavedVariables> {
        self.config.validate()?;

        let mut accounts = Vec::with_capacity(self.config.total_accounts());
        for _ in 0..self.config.blank_count {
            accounts.push(self.blank_account());
        }
        for _ in 0..self.config.roster_count {
            accounts.push(self.roster_account());
        }
        for _ in 0..self.config.mail_count {
            accounts.push(self.mail_account());
        }
        for _ in 0..self.config.mixed_count {
            accounts.push(self.mixed_account());
        }

        log::info!(
            "generated {} accounts ({} blank, {} roster, {} mail, {} mixed), seed {}",
            accounts.len(),
            self.config.blank_count,
            self.config.roster_count,
            self.config.mail_count,
            self.config.mixed_count,
            self.config.seed
        );
        Ok(SavedVariables { accounts })
    }

    fn base_account(&mut self) -> Account {
        Account {
            name: self.names.next_name(&mut self.name_rng),
            version: DATA_VERSION,
            ticket_cost: self.config.ticket_cost,
            roster: None,
            mail: None,
        }
    }

    fn blank_account(&mut self) -> Account {
        self.base_account()
    }

    fn roster_account(&mut self) -> Account {
        let mut account = self.base_account();
        account.roster = Some(self.roster_block());
        account
    }

    fn mail_account(&mut self) -> Account {
        let mut account = self.base_account();
        account.mail = Some(self.mail_block());
        account
    }

    fn mixed_account(&mut self) -> Account {
        let mut account = self.base_account();
        account.roster = Some(self.roster_block());
        account.mail = Some(self.mail_block());
        account
    }

    fn roster_block(&mut self) -> RosterBlock {
        let count = self
            .roster_rng
            .next_i64_inclusive(ROSTER_ENTRIES_MIN, ROSTER_ENTRIES_MAX);
        let entries = (0..count).map(|_| self.roster_entry()).collect();
        RosterBlock {
            entries,
            roster_timestamp: self.jittered_timestamp(ACTIVITY_JITTER_SECS),
        }
    }

    fn roster_entry(&mut self) -> RosterEntry {
        // Long windows first; short windows are drawn inside them so the
        // subset invariant holds by construction, no rejection needed.
        let sales30 = self.roster_rng.next_i64_inclusive(0, SALES30_MAX);
        let sales10 = self.roster_rng.next_i64_inclusive(0, sales30);
        let purchases30 = self.roster_rng.next_i64_inclusive(0, PURCHASES30_MAX);
        let purchases10 = self.roster_rng.next_i64_inclusive(0, purchases30);
        let rank = Rank::ALL[self.roster_rng.next_u64_below(Rank::ALL.len() as u64) as usize];

        RosterEntry {
            account: self.names.next_name(&mut self.name_rng),
            join_date: self.jittered_timestamp(ACCOUNT_JITTER_SECS),
            sales10,
            sales30,
            purchases10,
            purchases30,
            rank,
        }
    }

    fn mail_block(&mut self) -> MailBlock {
        let count = self
            .mail_rng
            .next_i64_inclusive(MAIL_ENTRIES_MIN, MAIL_ENTRIES_MAX);
        MailBlock {
            entries: (0..count).map(|_| self.mail_entry()).collect(),
            timestamp: self.jittered_timestamp(ACTIVITY_JITTER_SECS),
        }
    }

    fn mail_entry(&mut self) -> MailEntry {
        let amount = if self.mail_rng.chance(VALID_MAIL_RATE) {
            self.valid_amount()
        } else {
            self.invalid_amount()
        };
        let subject = self
            .mail_rng
            .chance(MAIL_SUBJECT_RATE)
            .then(|| MAIL_SUBJECTS[self.mail_rng.next_u64_below(MAIL_SUBJECTS.len() as u64) as usize].to_string());
        let body = self
            .mail_rng
            .chance(MAIL_BODY_RATE)
            .then(|| MAIL_BODIES[self.mail_rng.next_u64_below(MAIL_BODIES.len() as u64) as usize].to_string());

        MailEntry {
            amount,
            subject,
            body,
        }
    }

    /// A random exact multiple of the ticket cost inside the amount bounds.
    fn valid_amount(&mut self) -> Gold {
        let cost = self.config.ticket_cost;
        let min_mult = (MAIL_AMOUNT_MIN + cost - 1) / cost;
        let max_mult = MAIL_AMOUNT_MAX / cost;
        self.mail_rng.next_i64_inclusive(min_mult, max_mult) * cost
    }

    /// A random amount in bounds that provably is NOT a ticket multiple.
    /// A draw that lands on remainder 0 is discarded and redrawn.
    fn invalid_amount(&mut self) -> Gold {
        let cost = self.config.ticket_cost;
        loop {
            let amount = self
                .mail_rng
                .next_i64_inclusive(MAIL_AMOUNT_MIN, MAIL_AMOUNT_MAX);
            if amount % cost != 0 {
                return amount;
            }
        }
    }

    /// Base timestamp plus a signed uniform offset, clamped to valid
    /// non-negative Unix seconds.
    fn jittered_timestamp(&mut self, window: i64) -> UnixSeconds {
        let offset = self.time_rng.next_i64_inclusive(-window, window);
        (self.config.base_timestamp + offset).max(0)
    }
}

// ── File output ────────────────────────────────────────────────────

/// Pick a path that never clobbers an existing file: `name.lua`,
/// `name_1.lua`, `name_2.lua`, ... the smallest unused suffix wins.
pub fn unique_output_path(target: &Path) -> PathBuf {
    if !target.exists() {
        return target.to_path_buf();
    }
    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("generated");
    let extension = target.extension().and_then(|s| s.to_str());

    let mut counter = 1u32;
    loop {
        let candidate_name = match extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = target.with_file_name(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Render a generated set and write it to disk, resolving filename
/// conflicts first. Returns the path actually written.
pub fn write_file(data: &SavedVariables, target: &Path) -> RaffleResult<PathBuf> {
    let text = savedvars::encode(data);
    let path = unique_output_path(target);
    if path != target {
        log::info!(
            "{} already exists, writing {} instead",
            target.display(),
            path.display()
        );
    }
    std::fs::write(&path, text)?;
    Ok(path)
}
