//! Mail amount distribution checking.
//!
//! Counts how many mail amounts divide evenly by the ticket cost. The
//! generator aims for a 90% valid share; the share is a statistical
//! property, so small samples are reported but never flagged.

use crate::error::{RaffleError, RaffleResult};
use crate::model::SavedVariables;
use crate::savedvars;
use crate::types::Gold;
use serde::Serialize;
use std::path::Path;

/// How many invalid amounts the report keeps as a sample.
pub const INVALID_SAMPLE_LIMIT: usize = 5;
/// Expected fraction of ticket-multiple amounts.
pub const EXPECTED_VALID_RATE: f64 = 0.90;
/// Allowed deviation from the expected rate before a run is flagged.
pub const VALID_RATE_TOLERANCE: f64 = 0.05;
/// Below this many entries the rate is never flagged as anomalous.
pub const MIN_SAMPLE_FOR_ANOMALY: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct InvalidAmount {
    pub account: String,
    pub amount: Gold,
    pub remainder: Gold,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountReport {
    /// Cost used for the census: the override, or the first account's.
    pub ticket_cost: Gold,
    pub total_entries: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// First few invalid amounts, capped at INVALID_SAMPLE_LIMIT.
    pub invalid_sample: Vec<InvalidAmount>,
}

impl AmountReport {
    pub fn valid_fraction(&self) -> f64 {
        if self.total_entries == 0 {
            return 1.0;
        }
        self.valid_count as f64 / self.total_entries as f64
    }

    pub fn valid_percent(&self) -> f64 {
        self.valid_fraction() * 100.0
    }

    pub fn invalid_percent(&self) -> f64 {
        100.0 - self.valid_percent()
    }

    /// True when the valid share strays outside the documented tolerance
    /// and the sample is large enough for the rate to be meaningful.
    pub fn is_anomalous(&self) -> bool {
        self.total_entries >= MIN_SAMPLE_FOR_ANOMALY
            && (self.valid_fraction() - EXPECTED_VALID_RATE).abs() > VALID_RATE_TOLERANCE
    }
}

/// Census over every mail amount in the file. With no override, the
/// ticket cost is read from the first account.
pub fn check(data: &SavedVariables, ticket_cost: Option<Gold>) -> RaffleResult<AmountReport> {
    let cost = match ticket_cost {
        Some(cost) if cost > 0 => cost,
        Some(cost) => {
            return Err(RaffleError::InvalidArgument(format!(
                "ticket cost must be positive, got {cost}"
            )))
        }
        None => {
            let cost = data
                .accounts
                .first()
                .map(|account| account.ticket_cost)
                .ok_or_else(|| {
                    RaffleError::Decode("file holds no accounts to read a ticket cost from".into())
                })?;
            if cost <= 0 {
                return Err(RaffleError::Decode(format!(
                    "first account's ticket_cost must be positive, got {cost}"
                )));
            }
            cost
        }
    };

    let mut total_entries = 0usize;
    let mut valid_count = 0usize;
    let mut invalid_sample = Vec::new();

    for (account, entry) in data.mail_entries() {
        total_entries += 1;
        let remainder = entry.amount % cost;
        if remainder == 0 {
            valid_count += 1;
        } else if invalid_sample.len() < INVALID_SAMPLE_LIMIT {
            invalid_sample.push(InvalidAmount {
                account: account.name.clone(),
                amount: entry.amount,
                remainder,
            });
        }
    }

    let report = AmountReport {
        ticket_cost: cost,
        total_entries,
        valid_count,
        invalid_count: total_entries - valid_count,
        invalid_sample,
    };
    log::debug!(
        "{} mail entries, {:.1}% valid against cost {}",
        report.total_entries,
        report.valid_percent(),
        cost
    );
    Ok(report)
}

/// Parse a saved-variables file and run the census on it.
pub fn check_file(path: &Path, ticket_cost: Option<Gold>) -> RaffleResult<AmountReport> {
    let content = std::fs::read_to_string(path)?;
    let data = savedvars::decode(&content)?;
    check(&data, ticket_cost)
}
