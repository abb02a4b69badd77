//! Roster day-window consistency checking.
//!
//! The short-window totals on a roster entry can never exceed the
//! long-window totals. The generator guarantees this by construction;
//! this check re-verifies any file after the fact.

use crate::error::RaffleResult;
use crate::model::SavedVariables;
use crate::savedvars;
use crate::types::Gold;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyViolation {
    /// Username of the account whose roster holds the entry.
    pub account: String,
    /// Member name on the offending roster entry.
    pub member: String,
    /// Which pair broke: "sales" or "purchases".
    pub field: &'static str,
    pub short_total: Gold,
    pub long_total: Gold,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub entries_checked: usize,
    pub violations: Vec<ConsistencyViolation>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every roster entry across every account.
pub fn check(data: &SavedVariables) -> ConsistencyReport {
    let mut entries_checked = 0usize;
    let mut violations = Vec::new();

    for (account, entry) in data.roster_entries() {
        entries_checked += 1;
        if entry.sales10 > entry.sales30 {
            violations.push(ConsistencyViolation {
                account: account.name.clone(),
                member: entry.account.clone(),
                field: "sales",
                short_total: entry.sales10,
                long_total: entry.sales30,
            });
        }
        if entry.purchases10 > entry.purchases30 {
            violations.push(ConsistencyViolation {
                account: account.name.clone(),
                member: entry.account.clone(),
                field: "purchases",
                short_total: entry.purchases10,
                long_total: entry.purchases30,
            });
        }
    }

    if violations.is_empty() {
        log::debug!("{entries_checked} roster entries checked, all consistent");
    } else {
        log::warn!(
            "{entries_checked} roster entries checked, {} violations",
            violations.len()
        );
    }
    ConsistencyReport {
        entries_checked,
        violations,
    }
}

/// Parse a saved-variables file and check it.
pub fn check_file(path: &Path) -> RaffleResult<ConsistencyReport> {
    let content = std::fs::read_to_string(path)?;
    let data = savedvars::decode(&content)?;
    Ok(check(&data))
}
