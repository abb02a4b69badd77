//! Generation configuration and CLI-facing value parsing.

use crate::error::{RaffleError, RaffleResult};
use crate::types::{Gold, UnixSeconds};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TICKET_COST: Gold = 1000;
pub const DEFAULT_TIMESTAMP_DATE: &str = "07/20/2025";
pub const DEFAULT_TIMESTAMP_TIME: &str = "00:00:00";

/// Ticket costs outside this range cannot satisfy the mail amount rules:
/// a cost of 1 leaves no nonzero remainder for invalid amounts, and a cost
/// above the amount ceiling leaves no valid multiple inside the bounds.
pub const TICKET_COST_MIN: Gold = 2;
pub const TICKET_COST_MAX: Gold = 1_000_000;

/// Everything one generation run needs, bundled explicitly.
/// No global state; the generator takes this by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    pub blank_count: usize,
    pub roster_count: usize,
    pub mail_count: usize,
    pub mixed_count: usize,
    pub ticket_cost: Gold,
    pub base_timestamp: UnixSeconds,
    pub seed: u64,
}

impl GenConfig {
    pub fn total_accounts(&self) -> usize {
        self.blank_count + self.roster_count + self.mail_count + self.mixed_count
    }

    pub fn validate(&self) -> RaffleResult<()> {
        if self.total_accounts() == 0 {
            return Err(RaffleError::InvalidArgument(
                "at least one account must be requested".into(),
            ));
        }
        if !(TICKET_COST_MIN..=TICKET_COST_MAX).contains(&self.ticket_cost) {
            return Err(RaffleError::InvalidArgument(format!(
                "ticket cost must be between {TICKET_COST_MIN} and {TICKET_COST_MAX}, got {}",
                self.ticket_cost
            )));
        }
        if self.base_timestamp < 0 {
            return Err(RaffleError::InvalidArgument(format!(
                "base timestamp must not predate the Unix epoch, got {}",
                self.base_timestamp
            )));
        }
        Ok(())
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            blank_count: 1,
            roster_count: 1,
            mail_count: 1,
            mixed_count: 1,
            ticket_cost: DEFAULT_TICKET_COST,
            base_timestamp: 1_752_969_600, // 07/20/2025 00:00:00 UTC
            seed: 42,
        }
    }
}

/// Parse `MM/DD/YYYY` and `HH:MM:SS` into Unix seconds (UTC).
pub fn parse_base_timestamp(date: &str, time: &str) -> RaffleResult<UnixSeconds> {
    let date = NaiveDate::parse_from_str(date, "%m/%d/%Y").map_err(|e| {
        RaffleError::InvalidArgument(format!("bad timestamp date {date:?} (want MM/DD/YYYY): {e}"))
    })?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|e| {
        RaffleError::InvalidArgument(format!("bad timestamp time {time:?} (want HH:MM:SS): {e}"))
    })?;
    Ok(date.and_time(time).and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_timestamp_matches_documented_date() {
        let parsed =
            parse_base_timestamp(DEFAULT_TIMESTAMP_DATE, DEFAULT_TIMESTAMP_TIME).unwrap();
        assert_eq!(parsed, GenConfig::default_test().base_timestamp);
    }

    #[test]
    fn timestamp_parsing_accepts_time_of_day() {
        let midnight = parse_base_timestamp("01/02/2024", "00:00:00").unwrap();
        let later = parse_base_timestamp("01/02/2024", "13:30:05").unwrap();
        assert_eq!(later - midnight, 13 * 3600 + 30 * 60 + 5);
    }

    #[test]
    fn malformed_date_and_time_are_invalid_arguments() {
        for (date, time) in [
            ("2025-07-20", "00:00:00"),
            ("13/40/2025", "00:00:00"),
            ("07/20/2025", "25:00:00"),
            ("07/20/2025", "noonish"),
        ] {
            let err = parse_base_timestamp(date, time).unwrap_err();
            assert!(
                matches!(err, RaffleError::InvalidArgument(_)),
                "{date} {time}: wrong error kind: {err}"
            );
        }
    }

    #[test]
    fn zero_accounts_rejected() {
        let config = GenConfig {
            blank_count: 0,
            roster_count: 0,
            mail_count: 0,
            mixed_count: 0,
            ..GenConfig::default_test()
        };
        assert!(matches!(
            config.validate(),
            Err(RaffleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ticket_cost_bounds_enforced() {
        for cost in [0, 1, -5, TICKET_COST_MAX + 1] {
            let config = GenConfig {
                ticket_cost: cost,
                ..GenConfig::default_test()
            };
            assert!(
                matches!(config.validate(), Err(RaffleError::InvalidArgument(_))),
                "cost {cost} should be rejected"
            );
        }
        for cost in [TICKET_COST_MIN, 500, 1000, TICKET_COST_MAX] {
            let config = GenConfig {
                ticket_cost: cost,
                ..GenConfig::default_test()
            };
            assert!(config.validate().is_ok(), "cost {cost} should be accepted");
        }
    }
}
