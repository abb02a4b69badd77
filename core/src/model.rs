//! In-memory model of one generated saved-variables file.
//!
//! Entities are created once by the generator and never mutated; the
//! validators rebuild the same structures by parsing a file back in.

use crate::types::{Gold, UnixSeconds};
use serde::{Deserialize, Serialize};

/// Top-level variable name the addon reads back.
pub const ROOT_VARIABLE: &str = "RaffleManager_SavedVariables";
/// Profile scope table under the root variable.
pub const DEFAULT_SCOPE: &str = "Default";
/// Per-account settings table literal.
pub const ACCOUNT_WIDE: &str = "$AccountWide";
/// Saved-variables schema version the addon expects.
pub const DATA_VERSION: i64 = 1;

/// The four account shapes the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Blank,
    Roster,
    Mail,
    Mixed,
}

/// Guild rank ladder, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Recruit,
    Member,
    Veteran,
    Officer,
    GuildMaster,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Rank::Recruit,
        Rank::Member,
        Rank::Veteran,
        Rank::Officer,
        Rank::GuildMaster,
    ];

    /// Label exactly as written into the saved-variables file.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recruit => "Recruit",
            Self::Member => "Member",
            Self::Veteran => "Veteran",
            Self::Officer => "Officer",
            Self::GuildMaster => "Guild Master",
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        Self::ALL.into_iter().find(|rank| rank.label() == label)
    }
}

/// One guild-member record with day-windowed sales/purchase totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub account: String,
    pub join_date: UnixSeconds,
    pub sales10: Gold,
    pub sales30: Gold,
    pub purchases10: Gold,
    pub purchases30: Gold,
    pub rank: Rank,
}

/// One raffle-ticket-purchase mail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailEntry {
    pub amount: Gold,
    pub subject: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterBlock {
    pub entries: Vec<RosterEntry>,
    pub roster_timestamp: UnixSeconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailBlock {
    pub entries: Vec<MailEntry>,
    pub timestamp: UnixSeconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub version: i64,
    pub ticket_cost: Gold,
    pub roster: Option<RosterBlock>,
    pub mail: Option<MailBlock>,
}

impl Account {
    pub fn archetype(&self) -> Archetype {
        match (&self.roster, &self.mail) {
            (None, None) => Archetype::Blank,
            (Some(_), None) => Archetype::Roster,
            (None, Some(_)) => Archetype::Mail,
            (Some(_), Some(_)) => Archetype::Mixed,
        }
    }
}

/// One whole generated file, accounts in generation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedVariables {
    pub accounts: Vec<Account>,
}

impl SavedVariables {
    /// Every roster entry in file order, paired with its owning account.
    pub fn roster_entries(&self) -> impl Iterator<Item = (&Account, &RosterEntry)> {
        self.accounts.iter().flat_map(|account| {
            account
                .roster
                .iter()
                .flat_map(move |block| block.entries.iter().map(move |entry| (account, entry)))
        })
    }

    /// Every mail entry in file order, paired with its owning account.
    pub fn mail_entries(&self) -> impl Iterator<Item = (&Account, &MailEntry)> {
        self.accounts.iter().flat_map(|account| {
            account
                .mail
                .iter()
                .flat_map(move |block| block.entries.iter().map(move |entry| (account, entry)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_labels_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_label(rank.label()), Some(rank));
        }
        assert_eq!(Rank::from_label("Grand Poobah"), None);
    }

    #[test]
    fn archetype_follows_block_presence() {
        let blank = Account {
            name: "@Blank".into(),
            version: DATA_VERSION,
            ticket_cost: 1000,
            roster: None,
            mail: None,
        };
        assert_eq!(blank.archetype(), Archetype::Blank);

        let mixed = Account {
            roster: Some(RosterBlock {
                entries: vec![],
                roster_timestamp: 0,
            }),
            mail: Some(MailBlock {
                entries: vec![],
                timestamp: 0,
            }),
            ..blank.clone()
        };
        assert_eq!(mixed.archetype(), Archetype::Mixed);
    }
}
