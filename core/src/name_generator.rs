//! Unique username generation from curated word lists.
//!
//! Usernames follow the ESO account-name shape: `@BoldArcher`,
//! `@LunarWeaver42`. All generation is deterministic (same RNG stream =
//! same names) and a per-run pool guarantees no duplicate within one
//! generated file. Account names and roster member names share the pool.

use crate::rng::StreamRng;
use std::collections::HashSet;

/// Deterministic username generator with a per-run uniqueness pool.
#[derive(Default)]
pub struct NameGenerator {
    used: HashSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct names handed out so far.
    pub fn issued(&self) -> usize {
        self.used.len()
    }

    /// Generate a username unique within this run.
    ///
    /// The first attempt is a plain `@AdjectiveNoun`. On collision a random
    /// 1-3 digit suffix is appended, redrawn until the name is unused.
    pub fn next_name(&mut self, rng: &mut StreamRng) -> String {
        let adjectives = Self::adjectives();
        let nouns = Self::nouns();
        let adjective = adjectives[rng.next_u64_below(adjectives.len() as u64) as usize];
        let noun = nouns[rng.next_u64_below(nouns.len() as u64) as usize];

        let mut candidate = format!("@{adjective}{noun}");
        while self.used.contains(&candidate) {
            let suffix = 1 + rng.next_u64_below(999);
            candidate = format!("@{adjective}{noun}{suffix}");
        }
        self.used.insert(candidate.clone());
        candidate
    }

    /// Curated list of 50 adjectives.
    fn adjectives() -> &'static [&'static str] {
        &[
            "Active", "Ancient", "Bold", "Brave", "Calm", "Clever", "Cool", "Curious",
            "Daring", "Eager", "Epic", "Fast", "Gentle", "Happy", "Keen", "Lucky",
            "Mighty", "Noble", "Proud", "Quick", "Royal", "Silent", "Swift", "Wise",
            "Young", "Zealous", "Bright", "Cosmic", "Divine", "Fierce", "Golden",
            "Humble", "Iron", "Jovial", "Kind", "Lunar", "Magic", "Nimble", "Ocean",
            "Plasma", "Quantum", "Radiant", "Stellar", "Thunder", "Ultra", "Vibrant",
            "Wild", "Xenial", "Yellow", "Zesty",
        ]
    }

    /// Curated list of 50 nouns.
    fn nouns() -> &'static [&'static str] {
        &[
            "Archer", "Baker", "Crafter", "Dancer", "Explorer", "Fighter", "Guardian",
            "Hunter", "Knight", "Mage", "Navigator", "Oracle", "Paladin", "Ranger",
            "Scholar", "Trader", "Warrior", "Wizard", "Alchemist", "Bard", "Cleric",
            "Druid", "Engineer", "Forger", "Gladiator", "Herbalist", "Inventor",
            "Jeweler", "Keeper", "Librarian", "Merchant", "Nomad", "Observer",
            "Protector", "Questor", "Runner", "Seeker", "Templar", "Voyager", "Weaver",
            "Crystal", "Phoenix", "Dragon", "Storm", "Shadow", "Flame", "Frost",
            "Thunder", "Lightning", "Mystic",
        ]
    }
}
