//! raffle-core: test-data generation and validation for the RaffleManager
//! addon's saved-variables files.
//!
//! The generator produces synthetic account sets across four archetypes and
//! writes them in the addon's nested-table text format; the validators parse
//! such files back and re-check the numeric rules the generator promises.

pub mod amounts;
pub mod config;
pub mod consistency;
pub mod error;
pub mod generator;
pub mod lua_text;
pub mod model;
pub mod name_generator;
pub mod rng;
pub mod savedvars;
pub mod types;
