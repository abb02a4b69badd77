//! Shared primitive types used across the generator and validators.

/// A point in time as Unix seconds.
pub type UnixSeconds = i64;

/// Gold values: mail amounts and sales/purchase totals.
pub type Gold = i64;
