//! Greedy crew assignment and roster metrics.
//!
//! `ShiftAssigner` is the constraint-aware scheduling core: it walks the
//! week's routes in order, binds vehicles and drivers under shift-length,
//! break, and day-off rules, and degrades gracefully when the fleet or
//! the driver script runs out. `CoverageStats` summarizes the outcome.

mod assigner;
mod stats;

pub use assigner::{Roster, ShiftAssigner, ShiftPolicy};
pub use stats::CoverageStats;
