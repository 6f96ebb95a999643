//! Error types.

use thiserror::Error;

/// Rejection of an unusable plan configuration.
///
/// Raised before any scheduling work begins; every later infeasibility
/// (no free vehicle, no viable chain) degrades to partial coverage
/// instead of erroring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("fleet size must be positive, got {0}")]
    NonPositiveFleet(i64),

    #[error("{phase} capacity target is zero for a fleet of {fleet} (load too small)")]
    ZeroCapacityTarget {
        /// "peak" or "off-peak".
        phase: &'static str,
        /// Configured fleet size.
        fleet: usize,
    },

    #[error("route duration bounds are inverted or non-positive: min {min_s}s, max {max_s}s")]
    InvalidRouteDuration { min_s: i64, max_s: i64 },

    #[error("demand sweep step is not positive ({step_s}s); fleet too large for the route duration")]
    DegenerateSweepStep { step_s: i64 },

    #[error("operating day is empty: starts at {start_s}s, ends at {end_s}s")]
    EmptyOperatingDay { start_s: i64, end_s: i64 },
}
