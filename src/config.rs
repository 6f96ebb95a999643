//! Plan configuration.
//!
//! One `PlanConfig` describes everything a weekly planning run needs:
//! fleet size, route duration bounds, the peak/off-peak demand curve,
//! the operating-day window, and the assignment tie-break policy.
//! `validate()` rejects configurations the generator cannot serve
//! before any scheduling work starts.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::time::{hours, minutes};
use crate::models::{ShiftKind, TimeWindow};

/// Configuration for one weekly planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Total vehicles in the fleet.
    pub total_buses: usize,
    /// Shortest admissible route duration (s).
    pub route_duration_min_s: i64,
    /// Longest admissible route duration (s).
    pub route_duration_max_s: i64,
    /// Fraction of the fleet targeted outside peak windows.
    pub off_peak_load: f64,
    /// Fraction of the fleet targeted inside peak windows.
    pub peak_load: f64,
    /// Daily peak intervals; suppressed on weekend days.
    pub peak_windows: Vec<TimeWindow>,
    /// First departure time of the operating day (s).
    pub day_start_s: i64,
    /// End of the operating day (s); may lie past 24:00.
    pub day_end_s: i64,
    /// Shift kind committed when both trial chains close the same
    /// number of routes.
    pub tie_break: ShiftKind,
    /// Fitness penalty per hired driver.
    pub driver_penalty: f64,
}

impl PlanConfig {
    /// Creates a configuration for the given fleet size with default
    /// durations, loads, and peak windows.
    pub fn new(total_buses: usize) -> Self {
        Self {
            total_buses,
            route_duration_min_s: minutes(50),
            route_duration_max_s: minutes(70),
            off_peak_load: 0.5,
            peak_load: 1.0,
            peak_windows: vec![
                TimeWindow::new(hours(7), hours(9)),
                TimeWindow::new(hours(17), hours(19)),
            ],
            day_start_s: hours(6),
            day_end_s: hours(27), // 03:00 the next morning
            tie_break: ShiftKind::B,
            driver_penalty: 0.1,
        }
    }

    /// Sets the route duration bounds.
    pub fn with_route_duration(mut self, min_s: i64, max_s: i64) -> Self {
        self.route_duration_min_s = min_s;
        self.route_duration_max_s = max_s;
        self
    }

    /// Sets the off-peak and peak load fractions.
    pub fn with_loads(mut self, off_peak: f64, peak: f64) -> Self {
        self.off_peak_load = off_peak;
        self.peak_load = peak;
        self
    }

    /// Sets the tie-break shift kind.
    pub fn with_tie_break(mut self, kind: ShiftKind) -> Self {
        self.tie_break = kind;
        self
    }

    /// Sets the per-driver fitness penalty.
    pub fn with_driver_penalty(mut self, penalty: f64) -> Self {
        self.driver_penalty = penalty;
        self
    }

    /// Fixed duration of every generated route: the midpoint of the
    /// configured bounds.
    #[inline]
    pub fn route_duration_s(&self) -> i64 {
        (self.route_duration_min_s + self.route_duration_max_s) / 2
    }

    /// Concurrent-route target inside peak windows (floor).
    #[inline]
    pub fn peak_bus_count(&self) -> usize {
        (self.peak_load * self.total_buses as f64) as usize
    }

    /// Concurrent-route target outside peak windows (floor).
    #[inline]
    pub fn off_peak_bus_count(&self) -> usize {
        (self.off_peak_load * self.total_buses as f64) as usize
    }

    /// Rejects configurations the generator cannot serve.
    ///
    /// A capacity target that floors to zero would make the sweep step
    /// degenerate (division by zero in the source formulation), so it
    /// is a configuration error, not a runtime one.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.total_buses == 0 {
            return Err(ConfigurationError::NonPositiveFleet(0));
        }
        if self.route_duration_min_s <= 0
            || self.route_duration_max_s < self.route_duration_min_s
        {
            return Err(ConfigurationError::InvalidRouteDuration {
                min_s: self.route_duration_min_s,
                max_s: self.route_duration_max_s,
            });
        }
        if self.day_end_s <= self.day_start_s {
            return Err(ConfigurationError::EmptyOperatingDay {
                start_s: self.day_start_s,
                end_s: self.day_end_s,
            });
        }
        if self.off_peak_bus_count() == 0 {
            return Err(ConfigurationError::ZeroCapacityTarget {
                phase: "off-peak",
                fleet: self.total_buses,
            });
        }
        if self.peak_bus_count() == 0 {
            return Err(ConfigurationError::ZeroCapacityTarget {
                phase: "peak",
                fleet: self.total_buses,
            });
        }
        Ok(())
    }
}
