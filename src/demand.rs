//! Demand-driven route generation.
//!
//! # Algorithm
//!
//! Each day is swept in discrete time steps from the first departure to
//! the end of the operating day. At every step, routes whose end time
//! has passed are evicted from the active set, and a new fixed-duration
//! route is opened only if the number of still-active routes is below
//! the capacity target in force (peak target inside peak windows on
//! non-weekend days, off-peak target otherwise). The step size is the
//! summed duration bounds divided by twice the current target, so the
//! sweep is finer exactly when the target is higher.
//!
//! The result is a self-regulating density of concurrent routes that is
//! bounded above by the target but does not track it exactly at every
//! instant: eviction happens before the target check, and a route is
//! never opened when its end would cross the day boundary.

use log::debug;

use crate::config::PlanConfig;
use crate::error::ConfigurationError;
use crate::models::{Route, TimeWindow, Weekday, WeeklySchedule};

/// Generates the week's route timeline from the demand curve.
#[derive(Debug, Clone)]
pub struct RouteGenerator {
    day_start_s: i64,
    day_end_s: i64,
    route_duration_s: i64,
    peak_windows: Vec<TimeWindow>,
    off_peak_target: usize,
    peak_target: usize,
    off_peak_step_s: i64,
    peak_step_s: i64,
}

impl RouteGenerator {
    /// Builds a generator, rejecting configurations whose capacity
    /// targets or sweep steps are degenerate.
    pub fn new(config: &PlanConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let off_peak_target = config.off_peak_bus_count();
        let peak_target = config.peak_bus_count();
        let duration_sum = config.route_duration_min_s + config.route_duration_max_s;
        let off_peak_step_s = duration_sum / (2 * off_peak_target as i64);
        let peak_step_s = duration_sum / (2 * peak_target as i64);

        let min_step = off_peak_step_s.min(peak_step_s);
        if min_step <= 0 {
            return Err(ConfigurationError::DegenerateSweepStep { step_s: min_step });
        }

        Ok(Self {
            day_start_s: config.day_start_s,
            day_end_s: config.day_end_s,
            route_duration_s: config.route_duration_s(),
            peak_windows: config.peak_windows.clone(),
            off_peak_target,
            peak_target,
            off_peak_step_s,
            peak_step_s,
        })
    }

    /// Capacity target in force on `day` at `time_s`.
    pub fn capacity_target_at(&self, day: Weekday, time_s: i64) -> usize {
        self.phase_at(day, time_s).0
    }

    /// (target, sweep step) in force on `day` at `time_s`.
    fn phase_at(&self, day: Weekday, time_s: i64) -> (usize, i64) {
        if !day.is_weekend() && self.peak_windows.iter().any(|w| w.contains(time_s)) {
            (self.peak_target, self.peak_step_s)
        } else {
            (self.off_peak_target, self.off_peak_step_s)
        }
    }

    /// Generates the full week of routes.
    pub fn generate(&self) -> WeeklySchedule {
        let mut week = WeeklySchedule::new();
        for day in Weekday::ALL {
            let routes = self.generate_day(day);
            debug!("{}: generated {} routes", day.name(), routes.len());
            *week.day_mut(day) = routes;
        }
        week
    }

    fn generate_day(&self, day: Weekday) -> Vec<Route> {
        let mut routes = Vec::new();
        // End times of routes still running at the sweep cursor.
        let mut active: Vec<i64> = Vec::new();

        let mut now = self.day_start_s;
        while now < self.day_end_s {
            active.retain(|&end_s| end_s > now);

            let (target, step) = self.phase_at(day, now);

            if active.len() < target {
                let end_s = now + self.route_duration_s;
                if end_s <= self.day_end_s {
                    active.push(end_s);
                    routes.push(Route::new(now, end_s));
                }
            }

            now += step;
        }

        routes
    }
}
