//! Row extraction for schedule rendering.
//!
//! The core exposes the finalized week as plain ordered rows so an
//! external formatter (the bundled CLI table, or anything consuming the
//! serialized form) never touches the domain types.

use serde::Serialize;

pub use crate::models::time::clock;
use crate::models::{DriverId, VehicleId, Weekday, WeeklySchedule};

/// One rendered route: ids are `None` while the route is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// Driver id, if assigned.
    pub driver: Option<DriverId>,
    /// Trip start (s).
    pub start_s: i64,
    /// Trip end (s).
    pub end_s: i64,
    /// Vehicle id, if assigned.
    pub vehicle: Option<VehicleId>,
}

/// Rows for one day, in route order.
pub fn day_rows(schedule: &WeeklySchedule, day: Weekday) -> Vec<ScheduleRow> {
    schedule
        .day(day)
        .iter()
        .map(|r| ScheduleRow {
            driver: r.crew.map(|c| c.driver),
            start_s: r.start_s(),
            end_s: r.end_s(),
            vehicle: r.crew.map(|c| c.vehicle),
        })
        .collect()
}

/// Rows for the whole week, days in calendar order.
pub fn week_rows(schedule: &WeeklySchedule) -> Vec<(Weekday, Vec<ScheduleRow>)> {
    Weekday::ALL
        .iter()
        .map(|&day| (day, day_rows(schedule, day)))
        .collect()
}
