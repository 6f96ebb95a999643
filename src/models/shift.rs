//! Driver shift contracts.
//!
//! Two labor contracts govern drivers:
//!
//! - **Type A**: 9-hour shift, one contiguous 1-hour break starting 4
//!   hours after shift start, the last two days of the week always off.
//! - **Type B**: 12-hour shift, recurring 15-minute breaks on a 2h15m
//!   cadence, and a 1-work-in-3 day rotation counted from the first
//!   working day.
//!
//! Break windows and rotations are pure functions of the shift start;
//! the assigner never stores them.

use serde::{Deserialize, Serialize};

use super::time::{hours, minutes};
use super::{DriverId, TimeWindow, Weekday};

/// Driver shift contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    /// 9-hour shift, single lunch break, fixed weekend off.
    A,
    /// 12-hour shift, recurring short breaks, 1-in-3 day rotation.
    B,
}

impl ShiftKind {
    /// Absolute shift length: routes must start and end within
    /// `[shift_start, shift_start + length)`.
    #[inline]
    pub fn shift_length_s(self) -> i64 {
        match self {
            ShiftKind::A => hours(9),
            ShiftKind::B => hours(12),
        }
    }

    /// Mandatory break windows for a shift starting at `shift_start_s`.
    ///
    /// Windows starting or ending at/past `day_end_s` are dropped, the
    /// same clipping the route generator applies to trips.
    pub fn break_windows(self, shift_start_s: i64, day_end_s: i64) -> Vec<TimeWindow> {
        let mut breaks = Vec::new();
        match self {
            ShiftKind::A => {
                breaks.push(TimeWindow::new(
                    shift_start_s + hours(4),
                    shift_start_s + hours(5),
                ));
            }
            ShiftKind::B => {
                // Breaks end at start + k * 2h15m while inside the shift.
                let cadence = hours(2) + minutes(15);
                let mut break_end = shift_start_s + cadence;
                while break_end < shift_start_s + self.shift_length_s() {
                    breaks.push(TimeWindow::new(break_end - minutes(15), break_end));
                    break_end += cadence;
                }
            }
        }
        breaks.retain(|b| b.start_s < day_end_s && b.end_s < day_end_s);
        breaks
    }

    /// Working-day mask for a driver whose chain starts on `start_day`.
    ///
    /// Type A works every non-weekend day; type B works `start_day` and
    /// every third day after it, within the week.
    pub fn working_days(self, start_day: Weekday) -> [bool; 7] {
        let mut works = [false; 7];
        match self {
            ShiftKind::A => {
                for day in Weekday::ALL {
                    works[day.index()] = !day.is_weekend();
                }
            }
            ShiftKind::B => {
                let mut idx = start_day.index();
                while idx < works.len() {
                    works[idx] = true;
                    idx += 3;
                }
            }
        }
        works
    }
}

/// One working day of a driver's weekly chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverDay {
    /// Calendar day.
    pub day: Weekday,
    /// Indexes into that day's route list, in chained order.
    pub routes: Vec<usize>,
}

/// A rostered driver and the chain of routes assigned across the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Sequentially allocated identifier.
    pub id: DriverId,
    /// Shift contract.
    pub kind: ShiftKind,
    /// Day the driver was hired on.
    pub start_day: Weekday,
    /// Working days that received at least one route.
    pub days: Vec<DriverDay>,
}

impl Driver {
    /// Total routes chained across the week.
    pub fn route_count(&self) -> usize {
        self.days.iter().map(|d| d.routes.len()).sum()
    }
}
