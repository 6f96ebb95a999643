//! Calendar week model.
//!
//! The planning horizon is one fixed week: seven calendar slots with a
//! stable Monday-first iteration order. `WeeklySchedule` owns every
//! route of the week; cloning it is the deep copy used for trial
//! assignments.

use serde::{Deserialize, Serialize};

use super::Route;

/// Day of the planning week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 0-based index, Monday = 0.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day for a 0-based index; `None` past Sunday.
    pub fn from_index(index: usize) -> Option<Weekday> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is one of the two designated weekend days.
    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// English day name, capitalized.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// One week of routes, ordered by day.
///
/// Invariant: routes within a day are in nondecreasing start order
/// (the generator emits them that way; the assigner relies on it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [Vec<Route>; 7],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            days: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl WeeklySchedule {
    /// Creates an empty week.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes of one day.
    pub fn day(&self, day: Weekday) -> &[Route] {
        &self.days[day.index()]
    }

    /// Mutable routes of one day.
    pub fn day_mut(&mut self, day: Weekday) -> &mut Vec<Route> {
        &mut self.days[day.index()]
    }

    /// Iterates days in calendar order.
    pub fn iter_days(&self) -> impl Iterator<Item = (Weekday, &[Route])> {
        Weekday::ALL
            .iter()
            .map(move |&d| (d, self.days[d.index()].as_slice()))
    }

    /// Total routes across the week.
    pub fn total_routes(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Routes closed by an assignment.
    pub fn closed_routes(&self) -> usize {
        self.days
            .iter()
            .flatten()
            .filter(|r| !r.is_free())
            .count()
    }

    /// Routes still free.
    pub fn free_routes(&self) -> usize {
        self.total_routes() - self.closed_routes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_order() {
        assert_eq!(Weekday::Monday.index(), 0);
        assert_eq!(Weekday::Sunday.index(), 6);
        assert_eq!(Weekday::from_index(2), Some(Weekday::Wednesday));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_weekend_days() {
        assert!(Weekday::Saturday.is_weekend());
        assert!(Weekday::Sunday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
    }

    #[test]
    fn test_schedule_counts() {
        let mut week = WeeklySchedule::new();
        week.day_mut(Weekday::Monday).push(Route::new(0, 100));
        week.day_mut(Weekday::Monday).push(Route::new(100, 200));
        week.day_mut(Weekday::Friday).push(Route::new(0, 100));

        assert_eq!(week.total_routes(), 3);
        assert_eq!(week.closed_routes(), 0);

        week.day_mut(Weekday::Monday)[0].assign(0, 1);
        assert_eq!(week.closed_routes(), 1);
        assert_eq!(week.free_routes(), 2);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut week = WeeklySchedule::new();
        week.day_mut(Weekday::Monday).push(Route::new(0, 100));

        let mut trial = week.clone();
        trial.day_mut(Weekday::Monday)[0].assign(0, 1);

        // The canonical week is untouched by the trial assignment.
        assert!(week.day(Weekday::Monday)[0].is_free());
        assert!(!trial.day(Weekday::Monday)[0].is_free());
    }

    #[test]
    fn test_iter_days_calendar_order() {
        let week = WeeklySchedule::new();
        let order: Vec<Weekday> = week.iter_days().map(|(d, _)| d).collect();
        assert_eq!(order, Weekday::ALL.to_vec());
    }
}
