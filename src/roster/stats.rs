//! Roster quality metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | closed routes / total routes |
//! | Driver count | drivers hired across the week |
//! | Kind split | drivers per shift contract |

use serde::{Deserialize, Serialize};

use super::Roster;
use crate::models::ShiftKind;

/// Summary of an assignment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageStats {
    /// Routes generated across the week.
    pub total_routes: usize,
    /// Routes closed by an assignment.
    pub closed_routes: usize,
    /// Routes left free (uncovered demand).
    pub free_routes: usize,
    /// closed / total, in 0.0..=1.0 (0.0 for an empty week).
    pub coverage_rate: f64,
    /// Drivers hired.
    pub driver_count: usize,
    /// Type-A drivers.
    pub type_a_drivers: usize,
    /// Type-B drivers.
    pub type_b_drivers: usize,
}

impl CoverageStats {
    /// Computes the summary for a finished roster.
    pub fn calculate(roster: &Roster) -> Self {
        let total_routes = roster.schedule.total_routes();
        let closed_routes = roster.schedule.closed_routes();
        let coverage_rate = if total_routes == 0 {
            0.0
        } else {
            closed_routes as f64 / total_routes as f64
        };
        let type_a_drivers = roster
            .drivers
            .iter()
            .filter(|d| d.kind == ShiftKind::A)
            .count();

        Self {
            total_routes,
            closed_routes,
            free_routes: total_routes - closed_routes,
            coverage_rate,
            driver_count: roster.drivers.len(),
            type_a_drivers,
            type_b_drivers: roster.drivers.len() - type_a_drivers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::demand::RouteGenerator;
    use crate::roster::ShiftAssigner;

    #[test]
    fn test_stats_add_up() {
        let config = PlanConfig::new(8);
        let week = RouteGenerator::new(&config).unwrap().generate();
        let roster = ShiftAssigner::new(&config).assign(week);
        let stats = CoverageStats::calculate(&roster);

        assert_eq!(
            stats.closed_routes + stats.free_routes,
            stats.total_routes
        );
        assert_eq!(
            stats.type_a_drivers + stats.type_b_drivers,
            stats.driver_count
        );
        assert!(stats.coverage_rate > 0.0);
        assert!(stats.coverage_rate <= 1.0);
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster {
            schedule: Default::default(),
            drivers: Vec::new(),
        };
        let stats = CoverageStats::calculate(&roster);
        assert_eq!(stats.total_routes, 0);
        assert_eq!(stats.coverage_rate, 0.0);
    }
}
