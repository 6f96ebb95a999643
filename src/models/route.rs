//! Route (trip) model.
//!
//! A route is a single scheduled vehicle trip: a fixed-duration time
//! interval that is either free or closed by a crew assignment. The
//! vehicle and driver are recorded together — a route cannot be half
//! assigned.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// Vehicle identifier (0-based fleet index).
pub type VehicleId = usize;

/// Driver identifier, allocated sequentially by the assigner.
pub type DriverId = usize;

/// The vehicle/driver pair that closed a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewAssignment {
    /// Assigned vehicle.
    pub vehicle: VehicleId,
    /// Assigned driver.
    pub driver: DriverId,
}

/// A single scheduled trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Trip interval [start, end).
    pub window: TimeWindow,
    /// Crew that closed the route, or `None` while it is free.
    pub crew: Option<CrewAssignment>,
}

impl Route {
    /// Creates a free route over the given interval.
    pub fn new(start_s: i64, end_s: i64) -> Self {
        Self {
            window: TimeWindow::new(start_s, end_s),
            crew: None,
        }
    }

    /// Trip start (s).
    #[inline]
    pub fn start_s(&self) -> i64 {
        self.window.start_s
    }

    /// Trip end (s).
    #[inline]
    pub fn end_s(&self) -> i64 {
        self.window.end_s
    }

    /// Whether the route is still unassigned.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.crew.is_none()
    }

    /// Closes the route with a vehicle/driver pair.
    pub fn assign(&mut self, vehicle: VehicleId, driver: DriverId) {
        self.crew = Some(CrewAssignment { vehicle, driver });
    }
}
