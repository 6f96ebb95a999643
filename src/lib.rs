//! Weekly transit crew rostering.
//!
//! Builds one static weekly bus operating plan per run: a demand curve
//! drives route generation, a greedy constraint-aware assigner binds
//! vehicles and drivers to routes under shift-length, break, and
//! day-off rules, and a genetic optimizer searches the driver-type
//! configuration space for better coverage at lower driver cost.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Route`, `WeeklySchedule`, `Weekday`,
//!   `ShiftKind`, `Driver`, `TimeWindow`
//! - **`config`** / **`error`**: `PlanConfig` validation and
//!   `ConfigurationError`
//! - **`demand`**: Peak/off-peak route generation
//! - **`roster`**: Greedy assignment (`ShiftAssigner`) and coverage
//!   metrics
//! - **`ga`**: Genome encoding, roster problem, generational optimizer
//! - **`report`**: Ordered rows for external rendering
//!
//! # Pipeline
//!
//! ```
//! use transit_roster::config::PlanConfig;
//! use transit_roster::demand::RouteGenerator;
//! use transit_roster::roster::ShiftAssigner;
//!
//! let config = PlanConfig::new(8);
//! let week = RouteGenerator::new(&config)?.generate();
//! let roster = ShiftAssigner::new(&config).assign(week);
//! assert!(roster.schedule.closed_routes() > 0);
//! # Ok::<(), transit_roster::error::ConfigurationError>(())
//! ```
//!
//! Every infeasibility past configuration validation degrades to
//! partial coverage; there is no failure mode at scheduling time.

pub mod config;
pub mod demand;
pub mod error;
pub mod ga;
pub mod models;
pub mod report;
pub mod roster;

pub use config::PlanConfig;
pub use error::ConfigurationError;
