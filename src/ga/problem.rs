//! GA problem definition for the weekly roster.
//!
//! Bridges the domain (route generation, greedy assignment) to the
//! optimizer: genomes are sampled against the fleet size, decoded by a
//! scripted greedy run over a clone of the cached base schedule, and
//! scored by coverage minus a per-driver penalty. Fitness is a pure
//! function of the genome: decoding never touches the base schedule
//! or any retained elite.

use rand::Rng;

use super::genome::Genome;
use crate::config::PlanConfig;
use crate::demand::RouteGenerator;
use crate::error::ConfigurationError;
use crate::models::WeeklySchedule;
use crate::roster::{Roster, ShiftAssigner};

/// Genome length bounds relative to the fleet size.
const MIN_GENOME_FACTOR: usize = 2;
const MAX_GENOME_FACTOR: usize = 5;

/// The optimization problem: a fixed route timeline plus the rules for
/// sampling, decoding, and scoring genomes against it.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    config: PlanConfig,
    base: WeeklySchedule,
    min_genome_len: usize,
    max_genome_len: usize,
}

impl RosterProblem {
    /// Generates the base schedule from the configuration and builds
    /// the problem around it.
    pub fn new(config: PlanConfig) -> Result<Self, ConfigurationError> {
        let base = RouteGenerator::new(&config)?.generate();
        Ok(Self::with_base(config, base))
    }

    /// Builds the problem around a pre-generated schedule.
    pub fn with_base(config: PlanConfig, base: WeeklySchedule) -> Self {
        let min_genome_len = MIN_GENOME_FACTOR * config.total_buses;
        let max_genome_len = MAX_GENOME_FACTOR * config.total_buses;
        Self {
            config,
            base,
            min_genome_len,
            max_genome_len,
        }
    }

    /// The cached route timeline every genome is evaluated against.
    pub fn base(&self) -> &WeeklySchedule {
        &self.base
    }

    /// Samples a genome with length uniform in the configured bounds.
    pub fn random_genome<R: Rng>(&self, rng: &mut R) -> Genome {
        let len = rng.random_range(self.min_genome_len..=self.max_genome_len);
        Genome::random(len, rng)
    }

    /// Decodes a genome into a full roster: a scripted greedy run over
    /// an independent copy of the base schedule.
    pub fn decode(&self, genome: &Genome) -> Roster {
        ShiftAssigner::scripted(&self.config, genome.genes.clone()).assign(self.base.clone())
    }

    /// Fitness: `closed_routes − driver_penalty · drivers`, floored at
    /// zero.
    pub fn evaluate(&self, genome: &Genome) -> f64 {
        let roster = self.decode(genome);
        let closed = roster.schedule.closed_routes() as f64;
        let drivers = roster.drivers.len() as f64;
        (closed - self.config.driver_penalty * drivers).max(0.0)
    }
}
