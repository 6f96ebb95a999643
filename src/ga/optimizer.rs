//! Generational GA loop.
//!
//! # Algorithm
//!
//! Per generation: evaluate every genome, carry the top half unmodified
//! into the next generation (elitism), and fill the rest by tournament
//! selection of two parents, single-point crossover, and point mutation
//! with a fixed probability. The loop runs a fixed generation count and
//! returns the best individual ever seen; with elitism in place the
//! best fitness is non-decreasing across generations.
//!
//! A generation in which every fitness is zero substitutes a uniform
//! fitness of 1.0 before selection, keeping selection well-defined when
//! no candidate has any merit yet.

use log::info;
use rand::seq::index::sample;
use rand::Rng;

use super::genome::{point_mutation, single_point_crossover, Genome};
use super::problem::RosterProblem;

/// Optimizer knobs.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Genomes per generation.
    pub population_size: usize,
    /// Generations to run (no convergence check).
    pub generations: usize,
    /// Probability that a child receives one point mutation.
    pub mutation_rate: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 25,
            mutation_rate: 0.2,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }
}

/// Per-generation progress record.
#[derive(Debug, Clone)]
pub struct GenerationStats {
    /// 0-based generation index.
    pub generation: usize,
    /// Best fitness within the generation.
    pub best_fitness: f64,
    /// Mean fitness within the generation.
    pub mean_fitness: f64,
}

/// The search result.
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Best genome ever seen.
    pub best: Genome,
    /// Its fitness.
    pub best_fitness: f64,
    /// Per-generation progress, in order.
    pub history: Vec<GenerationStats>,
}

/// Evolves genome populations against a [`RosterProblem`].
#[derive(Debug, Clone, Default)]
pub struct GeneticOptimizer {
    config: GaConfig,
}

impl GeneticOptimizer {
    /// Creates an optimizer with the given knobs.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// Runs the full generational loop.
    pub fn run<R: Rng>(&self, problem: &RosterProblem, rng: &mut R) -> GaOutcome {
        let size = self.config.population_size.max(2);
        let mut population: Vec<Genome> =
            (0..size).map(|_| problem.random_genome(rng)).collect();

        let mut best: Option<(Genome, f64)> = None;
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            let mut fitnesses: Vec<f64> =
                population.iter().map(|g| problem.evaluate(g)).collect();

            let gen_best = fitnesses.iter().cloned().fold(f64::MIN, f64::max);
            let gen_mean = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;
            info!("generation {generation}: best fitness {gen_best:.1}");
            history.push(GenerationStats {
                generation,
                best_fitness: gen_best,
                mean_fitness: gen_mean,
            });

            for (genome, &fitness) in population.iter().zip(&fitnesses) {
                if best.as_ref().map_or(true, |(_, f)| fitness > *f) {
                    best = Some((genome.clone(), fitness));
                }
            }

            // A wholly unfit generation still needs defined selection.
            if fitnesses.iter().all(|&f| f == 0.0) {
                fitnesses = vec![1.0; fitnesses.len()];
            }

            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| fitnesses[b].total_cmp(&fitnesses[a]));

            let elite = size / 2;
            let mut next: Vec<Genome> = order[..elite]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            while next.len() < size {
                let parent1 = tournament(&population, &fitnesses, rng);
                let parent2 = tournament(&population, &fitnesses, rng);
                let (mut child1, mut child2) =
                    single_point_crossover(parent1, parent2, rng);
                self.maybe_mutate(&mut child1, rng);
                self.maybe_mutate(&mut child2, rng);
                next.push(child1);
                next.push(child2);
            }
            next.truncate(size);
            population = next;
        }

        let (best, best_fitness) = best.unwrap_or_else(|| {
            // Zero generations: fall back to the best of the unevolved
            // population.
            let (i, fitness) = population
                .iter()
                .enumerate()
                .map(|(i, g)| (i, problem.evaluate(g)))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .expect("population is never empty");
            (population[i].clone(), fitness)
        });

        GaOutcome {
            best,
            best_fitness,
            history,
        }
    }

    fn maybe_mutate<R: Rng>(&self, genome: &mut Genome, rng: &mut R) {
        if rng.random::<f64>() < self.config.mutation_rate {
            point_mutation(genome, rng);
        }
    }
}

/// Tournament of two: sample two distinct genomes, keep the fitter.
fn tournament<'a, R: Rng>(
    population: &'a [Genome],
    fitnesses: &[f64],
    rng: &mut R,
) -> &'a Genome {
    let picks = sample(rng, population.len(), 2);
    let (i, j) = (picks.index(0), picks.index(1));
    if fitnesses[i] > fitnesses[j] {
        &population[i]
    } else {
        &population[j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn small_run(seed: u64) -> (RosterProblem, GaOutcome) {
        let problem = RosterProblem::new(PlanConfig::new(8)).unwrap();
        let config = GaConfig::default()
            .with_population_size(12)
            .with_generations(8);
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = GeneticOptimizer::new(config).run(&problem, &mut rng);
        (problem, outcome)
    }

    #[test]
    fn test_best_fitness_non_decreasing() {
        let (_, outcome) = small_run(42);
        assert_eq!(outcome.history.len(), 8);
        for pair in outcome.history.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "elitism lost the best individual"
            );
        }
    }

    #[test]
    fn test_outcome_matches_reevaluation() {
        let (problem, outcome) = small_run(42);
        assert_eq!(problem.evaluate(&outcome.best), outcome.best_fitness);
        let final_best = outcome.history.last().unwrap().best_fitness;
        assert_eq!(outcome.best_fitness, final_best);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let (_, a) = small_run(7);
        let (_, b) = small_run(7);
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness, b.best_fitness);
    }

    #[test]
    fn test_all_zero_fitness_recovers() {
        // A ruinous driver penalty floors every fitness to zero; the
        // loop must still select and finish.
        let problem =
            RosterProblem::new(PlanConfig::new(8).with_driver_penalty(1e9)).unwrap();
        let config = GaConfig::default()
            .with_population_size(6)
            .with_generations(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = GeneticOptimizer::new(config).run(&problem, &mut rng);
        assert_eq!(outcome.best_fitness, 0.0);
        assert_eq!(outcome.history.len(), 3);
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let problem = RosterProblem::new(PlanConfig::new(8)).unwrap();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(0);
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = GeneticOptimizer::new(config).run(&problem, &mut rng);
        assert!(outcome.history.is_empty());
        assert_eq!(problem.evaluate(&outcome.best), outcome.best_fitness);
    }
}
