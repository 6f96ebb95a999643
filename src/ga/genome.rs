//! Shift-script genome and genetic operators.
//!
//! # Encoding
//!
//! A genome is a variable-length sequence over the shift-kind alphabet.
//! Gene `k` names the contract of the `k`-th driver a greedy assignment
//! run hires; when the genes run out, hiring stops. Length varies per
//! individual within the bounds the problem derives from the fleet size.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::ShiftKind;

/// One candidate configuration: the driver-type request sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    /// Shift kind per hire, consumed front to back.
    pub genes: Vec<ShiftKind>,
}

impl Genome {
    /// Creates a uniformly random genome of the given length.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let genes = (0..len)
            .map(|_| {
                if rng.random_bool(0.5) {
                    ShiftKind::A
                } else {
                    ShiftKind::B
                }
            })
            .collect();
        Self { genes }
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome carries no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Single-point crossover at a uniform cut in `[0, min(len1, len2))`.
///
/// Children swap tails, so their lengths are the parents' lengths
/// exchanged.
pub fn single_point_crossover<R: Rng>(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut R,
) -> (Genome, Genome) {
    let cut_bound = parent1.len().min(parent2.len());
    if cut_bound == 0 {
        return (parent1.clone(), parent2.clone());
    }
    let cut = rng.random_range(0..cut_bound);

    let mut child1 = parent1.genes[..cut].to_vec();
    child1.extend_from_slice(&parent2.genes[cut..]);
    let mut child2 = parent2.genes[..cut].to_vec();
    child2.extend_from_slice(&parent1.genes[cut..]);

    (Genome { genes: child1 }, Genome { genes: child2 })
}

/// Point mutation: flips one uniformly chosen gene to the other kind.
pub fn point_mutation<R: Rng>(genome: &mut Genome, rng: &mut R) {
    if genome.is_empty() {
        return;
    }
    let at = rng.random_range(0..genome.len());
    genome.genes[at] = match genome.genes[at] {
        ShiftKind::A => ShiftKind::B,
        ShiftKind::B => ShiftKind::A,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_genome_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        let g = Genome::random(16, &mut rng);
        assert_eq!(g.len(), 16);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Genome {
            genes: vec![ShiftKind::A; 4],
        };
        let p2 = Genome {
            genes: vec![ShiftKind::B; 6],
        };

        let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
        // Lengths are exchanged across the cut.
        assert_eq!(c1.len(), 6);
        assert_eq!(c2.len(), 4);
        // Gene material is conserved across the pair.
        let count_a =
            |g: &Genome| g.genes.iter().filter(|&&k| k == ShiftKind::A).count();
        assert!(count_a(&c1) < 4);
        assert_eq!(count_a(&c1) + count_a(&c2), 4);
    }

    #[test]
    fn test_mutation_flips_exactly_one_gene() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut g = Genome {
            genes: vec![ShiftKind::A; 10],
        };
        point_mutation(&mut g, &mut rng);
        let flipped = g.genes.iter().filter(|&&k| k == ShiftKind::B).count();
        assert_eq!(flipped, 1);
    }

    #[test]
    fn test_mutation_on_empty_genome() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut g = Genome { genes: Vec::new() };
        point_mutation(&mut g, &mut rng);
        assert!(g.is_empty());
    }
}
