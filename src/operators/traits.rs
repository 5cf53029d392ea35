//! Operator traits
//!
//! This module defines the operator traits used by the evolutionary step and
//! the [`EvolutionStep`] strategy the optimizer runs after each PSO iteration.

use rand::Rng;

use crate::error::{OperatorError, SwarmResult};
use crate::objective::bounds::MultiBounds;
use crate::objective::traits::Objective;
use crate::swarm::particle::Particle;
use crate::swarm::swarm::Swarm;

/// Selection operator trait
///
/// Picks mating-pool members from a population, scoring each particle by
/// the fitness of its personal best.
pub trait SelectionOperator {
    /// Select a single particle, returning its index
    fn select<O, R>(
        &self,
        population: &[Particle],
        objective: &O,
        rng: &mut R,
    ) -> Result<usize, OperatorError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized;

    /// Select `count` particles, returning their indices
    fn select_many<O, R>(
        &self,
        population: &[Particle],
        objective: &O,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>, OperatorError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        (0..count)
            .map(|_| self.select(population, objective, rng))
            .collect()
    }
}

/// Crossover operator trait
///
/// Combines the positions of two parents into two offspring. Each offspring
/// keeps its own parent's velocity and personal best.
pub trait CrossoverOperator {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Particle,
        parent2: &Particle,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> Result<(Particle, Particle), OperatorError>;
}

/// Mutation operator trait
///
/// Applies a random change to a particle's position in place.
pub trait MutationOperator {
    /// Mutate a particle within the given bounds
    fn mutate<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> Result<(), OperatorError>;
}

/// Work run on the swarm after every PSO iteration
///
/// The baseline optimizer uses a step that does nothing; the hybrid runs
/// selection, variation and survivor replacement.
pub trait EvolutionStep {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Fail if this step cannot preserve a population of `population_size`
    fn check_capacity(&self, _population_size: usize) -> SwarmResult<()> {
        Ok(())
    }

    /// Evolve the swarm's population in place
    fn evolve<O, R>(&self, swarm: &mut Swarm, objective: &O, rng: &mut R) -> SwarmResult<()>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VelocityCoefficients;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Always picks the last particle
    struct LastSelection;

    impl SelectionOperator for LastSelection {
        fn select<O, R>(
            &self,
            population: &[Particle],
            _objective: &O,
            _rng: &mut R,
        ) -> Result<usize, OperatorError>
        where
            O: Objective + ?Sized,
            R: Rng + ?Sized,
        {
            population
                .len()
                .checked_sub(1)
                .ok_or_else(|| OperatorError::SelectionFailed("empty population".to_string()))
        }
    }

    #[test]
    fn test_select_many_default() {
        let mut rng = StdRng::seed_from_u64(0);
        let objective = crate::objective::traits::FnObjective::new(
            MultiBounds::symmetric(1.0, 1),
            |x: &[f64]| x[0],
        );
        let particle = Particle::new(
            vec![0.0],
            vec![0.0],
            vec![0.0],
            VelocityCoefficients::default(),
        )
        .unwrap();
        let population = vec![particle.clone(), particle];

        let picks = LastSelection
            .select_many(&population, &objective, 4, &mut rng)
            .unwrap();
        assert_eq!(picks, vec![1; 4]);
        assert!(LastSelection
            .select_many(&[], &objective, 1, &mut rng)
            .is_err());
    }
}
