//! Evolution steps
//!
//! This module provides the two [`EvolutionStep`] strategies: a no-op for the
//! baseline optimizer and the genetic step run by the hybrid.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{EvolutionConfig, BLEND_ALPHA};
use crate::error::{SwarmError, SwarmResult};
use crate::objective::traits::Objective;
use crate::operators::crossover::BlendCrossover;
use crate::operators::mutation::UniformResetMutation;
use crate::operators::selection::{compare_fitness, TournamentSelection};
use crate::operators::traits::{
    CrossoverOperator, EvolutionStep, MutationOperator, SelectionOperator,
};
use crate::swarm::particle::Particle;
use crate::swarm::swarm::Swarm;

/// Leaves the swarm untouched (plain PSO)
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvolution;

impl EvolutionStep for NoEvolution {
    fn name(&self) -> &'static str {
        "base"
    }

    fn evolve<O, R>(&self, _swarm: &mut Swarm, _objective: &O, _rng: &mut R) -> SwarmResult<()>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        Ok(())
    }
}

/// Selection, variation and survivor replacement on the swarm's particles
///
/// 1. Fill a mating pool of `population * mating_pool_scale` tournament winners.
/// 2. Shuffle it, drop the last member if the count is odd, and pair neighbours.
/// 3. Cross each pair with probability `crossover_rate`; failing that, mutate
///    both members with probability `mutate_rate`.
/// 4. Keep the `population` offspring with the fittest personal bests.
#[derive(Clone, Debug, Default)]
pub struct GeneticEvolution {
    config: EvolutionConfig,
}

impl GeneticEvolution {
    /// Create a genetic step from a validated configuration
    pub fn new(config: EvolutionConfig) -> SwarmResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Mutable configuration; its setters validate each value
    pub fn config_mut(&mut self) -> &mut EvolutionConfig {
        &mut self.config
    }

    fn selection(&self) -> TournamentSelection {
        TournamentSelection {
            tournament_size: self.config.tournament_size,
        }
    }

    /// Build the mating pool from copies of tournament winners
    pub fn select_mating_pool<O, R>(
        &self,
        population: &[Particle],
        objective: &O,
        rng: &mut R,
    ) -> SwarmResult<Vec<Particle>>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let pool_size = self.config.mating_pool_size(population.len());
        let winners = self
            .selection()
            .select_many(population, objective, pool_size, rng)?;
        Ok(winners.into_iter().map(|i| population[i].clone()).collect())
    }

    /// Pair up a shuffled mating pool and vary each pair
    pub fn breed<O, R>(
        &self,
        mut mating_pool: Vec<Particle>,
        objective: &O,
        rng: &mut R,
    ) -> SwarmResult<Vec<Particle>>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let crossover = BlendCrossover::new(BLEND_ALPHA)?;
        let mutation = UniformResetMutation::new();
        let bounds = objective.bounds();

        mating_pool.shuffle(rng);
        if mating_pool.len() % 2 != 0 {
            mating_pool.pop();
        }

        let mut offspring = Vec::with_capacity(mating_pool.len());
        let mut crossed = 0usize;
        let mut mutated = 0usize;
        let mut parents = mating_pool.into_iter();
        while let (Some(mut a), Some(mut b)) = (parents.next(), parents.next()) {
            // Mutation is only rolled when crossover is not taken
            if rng.gen::<f64>() < self.config.crossover_rate {
                let (child_a, child_b) = crossover.crossover(&a, &b, bounds, rng)?;
                a = child_a;
                b = child_b;
                crossed += 1;
            } else if rng.gen::<f64>() < self.config.mutate_rate {
                mutation.mutate(&mut a, bounds, rng)?;
                mutation.mutate(&mut b, bounds, rng)?;
                mutated += 1;
            }
            offspring.push(a);
            offspring.push(b);
        }

        tracing::trace!(
            pairs = offspring.len() / 2,
            crossed,
            mutated,
            "bred offspring"
        );
        Ok(offspring)
    }

    /// Keep the `population_size` offspring whose personal bests score lowest
    ///
    /// Ties keep their offspring order and NaN scores rank after every number.
    pub fn select_survivors<O>(
        &self,
        offspring: Vec<Particle>,
        population_size: usize,
        objective: &O,
    ) -> SwarmResult<Vec<Particle>>
    where
        O: Objective + ?Sized,
    {
        if offspring.len() < population_size {
            return Err(SwarmError::Capacity {
                offspring: offspring.len(),
                population: population_size,
            });
        }

        let mut scored: Vec<(f64, Particle)> = offspring
            .into_iter()
            .map(|p| (objective.evaluate(p.personal_best()), p))
            .collect();
        scored.sort_by(|a, b| compare_fitness(a.0, b.0));
        scored.truncate(population_size);
        Ok(scored.into_iter().map(|(_, p)| p).collect())
    }
}

impl EvolutionStep for GeneticEvolution {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn check_capacity(&self, population_size: usize) -> SwarmResult<()> {
        self.config.check_capacity(population_size)
    }

    fn evolve<O, R>(&self, swarm: &mut Swarm, objective: &O, rng: &mut R) -> SwarmResult<()>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let population_size = swarm.len();
        self.check_capacity(population_size)?;

        let mating_pool = self.select_mating_pool(swarm.particles(), objective, rng)?;
        let offspring = self.breed(mating_pool, objective, rng)?;
        let survivors = self.select_survivors(offspring, population_size, objective)?;
        swarm.replace_population(survivors)
    }
}
