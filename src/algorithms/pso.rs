//! Particle swarm optimizer
//!
//! This module implements the PSO run loop. The same optimizer drives both
//! the baseline and the hybrid variant; they differ only in the
//! [`EvolutionStep`] run after each iteration.

use std::fmt;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::config::{swarm_size, EvolutionConfig, SwarmConfig};
use crate::diagnostics::{FitnessHistory, SolveOutcome};
use crate::error::SwarmResult;
use crate::objective::traits::Objective;
use crate::operators::evolution::{GeneticEvolution, NoEvolution};
use crate::operators::traits::EvolutionStep;
use crate::swarm::swarm::Swarm;

/// Plain PSO
pub type BasePso<O> = ParticleSwarmOptimizer<O, NoEvolution>;

/// PSO followed by a genetic step every iteration
pub type HybridPso<O> = ParticleSwarmOptimizer<O, GeneticEvolution>;

/// Particle swarm optimizer over an objective
///
/// Each call to [`ParticleSwarmOptimizer::solve`] builds a fresh swarm, runs
/// it for the configured number of iterations, and retains the global best
/// and the per-iteration history.
#[derive(Clone, Debug)]
pub struct ParticleSwarmOptimizer<O, E = NoEvolution>
where
    O: Objective,
    E: EvolutionStep,
{
    objective: O,
    config: SwarmConfig,
    evolution: E,
    best_solution: Option<Vec<f64>>,
    history: FitnessHistory,
}

impl<O: Objective> ParticleSwarmOptimizer<O, NoEvolution> {
    /// Create a baseline optimizer with default coefficients
    pub fn new(objective: O) -> Self {
        Self::with_evolution(objective, NoEvolution)
    }
}

impl<O: Objective> ParticleSwarmOptimizer<O, GeneticEvolution> {
    /// Create a hybrid optimizer with default coefficients and rates
    pub fn hybrid(objective: O) -> Self {
        Self::with_evolution(objective, GeneticEvolution::default())
    }

    /// Configuration of the genetic step
    pub fn evolution_config(&self) -> &EvolutionConfig {
        self.evolution.config()
    }

    /// Set the probability of crossing a mating pair (must be >= 0)
    pub fn set_crossover_rate(&mut self, rate: f64) -> SwarmResult<()> {
        self.evolution.config_mut().set_crossover_rate(rate)
    }

    /// Set the probability of mutating an uncrossed pair (must be >= 0)
    pub fn set_mutate_rate(&mut self, rate: f64) -> SwarmResult<()> {
        self.evolution.config_mut().set_mutate_rate(rate)
    }

    /// Set the tournament size (must be >= 1)
    pub fn set_tournament_size(&mut self, k: usize) -> SwarmResult<()> {
        self.evolution.config_mut().set_tournament_size(k)
    }

    /// Set the mating pool scale
    ///
    /// Fails unless the resulting offspring pool can refill the swarm built
    /// for this optimizer's objective.
    pub fn set_mating_pool_scale(&mut self, scale: usize) -> SwarmResult<()> {
        let mut candidate = self.evolution.config().clone();
        candidate.set_mating_pool_scale(scale)?;
        candidate.check_capacity(swarm_size(self.objective.dimensions()))?;
        *self.evolution.config_mut() = candidate;
        Ok(())
    }
}

impl<O, E> ParticleSwarmOptimizer<O, E>
where
    O: Objective,
    E: EvolutionStep,
{
    /// Create an optimizer running `evolution` after every iteration
    pub fn with_evolution(objective: O, evolution: E) -> Self {
        Self {
            objective,
            config: SwarmConfig::default(),
            evolution,
            best_solution: None,
            history: FitnessHistory::new(),
        }
    }

    /// Create an optimizer from an existing swarm configuration
    pub fn with_config(objective: O, config: SwarmConfig, evolution: E) -> SwarmResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::with_evolution(objective, evolution)
        })
    }

    /// Set the social coefficient (must be >= 0)
    pub fn set_social_coeff(&mut self, social_coeff: f64) -> SwarmResult<()> {
        self.config.set_social_coeff(social_coeff)
    }

    /// Set the cognitive coefficient (must be >= 0)
    pub fn set_cognitive_coeff(&mut self, cognitive_coeff: f64) -> SwarmResult<()> {
        self.config.set_cognitive_coeff(cognitive_coeff)
    }

    /// Set the number of iterations per run (must be >= 1)
    pub fn set_run_time(&mut self, run_time: usize) -> SwarmResult<()> {
        self.config.set_run_time(run_time)
    }

    /// Swarm configuration
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// The objective being minimized
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// The evolution step run after each iteration
    pub fn evolution(&self) -> &E {
        &self.evolution
    }

    /// Global best retained from the last completed run
    pub fn best_solution(&self) -> Option<&[f64]> {
        self.best_solution.as_deref()
    }

    /// Best fitness recorded after each iteration of the last completed run
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Run the optimizer
    ///
    /// Every iteration moves the swarm, refreshes the bests, records the
    /// global best fitness and then runs the evolution step. A failed run
    /// leaves the previous run's history and best solution in place.
    pub fn solve<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SwarmResult<SolveOutcome> {
        self.config.validate()?;
        let population_size = swarm_size(self.objective.dimensions());
        self.evolution.check_capacity(population_size)?;

        let start_time = Instant::now();
        let run_time = self.config.run_time;
        let mut swarm = Swarm::new(&self.objective, self.config.coefficients(), rng)?;
        let mut history = FitnessHistory::new();

        info!(
            variant = self.evolution.name(),
            dimensions = self.objective.dimensions(),
            population = swarm.len(),
            iterations = run_time,
            "starting swarm"
        );

        for iteration in 0..run_time {
            swarm.update_population(rng)?;
            swarm.evaluate_population(&self.objective);

            let best_fitness = self.objective.evaluate(swarm.global_best());
            history.record(best_fitness);
            debug!(iteration, best_fitness, "iteration complete");

            self.evolution.evolve(&mut swarm, &self.objective, rng)?;
        }

        let population_size = swarm.len();
        let best_solution = swarm.into_global_best();
        let best_fitness = self.objective.evaluate(&best_solution);
        self.best_solution = Some(best_solution.clone());
        self.history = history;

        let outcome = SolveOutcome {
            variant: self.evolution.name().to_string(),
            best_solution,
            best_fitness,
            iterations: run_time,
            population_size,
            runtime_ms: 0.0,
        }
        .with_runtime(start_time.elapsed());

        info!(
            variant = self.evolution.name(),
            best_fitness,
            runtime_ms = outcome.runtime_ms,
            "swarm finished"
        );
        Ok(outcome)
    }
}

impl<O, E> fmt::Display for ParticleSwarmOptimizer<O, E>
where
    O: Objective,
    E: EvolutionStep,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.history)
    }
}
