//! Optimizer configuration
//!
//! Default coefficients, the swarm and evolution settings with validated
//! setters, and JSON loading for both.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};

/// Default social coefficient (before the `ln 2` offset)
pub const DEFAULT_SOCIAL_COEFF: f64 = 0.5;
/// Default cognitive coefficient (before the `ln 2` offset)
pub const DEFAULT_COGNITIVE_COEFF: f64 = 0.5;
/// Default number of iterations per run
pub const DEFAULT_RUN_TIME: usize = 1000;
/// Inertia weight applied to the previous velocity: `0.5 * ln 2`
pub const DEFAULT_INERTIA: f64 = 0.5 * std::f64::consts::LN_2;
/// Swarm size before the `round(sqrt(n))` term
pub const BASE_POPULATION: usize = 20;
/// Default probability of crossing a mating pair
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.25;
/// Default probability of mutating a pair that was not crossed
pub const DEFAULT_MUTATE_RATE: f64 = 0.1;
/// Default mating pool size as a multiple of the population size
pub const DEFAULT_MATING_POOL_SCALE: usize = 3;
/// Default tournament size `k`
pub const DEFAULT_TOURNAMENT_SIZE: usize = 6;
/// Blend extension on each side of the parents' interval, as a fraction of its width
pub const BLEND_ALPHA: f64 = 0.5;

/// Number of particles used for an `n`-dimensional objective
pub fn swarm_size(dimensions: usize) -> usize {
    BASE_POPULATION + (dimensions as f64).sqrt().round() as usize
}

/// Effective cognitive weight for a configured coefficient
pub fn compute_cognitive(cognitive_coeff: f64) -> f64 {
    cognitive_coeff + std::f64::consts::LN_2
}

/// Effective social weight for a configured coefficient
pub fn compute_social(social_coeff: f64) -> f64 {
    social_coeff + std::f64::consts::LN_2
}

fn non_negative(name: &str, value: f64) -> SwarmResult<f64> {
    // `!(x >= 0)` also rejects NaN
    if !(value >= 0.0) {
        return Err(SwarmError::Configuration(format!(
            "{} must be non-negative; it was {}",
            name, value
        )));
    }
    Ok(value)
}

fn positive(name: &str, value: usize) -> SwarmResult<usize> {
    if value == 0 {
        return Err(SwarmError::Configuration(format!(
            "{} must be at least 1; it was 0",
            name
        )));
    }
    Ok(value)
}

/// PSO settings shared by the baseline and hybrid optimizers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Social coefficient, pull towards the global best
    pub social_coeff: f64,
    /// Cognitive coefficient, pull towards the personal best
    pub cognitive_coeff: f64,
    /// Iterations per run
    pub run_time: usize,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            social_coeff: DEFAULT_SOCIAL_COEFF,
            cognitive_coeff: DEFAULT_COGNITIVE_COEFF,
            run_time: DEFAULT_RUN_TIME,
        }
    }
}

impl SwarmConfig {
    /// Set the social coefficient (must be >= 0)
    pub fn set_social_coeff(&mut self, social_coeff: f64) -> SwarmResult<()> {
        self.social_coeff = non_negative("social coefficient", social_coeff)?;
        Ok(())
    }

    /// Set the cognitive coefficient (must be >= 0)
    pub fn set_cognitive_coeff(&mut self, cognitive_coeff: f64) -> SwarmResult<()> {
        self.cognitive_coeff = non_negative("cognitive coefficient", cognitive_coeff)?;
        Ok(())
    }

    /// Set the number of iterations (must be >= 1)
    pub fn set_run_time(&mut self, run_time: usize) -> SwarmResult<()> {
        self.run_time = positive("run time", run_time)?;
        Ok(())
    }

    /// Check every field, e.g. after deserialization
    pub fn validate(&self) -> SwarmResult<()> {
        non_negative("social coefficient", self.social_coeff)?;
        non_negative("cognitive coefficient", self.cognitive_coeff)?;
        positive("run time", self.run_time)?;
        Ok(())
    }

    /// Velocity weights derived from this configuration
    pub fn coefficients(&self) -> VelocityCoefficients {
        VelocityCoefficients::from_config(self)
    }
}

/// Weights of the PSO velocity update, fixed when a particle is built
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityCoefficients {
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

impl VelocityCoefficients {
    /// Derive the weights from configured social and cognitive coefficients
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self {
            inertia: DEFAULT_INERTIA,
            cognitive: compute_cognitive(config.cognitive_coeff),
            social: compute_social(config.social_coeff),
        }
    }
}

impl Default for VelocityCoefficients {
    fn default() -> Self {
        Self::from_config(&SwarmConfig::default())
    }
}

/// Settings of the genetic evolution step run by the hybrid optimizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Probability that a mating pair is crossed
    pub crossover_rate: f64,
    /// Probability that an uncrossed pair is mutated
    pub mutate_rate: f64,
    /// Number of contestants per tournament
    pub tournament_size: usize,
    /// Mating pool size as a multiple of the population size
    pub mating_pool_scale: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutate_rate: DEFAULT_MUTATE_RATE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            mating_pool_scale: DEFAULT_MATING_POOL_SCALE,
        }
    }
}

impl EvolutionConfig {
    /// Set the crossover rate (must be >= 0; values >= 1 always cross)
    pub fn set_crossover_rate(&mut self, rate: f64) -> SwarmResult<()> {
        self.crossover_rate = non_negative("crossover rate", rate)?;
        Ok(())
    }

    /// Set the mutation rate (must be >= 0; values >= 1 always mutate)
    pub fn set_mutate_rate(&mut self, rate: f64) -> SwarmResult<()> {
        self.mutate_rate = non_negative("mutation rate", rate)?;
        Ok(())
    }

    /// Set the tournament size (must be >= 1)
    pub fn set_tournament_size(&mut self, k: usize) -> SwarmResult<()> {
        self.tournament_size = positive("tournament size", k)?;
        Ok(())
    }

    /// Set the mating pool scale (must be >= 1)
    ///
    /// Whether the resulting pool can refill a particular population is
    /// checked by [`EvolutionConfig::check_capacity`].
    pub fn set_mating_pool_scale(&mut self, scale: usize) -> SwarmResult<()> {
        self.mating_pool_scale = positive("mating pool scale", scale)?;
        Ok(())
    }

    /// Mating pool size for a population
    pub fn mating_pool_size(&self, population_size: usize) -> usize {
        population_size.saturating_mul(self.mating_pool_scale)
    }

    /// Offspring produced from a population: the mating pool rounded down to even
    pub fn offspring_size(&self, population_size: usize) -> usize {
        let pool = self.mating_pool_size(population_size);
        pool - pool % 2
    }

    /// Fail unless survivor replacement can refill `population_size` individuals
    pub fn check_capacity(&self, population_size: usize) -> SwarmResult<()> {
        let offspring = self.offspring_size(population_size);
        if offspring < population_size {
            return Err(SwarmError::Capacity {
                offspring,
                population: population_size,
            });
        }
        Ok(())
    }

    /// Check every field, e.g. after deserialization
    pub fn validate(&self) -> SwarmResult<()> {
        non_negative("crossover rate", self.crossover_rate)?;
        non_negative("mutation rate", self.mutate_rate)?;
        positive("tournament size", self.tournament_size)?;
        positive("mating pool scale", self.mating_pool_scale)?;
        Ok(())
    }
}

/// Complete optimizer configuration as read from a file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub swarm: SwarmConfig,
    pub evolution: EvolutionConfig,
}

impl OptimizerConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> SwarmResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SwarmError::Configuration(format!("cannot parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> SwarmResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SwarmError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SwarmResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SwarmError::Configuration(format!("cannot serialize config: {}", e)))
    }

    /// Check both sections
    pub fn validate(&self) -> SwarmResult<()> {
        self.swarm.validate()?;
        self.evolution.validate()
    }
}
