//! Swarm
//!
//! A fixed-size population of particles sharing a global best position.

use rand::Rng;

use crate::config::{swarm_size, VelocityCoefficients};
use crate::error::{ParticleError, SwarmError, SwarmResult};
use crate::objective::traits::Objective;
use crate::swarm::particle::Particle;

/// An ordered population of particles plus the best validated position found
#[derive(Clone, Debug)]
pub struct Swarm {
    particles: Vec<Particle>,
    global_best: Vec<f64>,
    coefficients: VelocityCoefficients,
}

impl Swarm {
    /// Create a swarm sized for the objective's dimensionality
    ///
    /// Each particle is built from two generated candidates (position and
    /// reference point), and the global best starts at a third.
    pub fn new<O, R>(
        objective: &O,
        coefficients: VelocityCoefficients,
        rng: &mut R,
    ) -> SwarmResult<Self>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        Self::with_size(
            objective,
            swarm_size(objective.dimensions()),
            coefficients,
            rng,
        )
    }

    /// Create a swarm with an explicit number of particles
    pub fn with_size<O, R>(
        objective: &O,
        size: usize,
        coefficients: VelocityCoefficients,
        rng: &mut R,
    ) -> SwarmResult<Self>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        if size == 0 {
            return Err(SwarmError::EmptyPopulation);
        }
        let dimension = objective.dimensions();
        let generate = |rng: &mut R| -> SwarmResult<Vec<f64>> {
            let candidate = objective.generate(rng)?;
            ParticleError::check(dimension, candidate.len())?;
            Ok(candidate)
        };

        let mut particles = Vec::with_capacity(size);
        for _ in 0..size {
            let position = generate(rng)?;
            let reference = generate(rng)?;
            particles.push(Particle::from_reference(
                position,
                &reference,
                coefficients,
            )?);
        }
        let global_best = generate(rng)?;

        Ok(Self {
            particles,
            global_best,
            coefficients,
        })
    }

    /// Assemble a swarm from existing particles
    pub fn from_particles(
        particles: Vec<Particle>,
        global_best: Vec<f64>,
        coefficients: VelocityCoefficients,
    ) -> SwarmResult<Self> {
        if particles.is_empty() {
            return Err(SwarmError::EmptyPopulation);
        }
        for particle in &particles {
            ParticleError::check(global_best.len(), particle.dimension())?;
        }
        Ok(Self {
            particles,
            global_best,
            coefficients,
        })
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the swarm holds no particles (never true for a constructed swarm)
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        self.global_best.len()
    }

    /// The particles, in population order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Best validated position found so far
    pub fn global_best(&self) -> &[f64] {
        &self.global_best
    }

    /// Velocity weights given to every particle of this swarm
    pub fn coefficients(&self) -> VelocityCoefficients {
        self.coefficients
    }

    /// Overwrite the global best
    pub fn set_global_best(&mut self, global_best: &[f64]) -> Result<(), ParticleError> {
        ParticleError::check(self.dimension(), global_best.len())?;
        self.global_best.copy_from_slice(global_best);
        Ok(())
    }

    /// Move every particle once
    ///
    /// All particles steer towards the global best as it stood at the start
    /// of the pass.
    pub fn update_population<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SwarmResult<()> {
        let global_best = &self.global_best;
        for particle in &mut self.particles {
            particle.update_velocity(global_best, rng)?;
            particle.update_position();
        }
        Ok(())
    }

    /// Refresh personal bests and the global best from the current positions
    ///
    /// Particles outside the feasible region are skipped entirely.
    pub fn evaluate_population<O: Objective + ?Sized>(&mut self, objective: &O) {
        for particle in &mut self.particles {
            if !objective.validate(particle.position()) {
                continue;
            }
            let fitness = objective.evaluate(particle.position());

            if fitness < objective.evaluate(particle.personal_best()) {
                particle.adopt_position_as_best();
            }

            if fitness < objective.evaluate(&self.global_best) {
                self.global_best.copy_from_slice(particle.position());
            }
        }
    }

    /// Replace the population with a new generation of the same size
    pub fn replace_population(&mut self, particles: Vec<Particle>) -> SwarmResult<()> {
        if particles.len() != self.particles.len() {
            return Err(SwarmError::Capacity {
                offspring: particles.len(),
                population: self.particles.len(),
            });
        }
        for particle in &particles {
            ParticleError::check(self.dimension(), particle.dimension())?;
        }
        self.particles = particles;
        Ok(())
    }

    /// Consume the swarm, keeping only its global best
    pub fn into_global_best(self) -> Vec<f64> {
        self.global_best
    }
}
