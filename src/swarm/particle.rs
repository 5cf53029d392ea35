//! Particle
//!
//! A single candidate solution moving through the search space.

use rand::Rng;

use crate::config::VelocityCoefficients;
use crate::error::ParticleError;

/// A candidate solution with its velocity and personal best
///
/// All three vectors always share one length. The velocity weights are
/// fixed when the particle is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    personal_best: Vec<f64>,
    coefficients: VelocityCoefficients,
}

impl Particle {
    /// Create a particle from explicit vectors
    pub fn new(
        position: Vec<f64>,
        personal_best: Vec<f64>,
        velocity: Vec<f64>,
        coefficients: VelocityCoefficients,
    ) -> Result<Self, ParticleError> {
        if position.is_empty() {
            return Err(ParticleError::EmptyVector);
        }
        ParticleError::check(position.len(), velocity.len())?;
        ParticleError::check(position.len(), personal_best.len())?;
        Ok(Self {
            position,
            velocity,
            personal_best,
            coefficients,
        })
    }

    /// Create a particle at `position` moving away from `reference`
    ///
    /// The personal best starts at `position` and the velocity is
    /// `(position - reference) / 3`.
    pub fn from_reference(
        position: Vec<f64>,
        reference: &[f64],
        coefficients: VelocityCoefficients,
    ) -> Result<Self, ParticleError> {
        ParticleError::check(position.len(), reference.len())?;
        let velocity = position
            .iter()
            .zip(reference.iter())
            .map(|(p, r)| (p - r) / 3.0)
            .collect();
        let personal_best = position.clone();
        Self::new(position, personal_best, velocity, coefficients)
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Current position
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Best validated position this particle has occupied
    pub fn personal_best(&self) -> &[f64] {
        &self.personal_best
    }

    /// Velocity weights captured at construction
    pub fn coefficients(&self) -> VelocityCoefficients {
        self.coefficients
    }

    /// Move by one velocity step; positions are never clamped
    pub fn update_position(&mut self) {
        for (p, v) in self.position.iter_mut().zip(self.velocity.iter()) {
            *p += v;
        }
    }

    /// Recompute the velocity towards the personal and global bests
    ///
    /// Two uniform draws in `[0, 1)` are taken per dimension, cognitive first.
    pub fn update_velocity<R: Rng + ?Sized>(
        &mut self,
        global_best: &[f64],
        rng: &mut R,
    ) -> Result<(), ParticleError> {
        ParticleError::check(self.dimension(), global_best.len())?;
        let VelocityCoefficients {
            inertia,
            cognitive,
            social,
        } = self.coefficients;

        for i in 0..self.velocity.len() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            let x = self.position[i];
            self.velocity[i] = inertia * self.velocity[i]
                + cognitive * r1 * (self.personal_best[i] - x)
                + social * r2 * (global_best[i] - x);
        }
        Ok(())
    }

    /// Overwrite the personal best
    pub fn set_personal_best(&mut self, personal_best: &[f64]) -> Result<(), ParticleError> {
        ParticleError::check(self.dimension(), personal_best.len())?;
        self.personal_best.copy_from_slice(personal_best);
        Ok(())
    }

    /// Overwrite a single position coordinate
    pub(crate) fn set_position_at(&mut self, index: usize, value: f64) {
        self.position[index] = value;
    }

    /// Copy of this particle with a replacement position
    pub(crate) fn with_position(&self, position: Vec<f64>) -> Result<Self, ParticleError> {
        Self::new(
            position,
            self.personal_best.clone(),
            self.velocity.clone(),
            self.coefficients,
        )
    }

    /// Take the position as personal best
    pub(crate) fn adopt_position_as_best(&mut self) {
        self.personal_best.copy_from_slice(&self.position);
    }
}
