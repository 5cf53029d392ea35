//! Mutation operators
//!
//! This module provides uniform reset mutation of a single coordinate.

use rand::Rng;

use crate::error::OperatorError;
use crate::objective::bounds::MultiBounds;
use crate::operators::traits::MutationOperator;
use crate::swarm::particle::Particle;

/// Uniform reset mutation
///
/// Picks one dimension uniformly and redraws the position there uniformly
/// within the bounds. Velocity and personal best are left alone.
#[derive(Clone, Debug, Default)]
pub struct UniformResetMutation;

impl UniformResetMutation {
    /// Create a new uniform reset mutation
    pub fn new() -> Self {
        Self
    }
}

impl MutationOperator for UniformResetMutation {
    fn mutate<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> Result<(), OperatorError> {
        if bounds.dimension() != particle.dimension() {
            return Err(OperatorError::MutationFailed(format!(
                "particle of dimension {} with {} bounds",
                particle.dimension(),
                bounds.dimension()
            )));
        }
        let index = rng.gen_range(0..particle.dimension());
        let value = bounds.bounds[index].sample(rng);
        particle.set_position_at(index, value);
        Ok(())
    }
}
