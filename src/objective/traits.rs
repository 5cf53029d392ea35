//! Objective traits
//!
//! This module defines the contract an optimization problem exposes to the swarm.

use rand::Rng;

use crate::error::{SwarmError, SwarmResult};
use crate::objective::bounds::MultiBounds;

/// A continuous black-box minimization problem
///
/// The optimizer treats [`Objective::evaluate`] as a cost oracle: lower is
/// better, and the same input must always produce the same value.
pub trait Objective {
    /// Permissible `(min, max)` range for each dimension
    fn bounds(&self) -> &MultiBounds;

    /// Number of decision variables
    fn dimensions(&self) -> usize;

    /// Evaluate the cost of a candidate (lower = better)
    fn evaluate(&self, candidate: &[f64]) -> f64;

    /// Whether a candidate satisfies the problem's constraints
    ///
    /// Defaults to a per-dimension range check against [`Objective::bounds`].
    fn validate(&self, candidate: &[f64]) -> bool {
        self.bounds().contains_vec(candidate)
    }

    /// Produce a random candidate
    ///
    /// The default draws each coordinate uniformly from its bounds and refuses
    /// to hand out a draw its own [`Objective::validate`] rejects.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SwarmResult<Vec<f64>> {
        let candidate = self.bounds().sample(rng);
        if self.validate(&candidate) {
            Ok(candidate)
        } else {
            Err(SwarmError::InvalidCandidate(
                "generate produced a candidate that fails validation".to_string(),
            ))
        }
    }
}

impl<O: Objective + ?Sized> Objective for &O {
    fn bounds(&self) -> &MultiBounds {
        (**self).bounds()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn evaluate(&self, candidate: &[f64]) -> f64 {
        (**self).evaluate(candidate)
    }

    fn validate(&self, candidate: &[f64]) -> bool {
        (**self).validate(candidate)
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SwarmResult<Vec<f64>> {
        (**self).generate(rng)
    }
}

/// A closure-backed objective over fixed bounds
pub struct FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    bounds: MultiBounds,
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Create a new function-based objective
    pub fn new(bounds: MultiBounds, f: F) -> Self {
        Self { bounds, f }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, candidate: &[f64]) -> f64 {
        (self.f)(candidate)
    }
}
