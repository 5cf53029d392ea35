//! Crossover operators
//!
//! This module provides blended crossover with a random cut point.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::config::BLEND_ALPHA;
use crate::error::OperatorError;
use crate::objective::bounds::MultiBounds;
use crate::operators::traits::CrossoverOperator;
use crate::swarm::particle::Particle;

/// Blend crossover (BLX-α) applied after a random cut dimension
///
/// A cut `d` is drawn uniformly from `[0, n)`. Coordinates before `d` are
/// copied from each offspring's own parent. From `d` on, each offspring
/// draws independently from `[lo - α·diff, hi + α·diff]`, where `lo`/`hi`
/// are the parents' values; when the parents agree, the objective's bounds
/// at that dimension stand in for `lo`/`hi`. Results are not clamped.
#[derive(Clone, Debug)]
pub struct BlendCrossover {
    /// Extension factor on each side of the parents' interval
    pub alpha: f64,
}

impl BlendCrossover {
    /// Create a new blend crossover; `alpha` must be non-negative
    pub fn new(alpha: f64) -> Result<Self, OperatorError> {
        if !(alpha >= 0.0 && alpha.is_finite()) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "blend alpha must be a non-negative number, got {}",
                alpha
            )));
        }
        Ok(Self { alpha })
    }

    /// Sampling interval for one dimension
    pub fn interval(&self, a: f64, b: f64, min: f64, max: f64) -> (f64, f64) {
        let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
        if hi - lo == 0.0 {
            lo = min;
            hi = max;
        }
        let diff = hi - lo;
        (lo - self.alpha * diff, hi + self.alpha * diff)
    }
}

impl Default for BlendCrossover {
    fn default() -> Self {
        Self { alpha: BLEND_ALPHA }
    }
}

impl CrossoverOperator for BlendCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Particle,
        parent2: &Particle,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> Result<(Particle, Particle), OperatorError> {
        let n = parent1.dimension();
        if parent2.dimension() != n || bounds.dimension() != n {
            return Err(OperatorError::CrossoverFailed(format!(
                "parents of dimension {} and {} with {} bounds",
                n,
                parent2.dimension(),
                bounds.dimension()
            )));
        }

        let mut child1 = parent1.position().to_vec();
        let mut child2 = parent2.position().to_vec();

        let cut = rng.gen_range(0..n);
        for (i, b) in bounds.iter().enumerate().skip(cut) {
            let (low, high) = self.interval(child1[i], child2[i], b.min, b.max);
            // The width must be finite too, or the uniform range overflows
            if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) {
                return Err(OperatorError::CrossoverFailed(format!(
                    "non-finite blend interval [{}, {}] at dimension {}",
                    low, high, i
                )));
            }
            let range = Uniform::new_inclusive(low, high);
            child1[i] = range.sample(rng);
            child2[i] = range.sample(rng);
        }

        let offspring1 = parent1
            .with_position(child1)
            .map_err(|e| OperatorError::CrossoverFailed(e.to_string()))?;
        let offspring2 = parent2
            .with_position(child2)
            .map_err(|e| OperatorError::CrossoverFailed(e.to_string()))?;
        Ok((offspring1, offspring2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VelocityCoefficients;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(position: Vec<f64>, personal_best: Vec<f64>, velocity: Vec<f64>) -> Particle {
        Particle::new(
            position,
            personal_best,
            velocity,
            VelocityCoefficients::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_alpha() {
        assert_eq!(BlendCrossover::new(0.25).unwrap().alpha, 0.25);
        assert!(BlendCrossover::new(0.0).is_ok());
        for alpha in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                BlendCrossover::new(alpha),
                Err(OperatorError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_interval() {
        let blx = BlendCrossover::default();
        assert_eq!(blx.interval(1.0, 3.0, -10.0, 10.0), (0.0, 4.0));
        assert_eq!(blx.interval(3.0, 1.0, -10.0, 10.0), (0.0, 4.0));
        // Equal parents fall back to the bounds and widen by half their range
        assert_eq!(blx.interval(2.0, 2.0, -1.0, 1.0), (-2.0, 2.0));
    }

    #[test]
    fn test_crossover_keeps_prefix_and_blends_suffix() {
        let blx = BlendCrossover::default();
        let bounds = MultiBounds::symmetric(10.0, 6);
        let p1 = particle(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![9.0; 6],
            vec![0.1; 6],
        );
        let p2 = particle(
            vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0],
            vec![-9.0; 6],
            vec![-0.1; 6],
        );

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = StdRng::seed_from_u64(seed);
            let cut = replay.gen_range(0..6);

            let (c1, c2) = blx.crossover(&p1, &p2, &bounds, &mut rng).unwrap();
            for i in 0..cut {
                assert_eq!(c1.position()[i], p1.position()[i]);
                assert_eq!(c2.position()[i], p2.position()[i]);
            }
            for i in cut..6 {
                let (low, high) =
                    blx.interval(p1.position()[i], p2.position()[i], -10.0, 10.0);
                for child in [&c1, &c2] {
                    let v = child.position()[i];
                    assert!(v >= low && v <= high, "{} outside [{}, {}]", v, low, high);
                }
            }

            assert_eq!(c1.personal_best(), p1.personal_best());
            assert_eq!(c1.velocity(), p1.velocity());
            assert_eq!(c2.personal_best(), p2.personal_best());
            assert_eq!(c2.velocity(), p2.velocity());
        }
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let blx = BlendCrossover::default();
        let bounds = MultiBounds::symmetric(10.0, 3);
        let p1 = particle(vec![1.0; 3], vec![1.0; 3], vec![0.0; 3]);
        let p2 = particle(vec![2.0; 3], vec![2.0; 3], vec![0.0; 3]);
        let (before1, before2) = (p1.clone(), p2.clone());
        let _ = blx.crossover(&p1, &p2, &bounds, &mut rng).unwrap();
        assert_eq!(p1, before1);
        assert_eq!(p2, before2);
    }

    #[test]
    fn test_crossover_rejects_mismatched_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let blx = BlendCrossover::default();
        let p1 = particle(vec![1.0; 3], vec![1.0; 3], vec![0.0; 3]);
        let p2 = particle(vec![2.0; 2], vec![2.0; 2], vec![0.0; 2]);
        let err = blx
            .crossover(&p1, &p2, &MultiBounds::symmetric(1.0, 3), &mut rng)
            .unwrap_err();
        assert!(matches!(err, OperatorError::CrossoverFailed(_)));
    }

    #[test]
    fn test_crossover_rejects_overflowing_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let blx = BlendCrossover::default();
        let bounds = MultiBounds::symmetric(f64::MAX, 1);
        // Both ends are finite but their distance is not
        let p1 = particle(vec![-5e307], vec![0.0], vec![0.0]);
        let p2 = particle(vec![5e307], vec![0.0], vec![0.0]);
        let (low, high) = blx.interval(-5e307, 5e307, -f64::MAX, f64::MAX);
        assert!(low.is_finite() && high.is_finite());

        let err = blx.crossover(&p1, &p2, &bounds, &mut rng).unwrap_err();
        assert!(matches!(err, OperatorError::CrossoverFailed(_)));
    }
}
