//! Benchmark objectives
//!
//! This module provides standard benchmark functions for exercising the swarm.
//! All of them are minimized.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::error::SwarmError;
use crate::objective::bounds::{Bounds, MultiBounds};
use crate::objective::traits::Objective;

/// Metadata shared by benchmark functions
pub trait BenchmarkFunction: Objective {
    /// Name of the benchmark function
    fn name(&self) -> &'static str;

    /// Optimal (minimum) objective value
    fn optimal_fitness(&self) -> f64;

    /// Optimal solution (if known)
    fn optimal_solution(&self) -> Option<Vec<f64>>;
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Debug)]
pub struct Sphere {
    bounds: MultiBounds,
}

impl Sphere {
    /// Create a new Sphere function on [-5.12, 5.12]ⁿ
    pub fn new(dimension: usize) -> Self {
        Self {
            bounds: MultiBounds::symmetric(5.12, dimension),
        }
    }

    /// Use the same `bound` on every dimension
    pub fn with_bounds(mut self, bound: Bounds) -> Self {
        self.bounds = MultiBounds::uniform(bound, self.bounds.dimension());
        self
    }
}

impl Objective for Sphere {
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

impl BenchmarkFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self) -> Option<Vec<f64>> {
        Some(vec![0.0; self.dimensions()])
    }
}

/// Rastrigin function: f(x) = 10n + Σ(xᵢ² - 10cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum at origin.
#[derive(Clone, Debug)]
pub struct Rastrigin {
    bounds: MultiBounds,
}

impl Rastrigin {
    /// Create a new Rastrigin function on [-5.12, 5.12]ⁿ
    pub fn new(dimension: usize) -> Self {
        Self {
            bounds: MultiBounds::symmetric(5.12, dimension),
        }
    }

    /// Use the same `bound` on every dimension
    pub fn with_bounds(mut self, bound: Bounds) -> Self {
        self.bounds = MultiBounds::uniform(bound, self.bounds.dimension());
        self
    }
}

impl Objective for Rastrigin {
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let a = 10.0;
        let n = x.len() as f64;
        a * n
            + x.iter()
                .map(|xi| xi * xi - a * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }
}

impl BenchmarkFunction for Rastrigin {
    fn name(&self) -> &'static str {
        "Rastrigin"
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self) -> Option<Vec<f64>> {
        Some(vec![0.0; self.dimensions()])
    }
}

/// Rosenbrock function: f(x) = Σ[100(xᵢ₊₁-xᵢ²)² + (1-xᵢ)²]
///
/// Valley structure, non-separable. Optimum at (1,1,...,1).
#[derive(Clone, Debug)]
pub struct Rosenbrock {
    bounds: MultiBounds,
}

impl Rosenbrock {
    /// Create a new Rosenbrock function on [-5, 10]ⁿ
    ///
    /// # Panics
    /// Panics if `dimension < 2`
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 2, "Rosenbrock requires at least 2 dimensions");
        Self {
            bounds: MultiBounds::uniform(Bounds::new(-5.0, 10.0), dimension),
        }
    }

    /// Use the same `bound` on every dimension
    pub fn with_bounds(mut self, bound: Bounds) -> Self {
        self.bounds = MultiBounds::uniform(bound, self.bounds.dimension());
        self
    }
}

impl Objective for Rosenbrock {
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.windows(2)
            .map(|w| {
                let xi = w[0];
                let xi1 = w[1];
                100.0 * (xi1 - xi * xi).powi(2) + (1.0 - xi).powi(2)
            })
            .sum()
    }
}

impl BenchmarkFunction for Rosenbrock {
    fn name(&self) -> &'static str {
        "Rosenbrock"
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self) -> Option<Vec<f64>> {
        Some(vec![1.0; self.dimensions()])
    }
}

/// Ackley function
///
/// Nearly flat outer region with many local minima. Optimum at origin.
#[derive(Clone, Debug)]
pub struct Ackley {
    bounds: MultiBounds,
    a: f64,
    b: f64,
    c: f64,
}

impl Ackley {
    /// Create a new Ackley function on [-32.768, 32.768]ⁿ with default parameters
    pub fn new(dimension: usize) -> Self {
        Self::with_params(dimension, 20.0, 0.2, 2.0 * PI)
    }

    /// Create with custom parameters
    pub fn with_params(dimension: usize, a: f64, b: f64, c: f64) -> Self {
        Self {
            bounds: MultiBounds::symmetric(32.768, dimension),
            a,
            b,
            c,
        }
    }

    /// Use the same `bound` on every dimension
    pub fn with_bounds(mut self, bound: Bounds) -> Self {
        self.bounds = MultiBounds::uniform(bound, self.bounds.dimension());
        self
    }
}

impl Objective for Ackley {
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len() as f64;
        let sum_sq = x.iter().map(|xi| xi * xi).sum::<f64>();
        let sum_cos = x.iter().map(|xi| (self.c * xi).cos()).sum::<f64>();

        -self.a * (-self.b * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp()
            + self.a
            + std::f64::consts::E
    }
}

impl BenchmarkFunction for Ackley {
    fn name(&self) -> &'static str {
        "Ackley"
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self) -> Option<Vec<f64>> {
        Some(vec![0.0; self.dimensions()])
    }
}

/// Benchmark names accepted by [`Benchmark::build`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchmarkKind {
    Sphere,
    Rastrigin,
    Rosenbrock,
    Ackley,
}

impl FromStr for BenchmarkKind {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "rastrigin" => Ok(Self::Rastrigin),
            "rosenbrock" => Ok(Self::Rosenbrock),
            "ackley" => Ok(Self::Ackley),
            other => Err(SwarmError::Configuration(format!(
                "unknown benchmark '{}'",
                other
            ))),
        }
    }
}

/// Any built-in benchmark, chosen at runtime
#[derive(Clone, Debug)]
pub enum Benchmark {
    Sphere(Sphere),
    Rastrigin(Rastrigin),
    Rosenbrock(Rosenbrock),
    Ackley(Ackley),
}

impl Benchmark {
    /// Build the named benchmark with `dimension` variables
    pub fn build(kind: BenchmarkKind, dimension: usize) -> Result<Self, SwarmError> {
        if dimension == 0 {
            return Err(SwarmError::Configuration(
                "benchmark dimension must be at least 1".to_string(),
            ));
        }
        Ok(match kind {
            BenchmarkKind::Sphere => Self::Sphere(Sphere::new(dimension)),
            BenchmarkKind::Rastrigin => Self::Rastrigin(Rastrigin::new(dimension)),
            BenchmarkKind::Rosenbrock => {
                if dimension < 2 {
                    return Err(SwarmError::Configuration(
                        "Rosenbrock requires at least 2 dimensions".to_string(),
                    ));
                }
                Self::Rosenbrock(Rosenbrock::new(dimension))
            }
            BenchmarkKind::Ackley => Self::Ackley(Ackley::new(dimension)),
        })
    }
}

impl Objective for Benchmark {
    fn bounds(&self) -> &MultiBounds {
        match self {
            Self::Sphere(f) => f.bounds(),
            Self::Rastrigin(f) => f.bounds(),
            Self::Rosenbrock(f) => f.bounds(),
            Self::Ackley(f) => f.bounds(),
        }
    }

    fn dimensions(&self) -> usize {
        self.bounds().dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            Self::Sphere(f) => f.evaluate(x),
            Self::Rastrigin(f) => f.evaluate(x),
            Self::Rosenbrock(f) => f.evaluate(x),
            Self::Ackley(f) => f.evaluate(x),
        }
    }
}

impl BenchmarkFunction for Benchmark {
    fn name(&self) -> &'static str {
        match self {
            Self::Sphere(f) => f.name(),
            Self::Rastrigin(f) => f.name(),
            Self::Rosenbrock(f) => f.name(),
            Self::Ackley(f) => f.name(),
        }
    }

    fn optimal_fitness(&self) -> f64 {
        match self {
            Self::Sphere(f) => f.optimal_fitness(),
            Self::Rastrigin(f) => f.optimal_fitness(),
            Self::Rosenbrock(f) => f.optimal_fitness(),
            Self::Ackley(f) => f.optimal_fitness(),
        }
    }

    fn optimal_solution(&self) -> Option<Vec<f64>> {
        match self {
            Self::Sphere(f) => f.optimal_solution(),
            Self::Rastrigin(f) => f.optimal_solution(),
            Self::Rosenbrock(f) => f.optimal_solution(),
            Self::Ackley(f) => f.optimal_solution(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_at_optimum() {
        let sphere = Sphere::new(3);
        assert_relative_eq!(sphere.evaluate(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_sphere_non_optimum() {
        let sphere = Sphere::new(3);
        assert_relative_eq!(sphere.evaluate(&[1.0, 2.0, 3.0]), 14.0);
    }

    #[test]
    fn test_sphere_metadata() {
        let sphere = Sphere::new(5);
        assert_eq!(sphere.name(), "Sphere");
        assert_eq!(sphere.dimensions(), 5);
        assert_eq!(sphere.bounds().get(0), Some(&Bounds::symmetric(5.12)));
        assert_relative_eq!(sphere.optimal_fitness(), 0.0);
        assert_eq!(sphere.optimal_solution(), Some(vec![0.0; 5]));
    }

    #[test]
    fn test_sphere_with_bounds() {
        let sphere = Sphere::new(2).with_bounds(Bounds::symmetric(10.0));
        assert_eq!(sphere.dimensions(), 2);
        assert!(sphere.validate(&[10.0, -10.0]));
        assert!(!sphere.validate(&[10.1, 0.0]));
    }

    #[test]
    fn test_rastrigin_at_optimum() {
        let rastrigin = Rastrigin::new(3);
        assert_relative_eq!(rastrigin.evaluate(&[0.0, 0.0, 0.0]), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rastrigin_non_optimum() {
        let rastrigin = Rastrigin::new(2);
        let expected = 10.0 * 2.0 + 2.0 * (1.0 - 10.0 * (2.0 * PI).cos());
        assert_relative_eq!(rastrigin.evaluate(&[1.0, 1.0]), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_rosenbrock_at_optimum() {
        let rosenbrock = Rosenbrock::new(3);
        assert_relative_eq!(rosenbrock.evaluate(&[1.0, 1.0, 1.0]), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rosenbrock_non_optimum() {
        let rosenbrock = Rosenbrock::new(2);
        assert_relative_eq!(rosenbrock.evaluate(&[0.0, 0.0]), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ackley_at_optimum() {
        let ackley = Ackley::new(3);
        assert_relative_eq!(ackley.evaluate(&[0.0, 0.0, 0.0]), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_benchmark_kind_from_str() {
        assert_eq!(
            "sphere".parse::<BenchmarkKind>().unwrap(),
            BenchmarkKind::Sphere
        );
        assert_eq!(
            "Ackley".parse::<BenchmarkKind>().unwrap(),
            BenchmarkKind::Ackley
        );
        assert!("griewank".parse::<BenchmarkKind>().is_err());
    }

    #[test]
    fn test_benchmark_dispatch() {
        let bench = Benchmark::build(BenchmarkKind::Rosenbrock, 4).unwrap();
        assert_eq!(bench.name(), "Rosenbrock");
        assert_eq!(bench.dimensions(), 4);
        assert_relative_eq!(bench.evaluate(&[1.0; 4]), 0.0, epsilon = 1e-10);
        assert_eq!(bench.optimal_solution(), Some(vec![1.0; 4]));
    }

    #[test]
    fn test_benchmark_rejects_bad_dimension() {
        assert!(Benchmark::build(BenchmarkKind::Sphere, 0).is_err());
        assert!(Benchmark::build(BenchmarkKind::Rosenbrock, 1).is_err());
    }
}
