//! Run diagnostics
//!
//! This module provides the per-iteration fitness history and the outcome
//! summary returned by a solve.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Best fitness recorded after each iteration, in iteration order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessHistory {
    entries: Vec<f64>,
}

impl FitnessHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one iteration's best fitness
    pub fn record(&mut self, fitness: f64) {
        self.entries.push(fitness);
    }

    /// Number of recorded iterations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded values
    pub fn values(&self) -> &[f64] {
        &self.entries
    }

    /// Lowest recorded value
    pub fn best(&self) -> Option<f64> {
        self.entries.iter().copied().min_by(|a, b| a.total_cmp(b))
    }

    /// Most recent value
    pub fn last(&self) -> Option<f64> {
        self.entries.last().copied()
    }

    /// Whether no entry is greater than the one before it
    pub fn is_non_increasing(&self) -> bool {
        self.entries.windows(2).all(|w| w[1] <= w[0])
    }
}

impl fmt::Display for FitnessHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "=> {}", entry)?;
        }
        Ok(())
    }
}

/// What a finished solve produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Label of the evolution step that ran
    pub variant: String,
    /// Global best position at the end of the run
    pub best_solution: Vec<f64>,
    /// Fitness of `best_solution`
    pub best_fitness: f64,
    /// Iterations completed
    pub iterations: usize,
    /// Particles in the swarm when the run ended
    pub population_size: usize,
    /// Wall-clock runtime in milliseconds
    pub runtime_ms: f64,
}

impl SolveOutcome {
    /// Set the runtime from a measured duration
    pub fn with_runtime(mut self, duration: Duration) -> Self {
        self.runtime_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Solve Summary ({}):\n\
             - Iterations: {}\n\
             - Population: {}\n\
             - Best fitness: {:.6}\n\
             - Runtime: {:.2}ms",
            self.variant, self.iterations, self.population_size, self.best_fitness, self.runtime_ms
        )
    }
}

pub mod prelude {
    pub use super::{FitnessHistory, SolveOutcome};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_display() {
        let mut history = FitnessHistory::new();
        assert_eq!(history.to_string(), "");
        history.record(2.5);
        history.record(1.0);
        assert_eq!(history.to_string(), "=> 2.5\n=> 1\n");
    }

    #[test]
    fn test_history_best_and_last() {
        let mut history = FitnessHistory::new();
        assert_eq!(history.best(), None);
        history.record(3.0);
        history.record(1.5);
        history.record(2.0);
        assert_eq!(history.best(), Some(1.5));
        assert_eq!(history.last(), Some(2.0));
        assert_eq!(history.len(), 3);
        assert!(!history.is_non_increasing());
    }

    #[test]
    fn test_history_non_increasing() {
        let mut history = FitnessHistory::new();
        assert!(history.is_non_increasing());
        for v in [5.0, 5.0, 4.0, 0.5] {
            history.record(v);
        }
        assert!(history.is_non_increasing());
    }

    #[test]
    fn test_outcome_summary() {
        let outcome = SolveOutcome {
            variant: "hybrid".to_string(),
            best_solution: vec![0.0, 0.0],
            best_fitness: 0.125,
            iterations: 10,
            population_size: 21,
            runtime_ms: 0.0,
        }
        .with_runtime(Duration::from_millis(1500));

        assert_eq!(outcome.runtime_ms, 1500.0);
        let summary = outcome.summary();
        assert!(summary.contains("Solve Summary (hybrid)"));
        assert!(summary.contains("Iterations: 10"));
        assert!(summary.contains("Best fitness: 0.125000"));
    }
}
