//! Error types for swarm-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for particle and vector-shape operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticleError {
    /// Two vectors that must share a dimensionality do not
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A particle cannot be built from zero-length vectors
    #[error("Particle vectors must not be empty")]
    EmptyVector,
}

impl ParticleError {
    /// Fail with `DimensionMismatch` unless `actual == expected`
    pub fn check(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}

/// Error type for evolutionary operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Selection operation failed
    #[error("Selection failed: {0}")]
    SelectionFailed(String),

    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Mutation operation failed
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for loading regression datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    /// IO error while opening the dataset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row did not have the expected number of columns
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A field could not be parsed as a number
    #[error("Row {row}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    /// The dataset holds no rows
    #[error("Dataset is empty")]
    Empty,
}

/// Top-level error type for optimizer operations
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Particle or vector-shape error
    #[error("Particle error: {0}")]
    Particle(#[from] ParticleError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The offspring pool cannot refill the population
    #[error(
        "Invalid configuration: offspring pool of {offspring} cannot refill a population of {population}"
    )]
    Capacity { offspring: usize, population: usize },

    /// An objective produced a candidate that fails its own validation
    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Dataset error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl SwarmError {
    /// True for every error raised by configuration validation, capacity included
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::Capacity { .. }
                | Self::Operator(OperatorError::InvalidConfiguration(_))
        )
    }
}

/// Result type alias for optimizer operations
pub type SwarmResult<T> = Result<T, SwarmError>;
