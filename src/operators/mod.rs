//! Evolutionary operators
//!
//! This module provides selection, crossover and mutation over particles, and
//! the evolution steps the optimizer runs after each PSO iteration.

pub mod crossover;
pub mod evolution;
pub mod mutation;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::evolution::*;
    pub use super::mutation::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
