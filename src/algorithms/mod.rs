//! Optimization algorithms
//!
//! This module provides the particle swarm optimizer and its hybrid variant.

pub mod pso;

pub mod prelude {
    pub use super::pso::*;
}
