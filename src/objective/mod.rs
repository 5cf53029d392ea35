//! Objectives
//!
//! This module provides the objective contract consumed by the optimizer,
//! search-space bounds, standard benchmark functions and the neural regression
//! objective used by the command-line driver.

pub mod benchmarks;
pub mod bounds;
pub mod regression;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::bounds::*;
    pub use super::regression::*;
    pub use super::traits::*;
}
