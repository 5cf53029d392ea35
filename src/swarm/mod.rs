//! Particle swarm
//!
//! This module provides particles and the swarm that moves them.

pub mod particle;
pub mod swarm;

pub mod prelude {
    pub use super::particle::*;
    pub use super::swarm::*;
}
