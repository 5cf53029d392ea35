//! # swarm-evo
//!
//! Particle swarm optimization with an optional genetic evolution step.
//!
//! The optimizer minimizes any type implementing [`objective::traits::Objective`].
//! A baseline run is plain PSO; the hybrid variant additionally runs tournament
//! selection, blended crossover, uniform reset mutation and survivor
//! replacement on the swarm after every iteration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swarm_evo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut pso = HybridPso::hybrid(Rastrigin::new(10));
//! pso.set_run_time(500)?;
//! let outcome = pso.solve(&mut rng)?;
//! println!("{}", outcome.summary());
//! ```

pub mod algorithms;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod objective;
pub mod operators;
pub mod swarm;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::objective::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::swarm::prelude::*;
}
