//! Sphere Function Optimization
//!
//! This example minimizes the Sphere function (sum of squares) with plain
//! particle swarm optimization.
//!
//! The Sphere function is a simple unimodal, convex, and separable benchmark
//! that's easy to optimize but useful for verifying the swarm is working correctly.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_evo::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sphere Function Optimization ===\n");

    // Create a seeded RNG for reproducibility
    let mut rng = StdRng::seed_from_u64(42);

    const DIM: usize = 10;

    // Each dimension in [-5.12, 5.12], optimum 0 at the origin
    let objective = Sphere::new(DIM);

    let mut pso = BasePso::new(objective);
    pso.set_run_time(300)?;
    let outcome = pso.solve(&mut rng)?;

    println!("Optimization complete!");
    println!("  Best fitness: {:.6}", outcome.best_fitness);
    println!("  Iterations:   {}", outcome.iterations);
    println!("  Particles:    {}", outcome.population_size);
    println!("\nBest solution:");
    for (i, val) in outcome.best_solution.iter().enumerate() {
        println!("  x[{}] = {:.6}", i, val);
    }

    let distance_from_optimum: f64 = outcome
        .best_solution
        .iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt();
    println!("\nDistance from optimum: {:.6}", distance_from_optimum);

    println!("\n{}", outcome.summary());

    Ok(())
}
