//! Rastrigin Function Benchmark
//!
//! This example compares plain PSO with the hybrid variant on the highly
//! multimodal Rastrigin function, where the genetic step helps the swarm
//! escape local optima.
//!
//! The Rastrigin function has many local minima but a single global minimum
//! at the origin.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_evo::prelude::*;

const DIM: usize = 20;
const ITERATIONS: usize = 500;
const SEEDS: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Rastrigin Function Benchmark ===\n");

    let objective = Rastrigin::new(DIM);

    println!("Problem: {} dimensions", DIM);
    println!("Search space: [-5.12, 5.12]^{}", DIM);
    println!("Global optimum: 0.0 at origin\n");

    let mut base_results = Vec::new();
    let mut hybrid_results = Vec::new();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(12345 + seed);
        let mut base = BasePso::new(&objective);
        base.set_run_time(ITERATIONS)?;
        base_results.push(base.solve(&mut rng)?.best_fitness);

        let mut rng = StdRng::seed_from_u64(12345 + seed);
        let mut hybrid = HybridPso::hybrid(&objective);
        hybrid.set_run_time(ITERATIONS)?;
        // Higher selection pressure for a multimodal landscape
        hybrid.set_tournament_size(8)?;
        hybrid_results.push(hybrid.solve(&mut rng)?.best_fitness);
    }

    println!("{:>6} {:>14} {:>14}", "seed", "base", "hybrid");
    for (seed, (base, hybrid)) in base_results.iter().zip(&hybrid_results).enumerate() {
        println!("{:>6} {:>14.6} {:>14.6}", seed, base, hybrid);
    }

    let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
    println!("\nMean best fitness:");
    println!("  base:   {:.6}", mean(&base_results));
    println!("  hybrid: {:.6}", mean(&hybrid_results));

    Ok(())
}
