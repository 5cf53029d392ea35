//! Neural Regression Fit
//!
//! This example fits a one-hidden-layer ReLU network to a synthetic dataset by
//! minimizing mean squared error with both optimizer variants, then reports
//! predictions from the hybrid's best parameters.
//!
//! Pass a header-less CSV path (features..., target) to fit real data instead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swarm_evo::prelude::*;

fn synthetic_dataset(rng: &mut StdRng) -> Result<Dataset, DatasetError> {
    // price = 3*age_factor + 2*mileage_factor - 1, plus a little noise
    let mut features = Vec::new();
    let mut targets = Vec::new();
    for _ in 0..100 {
        let x0: f64 = rng.gen_range(0.0..1.0);
        let x1: f64 = rng.gen_range(0.0..1.0);
        let noise: f64 = rng.gen_range(-0.05..0.05);
        features.push(vec![x0, x1]);
        targets.push(3.0 * x0 + 2.0 * x1 - 1.0 + noise);
    }
    Dataset::new(features, targets)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Neural Regression Fit ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let dataset = match std::env::args().nth(1) {
        Some(path) => Dataset::from_csv(path)?,
        None => synthetic_dataset(&mut rng)?,
    };
    let network = RegressionNetwork::new(dataset);

    println!("Rows:       {}", network.dataset().len());
    println!("Inputs:     {}", network.dataset().n_inputs());
    println!("Parameters: {}\n", network.dimensions());

    let mut base = BasePso::new(&network);
    base.set_run_time(300)?;
    let base_outcome = base.solve(&mut rng)?;
    println!("{}\n", base_outcome.summary());

    let mut hybrid = HybridPso::hybrid(&network);
    hybrid.set_run_time(300)?;
    let hybrid_outcome = hybrid.solve(&mut rng)?;
    println!("{}\n", hybrid_outcome.summary());

    println!("First predictions (hybrid):");
    for (input, target) in network.dataset().rows().take(5) {
        let prediction = RegressionNetwork::predict(input, &hybrid_outcome.best_solution);
        println!("  target {:>8.4}  predicted {:>8.4}", target, prediction);
    }

    Ok(())
}
