//! Command-line driver: runs the baseline and/or hybrid optimizer on a
//! regression dataset or a benchmark function and prints each history.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use swarm_evo::prelude::*;

/// Optimizer variants selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    /// Plain particle swarm optimization
    Base,
    /// PSO with a genetic step after every iteration
    Hybrid,
    /// Base, then hybrid
    Both,
}

/// Particle swarm optimization with an optional genetic evolution step.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Header-less CSV dataset (features..., target) to fit a regression network to.
    /// When absent, a benchmark function is minimized instead.
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Benchmark function to minimize (sphere, rastrigin, rosenbrock, ackley).
    #[arg(short, long, default_value = "sphere")]
    benchmark: String,

    /// Number of dimensions for the benchmark function.
    #[arg(short = 'n', long, default_value_t = 10)]
    dimensions: usize,

    /// Which optimizer to run.
    #[arg(long, value_enum, default_value_t = Variant::Both)]
    variant: Variant,

    /// JSON file with `swarm` and `evolution` settings, applied before other flags.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Iterations per run.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Social coefficient (>= 0).
    #[arg(long)]
    social: Option<f64>,

    /// Cognitive coefficient (>= 0).
    #[arg(long)]
    cognitive: Option<f64>,

    /// Probability of crossing a mating pair (hybrid only).
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Probability of mutating an uncrossed pair (hybrid only).
    #[arg(long)]
    mutate_rate: Option<f64>,

    /// Tournament size (hybrid only).
    #[arg(long)]
    tournament_size: Option<usize>,

    /// Mating pool size as a multiple of the swarm size (hybrid only).
    #[arg(long)]
    mating_pool_scale: Option<usize>,

    /// Seed for the random number generator; random when absent.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Load the config file, if any, and apply flag overrides through the validated setters
    fn optimizer_config(&self) -> SwarmResult<OptimizerConfig> {
        let mut config = match &self.config {
            Some(path) => OptimizerConfig::from_json_file(path)?,
            None => OptimizerConfig::default(),
        };

        if let Some(iterations) = self.iterations {
            config.swarm.set_run_time(iterations)?;
        }
        if let Some(social) = self.social {
            config.swarm.set_social_coeff(social)?;
        }
        if let Some(cognitive) = self.cognitive {
            config.swarm.set_cognitive_coeff(cognitive)?;
        }
        if let Some(rate) = self.crossover_rate {
            config.evolution.set_crossover_rate(rate)?;
        }
        if let Some(rate) = self.mutate_rate {
            config.evolution.set_mutate_rate(rate)?;
        }
        if let Some(k) = self.tournament_size {
            config.evolution.set_tournament_size(k)?;
        }
        if let Some(scale) = self.mating_pool_scale {
            config.evolution.set_mating_pool_scale(scale)?;
        }
        Ok(config)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_variant<O, E>(
    label: &str,
    objective: O,
    config: &OptimizerConfig,
    evolution: E,
    rng: &mut StdRng,
) -> SwarmResult<()>
where
    O: Objective,
    E: EvolutionStep,
{
    let mut pso = ParticleSwarmOptimizer::with_config(objective, config.swarm.clone(), evolution)?;
    println!("Running {}:", label);
    let outcome = pso.solve(rng)?;
    print!("{}", pso);
    println!("Best fitness: {}", outcome.best_fitness);
    info!("{}", outcome.summary());
    Ok(())
}

fn run_all<O: Objective>(
    objective: &O,
    variant: Variant,
    config: &OptimizerConfig,
    rng: &mut StdRng,
) -> SwarmResult<()> {
    if matches!(variant, Variant::Base | Variant::Both) {
        run_variant("BasePSO", objective, config, NoEvolution, rng)?;
    }
    if matches!(variant, Variant::Hybrid | Variant::Both) {
        let evolution = GeneticEvolution::new(config.evolution.clone())?;
        run_variant("HybridPSO", objective, config, evolution, rng)?;
    }
    Ok(())
}

fn run(args: &Args) -> SwarmResult<()> {
    let config = args.optimizer_config()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match &args.dataset {
        Some(path) => {
            let network = RegressionNetwork::from_csv(path)?;
            info!(
                path = %path.display(),
                rows = network.dataset().len(),
                inputs = network.dataset().n_inputs(),
                parameters = network.dimensions(),
                "loaded dataset"
            );
            run_all(&network, args.variant, &config, &mut rng)
        }
        None => {
            let kind: BenchmarkKind = args.benchmark.parse()?;
            let benchmark = Benchmark::build(kind, args.dimensions)?;
            info!(
                benchmark = benchmark.name(),
                dimensions = args.dimensions,
                "minimizing benchmark"
            );
            run_all(&benchmark, args.variant, &config, &mut rng)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
