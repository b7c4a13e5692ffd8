//! Random weight table generator
//!
//! Usage:
//!   cargo run --bin generate_weights -- 128 0.1
//!   cargo run --bin generate_weights -- 128 0.1 --seed 42
//!
//! Writes `randWeights_<dim>_<max>.txt` with one weight in `[-max, max)` per line.

use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

use heatmap_viz::WeightTable;
use heatmap_viz::cli::init_logging;

#[derive(Parser, Debug)]
#[command(name = "generate_weights", about = "Write a table of uniform random weights")]
struct Args {
    /// Number of weights (cluster labels)
    dim: usize,
    /// Weights are drawn from [-max, max)
    max: f64,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    if args.dim == 0 {
        bail!("weight dimensionality must be positive");
    }
    if !(args.max.is_finite() && args.max > 0.0) {
        bail!("max weight must be a positive number, got {}", args.max);
    }

    info!(
        "Generating random weights of dim {} and max {}",
        args.dim, args.max
    );
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let table = WeightTable::random(args.dim, args.max, &mut rng);

    let path = PathBuf::from(format!("randWeights_{}_{}.txt", args.dim, args.max));
    table.write_to_file(&path)?;
    println!("Storing in file {}", path.display());
    Ok(())
}
