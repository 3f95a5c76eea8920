//! rangebench - cached vs uncached range-sum timing

mod harness;
mod workload;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::workload::WorkloadConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Array length
    #[arg(short = 'n', long, default_value_t = 100_000)]
    array_len: usize,

    /// Number of operations
    #[arg(short, long, default_value_t = 50_000)]
    queries: usize,

    /// Cache capacity (number of ranges)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Number of distinct hot ranges
    #[arg(long, default_value_t = 30)]
    hot_pool: usize,

    /// Probability that a read hits a hot range
    #[arg(long, default_value_t = 0.95)]
    p_hot: f64,

    /// Probability that an operation is an update
    #[arg(long, default_value_t = 0.03)]
    p_update: f64,

    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = WorkloadConfig {
        array_len: args.array_len,
        queries: args.queries,
        hot_pool: args.hot_pool,
        p_hot: args.p_hot,
        p_update: args.p_update,
        seed: args.seed.unwrap_or_else(rand::random),
    };

    info!("rangebench v{}", env!("CARGO_PKG_VERSION"));
    info!(
        array_len = config.array_len,
        queries = config.queries,
        capacity = args.capacity,
        seed = config.seed,
        "generating workload"
    );

    let workload = workload::generate(&config)?;
    let report = harness::compare(&workload.array, &workload.ops, args.capacity)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
