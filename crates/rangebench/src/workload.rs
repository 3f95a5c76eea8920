//! Synthetic workload: mostly hot-range reads, some random reads, rare updates

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rangecache::Operation;

/// Smallest and largest value written into the array
const VALUE_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

/// Workload shape
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Array length
    pub array_len: usize,
    /// Number of operations
    pub queries: usize,
    /// Number of distinct hot ranges
    pub hot_pool: usize,
    /// Probability that a read targets a hot range
    pub p_hot: f64,
    /// Probability that an operation is an update
    pub p_update: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            seed: 0,
        }
    }
}

impl WorkloadConfig {
    /// Reject shapes the generator cannot produce
    pub fn validate(&self) -> Result<()> {
        ensure!(self.array_len >= 1, "array length must be at least 1");
        ensure!(self.hot_pool >= 1, "hot pool must hold at least 1 range");
        ensure!(
            (0.0..=1.0).contains(&self.p_hot),
            "p_hot must be within [0, 1], got {}",
            self.p_hot
        );
        ensure!(
            (0.0..=1.0).contains(&self.p_update),
            "p_update must be within [0, 1], got {}",
            self.p_update
        );
        Ok(())
    }
}

/// Initial array plus the operations to run against it
#[derive(Debug, Clone)]
pub struct Workload {
    /// Initial array
    pub array: Vec<i64>,
    /// Operation sequence
    pub ops: Vec<Operation>,
}

/// Build a workload; the same config always yields the same workload
pub fn generate(config: &WorkloadConfig) -> Result<Workload> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.array_len;

    let array: Vec<i64> = (0..n).map(|_| rng.random_range(VALUE_RANGE)).collect();

    let hot: Vec<(usize, usize)> = (0..config.hot_pool)
        .map(|_| (rng.random_range(0..=n / 2), rng.random_range(n / 2..n)))
        .collect();

    let mut ops = Vec::with_capacity(config.queries);
    for _ in 0..config.queries {
        let op = if rng.random_bool(config.p_update) {
            Operation::Update {
                index: rng.random_range(0..n),
                value: rng.random_range(VALUE_RANGE),
            }
        } else if rng.random_bool(config.p_hot) {
            let (left, right) = hot[rng.random_range(0..hot.len())];
            Operation::Range { left, right }
        } else {
            let left = rng.random_range(0..n);
            let right = rng.random_range(left..n);
            Operation::Range { left, right }
        };
        ops.push(op);
    }

    Ok(Workload { array, ops })
}
