//! Timing harness: cached vs uncached execution of one workload

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use rangecache::{NaiveRangeSum, Operation, RangeSumEngine, RangeSumService};
use serde::Serialize;
use tracing::info;

/// Result of running one engine over a workload
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Wall time for the whole sequence
    pub elapsed: Duration,
    /// Wrapping sum of every range result, for cross-checking engines
    pub checksum: i64,
    /// Range queries executed
    pub ranges: usize,
    /// Updates executed
    pub updates: usize,
}

/// Drive `engine` through `ops` in order
pub fn run<E>(engine: &mut E, ops: &[Operation]) -> rangecache::Result<RunOutcome>
where
    E: RangeSumEngine + ?Sized,
{
    let mut checksum = 0i64;
    let mut ranges = 0;
    let mut updates = 0;

    let start = Instant::now();
    for op in ops {
        match op.apply(engine)? {
            Some(sum) => {
                checksum = checksum.wrapping_add(sum);
                ranges += 1;
            }
            None => updates += 1,
        }
    }
    let elapsed = start.elapsed();

    Ok(RunOutcome {
        elapsed,
        checksum,
        ranges,
        updates,
    })
}

/// Side-by-side timing of both engines
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Array length
    pub array_len: usize,
    /// Range queries in the workload
    pub ranges: usize,
    /// Updates in the workload
    pub updates: usize,
    /// Cache capacity used for the cached run
    pub capacity: usize,
    /// Uncached run time in seconds
    pub uncached_secs: f64,
    /// Cached run time in seconds
    pub cached_secs: f64,
    /// `uncached_secs / cached_secs`, infinite if the cached run took no time
    pub speedup: f64,
    /// Cache hits
    pub hits: u64,
    /// Cache misses
    pub misses: u64,
    /// Entries evicted for capacity
    pub evictions: u64,
    /// Entries removed by updates
    pub invalidations: u64,
    /// Hits over lookups
    pub hit_ratio: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No cache : {:6.2} s", self.uncached_secs)?;
        writeln!(
            f,
            "LRU cache: {:6.2} s  (speedup x{:.2})",
            self.cached_secs, self.speedup
        )?;
        write!(
            f,
            "Cache    : {} hits, {} misses ({:.1}% hit rate), {} evictions, {} invalidations",
            self.hits,
            self.misses,
            self.hit_ratio * 100.0,
            self.evictions,
            self.invalidations
        )
    }
}

/// Run `ops` uncached and cached on identical copies of `array`
///
/// Fails if the two runs disagree on any result or on the final array.
pub fn compare(array: &[i64], ops: &[Operation], capacity: usize) -> Result<Report> {
    let mut naive = NaiveRangeSum::new(array.to_vec());
    let uncached = run(&mut naive, ops).context("uncached run failed")?;
    info!(elapsed = ?uncached.elapsed, "uncached run finished");

    let mut service =
        RangeSumService::new(array.to_vec(), capacity).context("invalid cache configuration")?;
    let cached = run(&mut service, ops).context("cached run failed")?;
    info!(elapsed = ?cached.elapsed, cache_len = service.cache_len(), "cached run finished");

    if cached.checksum != uncached.checksum {
        bail!(
            "cached checksum {} differs from uncached {}",
            cached.checksum,
            uncached.checksum
        );
    }
    if service.array() != naive.array() {
        bail!("cached and uncached runs left different arrays");
    }

    let uncached_secs = uncached.elapsed.as_secs_f64();
    let cached_secs = cached.elapsed.as_secs_f64();
    let speedup = if cached_secs > 0.0 {
        uncached_secs / cached_secs
    } else {
        f64::INFINITY
    };

    let stats = service.stats().snapshot();
    Ok(Report {
        array_len: array.len(),
        ranges: cached.ranges,
        updates: cached.updates,
        capacity,
        uncached_secs,
        cached_secs,
        speedup,
        hits: stats.hits,
        misses: stats.misses,
        evictions: stats.evictions,
        invalidations: stats.invalidations,
        hit_ratio: stats.hit_ratio(),
    })
}
