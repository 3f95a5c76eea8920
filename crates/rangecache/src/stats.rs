//! Counters for range-sum cache behaviour
//!
//! Each lookup is either a hit or a miss; every miss inserts exactly one
//! entry, so no separate insert counter is kept.

use std::sync::atomic::{AtomicU64, Ordering};

/// What a counter tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Query answered from the cache
    Hit,
    /// Query summed from the array and cached
    Miss,
    /// Entry dropped to make room for a new range
    Eviction,
    /// Entry dropped because an update touched its range
    Invalidation,
}

impl Counter {
    const ALL: [Counter; 4] = [
        Counter::Hit,
        Counter::Miss,
        Counter::Eviction,
        Counter::Invalidation,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Queries answered from the cache
    pub hits: u64,
    /// Queries summed from the array
    pub misses: u64,
    /// Entries evicted for capacity
    pub evictions: u64,
    /// Entries removed by updates
    pub invalidations: u64,
}

impl StatsSnapshot {
    /// Hits over lookups, 0.0 before the first lookup
    pub fn hit_ratio(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}

/// Shared counters, updatable through `&self`
#[derive(Debug, Default)]
pub struct CacheStats {
    counters: [AtomicU64; Counter::ALL.len()],
}

impl CacheStats {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to a counter
    pub fn record(&self, counter: Counter, n: u64) {
        self.counters[counter.slot()].fetch_add(n, Ordering::Relaxed);
    }

    /// Current value of one counter
    pub fn count(&self, counter: Counter) -> u64 {
        self.counters[counter.slot()].load(Ordering::Relaxed)
    }

    /// Copy every counter at once
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.count(Counter::Hit),
            misses: self.count(Counter::Miss),
            evictions: self.count(Counter::Eviction),
            invalidations: self.count(Counter::Invalidation),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_independent() {
        let stats = CacheStats::new();

        stats.record(Counter::Hit, 1);
        stats.record(Counter::Invalidation, 4);
        stats.record(Counter::Invalidation, 2);

        assert_eq!(stats.count(Counter::Hit), 1);
        assert_eq!(stats.count(Counter::Miss), 0);
        assert_eq!(stats.count(Counter::Invalidation), 6);
    }

    #[test]
    fn test_snapshot_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.snapshot().hit_ratio(), 0.0);

        stats.record(Counter::Hit, 3);
        stats.record(Counter::Miss, 1);

        let snap = stats.snapshot();
        assert_eq!(snap.hits, 3);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.hit_ratio(), 0.75);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let stats = CacheStats::new();
        for counter in Counter::ALL {
            stats.record(counter, 5);
        }

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
