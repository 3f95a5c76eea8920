//! RangeSumService: range-sum queries served through the LRU cache

use tracing::{debug, trace};

use crate::engine::{check_index, check_range, range_sum, RangeSumEngine};
use crate::error::Result;
use crate::invalidation;
use crate::key::RangeKey;
use crate::stats::{CacheStats, Counter};
use crate::store::CacheStore;

/// Mutable integer array with cached range sums
///
/// Every cached sum is keyed by its exact `(left, right)` pair. An update
/// writes the array first, then drops each cached range that covers the
/// updated index.
pub struct RangeSumService {
    /// Array under query
    array: Vec<i64>,

    /// Cached sums
    cache: CacheStore<RangeKey, i64>,

    /// Cache statistics
    stats: CacheStats,
}

impl RangeSumService {
    /// Create a service over `array` caching at most `capacity` sums
    ///
    /// # Arguments
    /// * `array` - Initial array contents
    /// * `capacity` - Maximum number of cached ranges
    ///
    /// # Returns
    /// * `Result<RangeSumService>` - `Error::InvalidCapacity` if `capacity` is zero
    pub fn new(array: Vec<i64>, capacity: usize) -> Result<Self> {
        let cache = CacheStore::new(capacity)?;
        debug!(len = array.len(), capacity, "range-sum service created");

        Ok(Self {
            array,
            cache,
            stats: CacheStats::new(),
        })
    }

    /// Sum of `array[left..=right]`, from cache when possible
    ///
    /// # Arguments
    /// * `left` - First index
    /// * `right` - Last index (inclusive)
    ///
    /// # Returns
    /// * `Result<i64>` - `Error::InvalidRange` unless `left <= right < len`;
    ///   `Error::SumOverflow` if the sum does not fit in an `i64`, in which
    ///   case nothing is cached
    pub fn query_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        check_range(left, right, self.array.len())?;
        let key = RangeKey::new(left, right);

        if let Some(&sum) = self.cache.get(&key) {
            self.stats.record(Counter::Hit, 1);
            return Ok(sum);
        }

        let sum = range_sum(&self.array, left, right)?;
        self.stats.record(Counter::Miss, 1);
        trace!(range = %key, span = key.span(), "range summed");

        if let Some((evicted, _)) = self.cache.put(key, sum) {
            trace!(%evicted, "range evicted");
            self.stats.record(Counter::Eviction, 1);
        }

        Ok(sum)
    }

    /// Overwrite `array[index]` and invalidate every cached range covering it
    ///
    /// # Arguments
    /// * `index` - Position to overwrite
    /// * `value` - New value
    ///
    /// # Returns
    /// * `Result<()>` - `Error::IndexOutOfRange` if `index >= len`; the array
    ///   is left untouched on error
    pub fn apply_update(&mut self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.array.len())?;

        self.array[index] = value;
        let removed = invalidation::invalidate(&mut self.cache, index);
        self.stats.record(Counter::Invalidation, removed as u64);

        Ok(())
    }

    /// Whether the sum for exactly `[left, right]` is cached
    pub fn is_cached(&self, left: usize, right: usize) -> bool {
        self.cache.contains(&RangeKey::new(left, right))
    }

    /// Cached ranges from most to least recently used
    pub fn cached_ranges(&self) -> Vec<RangeKey> {
        self.cache.keys().copied().collect()
    }

    /// Current array contents
    pub fn array(&self) -> &[i64] {
        &self.array
    }

    /// Get the array length
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Get current cache size
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clear the cache (array remains unchanged)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.stats.reset();
    }
}

impl RangeSumEngine for RangeSumService {
    fn query_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        RangeSumService::query_sum(self, left, right)
    }

    fn apply_update(&mut self, index: usize, value: i64) -> Result<()> {
        RangeSumService::apply_update(self, index, value)
    }
}
