//! Invalidation of cached sums after a point update
//!
//! A cached `[left, right]` is dropped iff `left <= index <= right`.
//! There is no interval index; every live key is inspected, so a sweep
//! costs O(cached entries).

use tracing::debug;

use crate::key::RangeKey;
use crate::store::CacheStore;

/// Whether an update at `index` makes the sum cached under `key` stale
pub fn covers(key: &RangeKey, index: usize) -> bool {
    key.contains(index)
}

/// Drop every cached sum whose range contains `index`
///
/// Returns the number of entries removed. Entries outside the range keep
/// their value and relative recency.
pub fn invalidate<V>(store: &mut CacheStore<RangeKey, V>, index: usize) -> usize {
    let removed = store.remove_matching(|key| covers(key, index));
    if removed > 0 {
        debug!(index, removed, remaining = store.len(), "invalidated cached ranges");
    }
    removed
}
