//! Thread-safe handle around a single [`RangeSumService`]
//!
//! The cache structures carry no locking of their own; callers on several
//! threads go through one mutex guarding the whole service.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::RangeSumEngine;
use crate::error::Result;
use crate::service::RangeSumService;

/// Cloneable, mutex-guarded range-sum service
#[derive(Clone)]
pub struct SharedRangeSum {
    inner: Arc<Mutex<RangeSumService>>,
}

impl SharedRangeSum {
    /// Create a shared service over `array` caching at most `capacity` sums
    pub fn new(array: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self::from_service(RangeSumService::new(array, capacity)?))
    }

    /// Wrap an existing service
    pub fn from_service(service: RangeSumService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Sum of `array[left..=right]`
    pub fn query_sum(&self, left: usize, right: usize) -> Result<i64> {
        self.inner.lock().query_sum(left, right)
    }

    /// Overwrite `array[index]`, invalidating covering ranges
    pub fn apply_update(&self, index: usize, value: i64) -> Result<()> {
        self.inner.lock().apply_update(index, value)
    }

    /// Get current cache size
    pub fn cache_len(&self) -> usize {
        self.inner.lock().cache_len()
    }

    /// Run `f` with exclusive access to the service
    pub fn with_service<R>(&self, f: impl FnOnce(&mut RangeSumService) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl RangeSumEngine for SharedRangeSum {
    fn query_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        SharedRangeSum::query_sum(self, left, right)
    }

    fn apply_update(&mut self, index: usize, value: i64) -> Result<()> {
        SharedRangeSum::apply_update(self, index, value)
    }
}
