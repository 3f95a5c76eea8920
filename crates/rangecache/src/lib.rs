//! # rangecache
//!
//! Range-sum queries over a mutable integer array, answered through an
//! LRU cache of previously computed sums.
//!
//! ## Architecture
//! - **RecencyList**: slot arena + index links for O(1) recency moves
//! - **CacheStore**: AHash key index over the recency list, fixed capacity
//! - **Invalidation**: a point update drops every cached range covering it
//! - **RangeSumService**: owns the array, serves queries through the cache
//!
//! ## Example
//! ```
//! use rangecache::RangeSumService;
//!
//! let mut service = RangeSumService::new(vec![1, 2, 3, 4], 16).unwrap();
//! assert_eq!(service.query_sum(1, 3).unwrap(), 9);
//! service.apply_update(2, 10).unwrap();
//! assert_eq!(service.query_sum(1, 3).unwrap(), 16);
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
pub mod invalidation;
mod key;
mod recency;
mod service;
mod shared;
mod stats;
mod store;

pub use engine::{NaiveRangeSum, Operation, RangeSumEngine};
pub use error::{Error, Result};
pub use key::RangeKey;
pub use recency::{Handle, RecencyList};
pub use service::RangeSumService;
pub use shared::SharedRangeSum;
pub use stats::{CacheStats, Counter, StatsSnapshot};
pub use store::CacheStore;
