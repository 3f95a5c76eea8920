//! Fixed-capacity LRU store
//!
//! The recency list owns every entry; the hash index only maps keys to
//! list handles. Both are mutated together so that
//! `index.len() == list.len() <= capacity` holds after every call.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::trace;

use crate::error::{Error, Result};
use crate::recency::{Handle, RecencyList};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache with fixed capacity
pub struct CacheStore<K, V> {
    index: HashMap<K, Handle, RandomState>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new store holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        })
    }

    /// Get a value, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.list.move_to_front(handle);
        Some(&self.list.get(handle).value)
    }

    /// Get a value without changing recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        Some(&self.list.get(handle).value)
    }

    /// Check if a key is cached, without changing recency
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or refresh a key-value pair
    ///
    /// Refreshing an existing key never evicts. Inserting a new key into a
    /// full store evicts the least recently used entry first, which is
    /// returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&handle) = self.index.get(&key) {
            self.list.get_mut(handle).value = value;
            self.list.move_to_front(handle);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let handle = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, handle);
        self.debug_check();

        evicted
    }

    /// Remove a key from the store
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.remove(key)?;
        let entry = self.list.remove(handle);
        self.debug_check();
        Some(entry.value)
    }

    /// Remove every entry whose key satisfies `predicate`
    ///
    /// Matches are collected before anything is removed, so the predicate
    /// sees the store as it was on entry. Returns the number removed.
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let doomed: Vec<K> = self
            .index
            .keys()
            .filter(|key| predicate(*key))
            .cloned()
            .collect();

        for key in &doomed {
            if let Some(handle) = self.index.remove(key) {
                self.list.remove(handle);
            }
        }
        self.debug_check();

        doomed.len()
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        trace!(len = self.list.len(), "evicted least recently used entry");
        Some((entry.key, entry.value))
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.list.len(),
            "cache index and recency list out of sync"
        );
        debug_assert!(self.index.len() <= self.capacity);
    }
}
