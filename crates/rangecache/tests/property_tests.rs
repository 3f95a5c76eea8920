//! Property-based tests for the range-sum cache
//!
//! - Cached service and uncached reference agree on every result and on
//!   the final array
//! - CacheStore matches a simple vector model of LRU order
//! - Invalidation removes exactly the covering ranges

use proptest::prelude::*;
use rangecache::{
    invalidation, CacheStore, NaiveRangeSum, Operation, RangeKey, RangeSumEngine,
    RangeSumService,
};

// ============================================================================
// STRATEGIES
// ============================================================================

fn arb_operation(len: usize) -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (0..len, 0..len).prop_map(|(a, b)| Operation::Range {
            left: a.min(b),
            right: a.max(b),
        }),
        1 => (0..len, -100i64..100).prop_map(|(index, value)| Operation::Update { index, value }),
    ]
}

fn arb_workload() -> impl Strategy<Value = (Vec<i64>, usize, Vec<Operation>)> {
    (1usize..40, 1usize..8).prop_flat_map(|(len, capacity)| {
        (
            prop::collection::vec(-100i64..100, len),
            Just(capacity),
            prop::collection::vec(arb_operation(len), 0..200),
        )
    })
}

/// Store operation against small integer keys
#[derive(Debug, Clone)]
enum StoreOp {
    Get(u8),
    Put(u8, i32),
    Remove(u8),
}

fn arb_store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (0u8..12).prop_map(StoreOp::Get),
        (0u8..12, any::<i32>()).prop_map(|(k, v)| StoreOp::Put(k, v)),
        (0u8..12).prop_map(StoreOp::Remove),
    ]
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn cached_matches_reference((array, capacity, ops) in arb_workload()) {
        let mut reference = NaiveRangeSum::new(array.clone());
        let mut cached = RangeSumService::new(array, capacity).unwrap();

        for op in &ops {
            let expected = op.apply(&mut reference).unwrap();
            let actual = op.apply(&mut cached).unwrap();
            prop_assert_eq!(actual, expected, "diverged on {:?}", op);
            prop_assert!(cached.cache_len() <= capacity);
        }

        prop_assert_eq!(cached.array(), reference.array());
    }

    #[test]
    fn store_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(arb_store_op(), 0..300),
    ) {
        let mut store = CacheStore::new(capacity).unwrap();
        // Most recent first
        let mut model: Vec<(u8, i32)> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Get(k) => {
                    let expected = model.iter().position(|&(key, _)| key == k).map(|pos| {
                        let entry = model.remove(pos);
                        model.insert(0, entry);
                        entry.1
                    });
                    prop_assert_eq!(store.get(&k).copied(), expected);
                }
                StoreOp::Put(k, v) => {
                    let mut expected_evicted = None;
                    if let Some(pos) = model.iter().position(|&(key, _)| key == k) {
                        model.remove(pos);
                    } else if model.len() >= capacity {
                        expected_evicted = model.pop();
                    }
                    model.insert(0, (k, v));
                    prop_assert_eq!(store.put(k, v), expected_evicted);
                }
                StoreOp::Remove(k) => {
                    let expected = model
                        .iter()
                        .position(|&(key, _)| key == k)
                        .map(|pos| model.remove(pos).1);
                    prop_assert_eq!(store.remove(&k), expected);
                }
            }

            let keys: Vec<u8> = store.keys().copied().collect();
            let model_keys: Vec<u8> = model.iter().map(|&(key, _)| key).collect();
            prop_assert_eq!(keys, model_keys);
            prop_assert!(store.len() <= capacity);
        }
    }

    #[test]
    fn invalidation_removes_exactly_covering(
        ranges in prop::collection::vec((0usize..30, 0usize..30), 1..20),
        index in 0usize..30,
    ) {
        let mut store = CacheStore::new(ranges.len()).unwrap();
        for &(a, b) in &ranges {
            store.put(RangeKey::new(a.min(b), a.max(b)), (a + b) as i64);
        }

        let before: Vec<RangeKey> = store.keys().copied().collect();
        let expected_survivors: Vec<RangeKey> = before
            .iter()
            .copied()
            .filter(|key| !(key.left <= index && index <= key.right))
            .collect();

        let removed = invalidation::invalidate(&mut store, index);

        let after: Vec<RangeKey> = store.keys().copied().collect();
        prop_assert_eq!(removed, before.len() - expected_survivors.len());
        prop_assert_eq!(after, expected_survivors);
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn lru_evicts_first_inserted() {
    let capacity = 4;
    let mut store = CacheStore::new(capacity).unwrap();

    for k in 0..capacity {
        assert_eq!(store.put(k, k * 10), None);
    }
    assert_eq!(store.put(capacity, 0), Some((0, 0)));
}

#[test]
fn get_refreshes_recency_before_eviction() {
    let capacity = 4;
    let mut store = CacheStore::new(capacity).unwrap();

    for k in 0..capacity {
        store.put(k, k);
    }
    assert_eq!(store.get(&0), Some(&0));
    assert_eq!(store.put(capacity, 0), Some((1, 1)));
    assert!(store.contains(&0));
}

#[test]
fn capacity_two_walkthrough() {
    let mut store = CacheStore::new(2).unwrap();

    store.put(RangeKey::new(0, 5), 10i64);
    store.put(RangeKey::new(2, 8), 20);
    let order: Vec<RangeKey> = store.keys().copied().collect();
    assert_eq!(order, vec![RangeKey::new(2, 8), RangeKey::new(0, 5)]);

    assert_eq!(store.get(&RangeKey::new(0, 5)), Some(&10));
    let order: Vec<RangeKey> = store.keys().copied().collect();
    assert_eq!(order, vec![RangeKey::new(0, 5), RangeKey::new(2, 8)]);

    let evicted = store.put(RangeKey::new(3, 9), 30);
    assert_eq!(evicted, Some((RangeKey::new(2, 8), 20)));
    assert_eq!(store.peek(&RangeKey::new(0, 5)), Some(&10));
    assert_eq!(store.peek(&RangeKey::new(3, 9)), Some(&30));

    assert_eq!(invalidation::invalidate(&mut store, 4), 2);
    assert!(store.is_empty());
}

#[test]
fn engines_interchangeable_through_trait() {
    let ops = [
        Operation::Range { left: 0, right: 3 },
        Operation::Update { index: 2, value: 7 },
        Operation::Range { left: 0, right: 3 },
        Operation::Range { left: 3, right: 3 },
    ];

    let mut engines: Vec<Box<dyn RangeSumEngine>> = vec![
        Box::new(NaiveRangeSum::new(vec![1, 2, 3, 4])),
        Box::new(RangeSumService::new(vec![1, 2, 3, 4], 2).unwrap()),
    ];

    for engine in engines.iter_mut() {
        let results: Vec<Option<i64>> = ops
            .iter()
            .map(|op| op.apply(engine.as_mut()).unwrap())
            .collect();
        assert_eq!(results, vec![Some(10), None, Some(14), Some(4)]);
    }
}
