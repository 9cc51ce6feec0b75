use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rubra_tree::RBTreeMap;
use rubra_tree::rbtree_map::Entry;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates keys in a range narrow enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    GetMut(i64, i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        2 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::GetMut(k, v)),
        1 => Just(MapOp::First),
        1 => Just(MapOp::Last),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and BTreeMap
    /// and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(rb_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetMut(k, v) => {
                    let rb_slot = rb_map.get_mut(k);
                    let bt_slot = bt_map.get_mut(k);
                    prop_assert_eq!(rb_slot.is_some(), bt_slot.is_some(), "get_mut({})", k);
                    if let (Some(rb_value), Some(bt_value)) = (rb_slot, bt_slot) {
                        *rb_value = *v;
                        *bt_value = *v;
                    }
                }
                MapOp::First => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value(), "first_key_value()");
                }
                MapOp::Last => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value(), "last_key_value()");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first(), "pop_first()");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }

        // Final sweep: the full in-order sequences agree.
        prop_assert!(rb_map.iter().eq(bt_map.iter()), "final iter() mismatch");
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(pairs in proptest::collection::vec((key_strategy(), any::<i64>()), TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = pairs.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = pairs.iter().copied().collect();

        // Forward iteration
        prop_assert!(rb_map.iter().eq(bt_map.iter()), "iter() mismatch");

        // Reverse iteration
        prop_assert!(rb_map.iter().rev().eq(bt_map.iter().rev()), "iter().rev() mismatch");

        // Keys and values projections
        prop_assert!(rb_map.keys().eq(bt_map.keys()), "keys() mismatch");
        prop_assert!(rb_map.values().eq(bt_map.values()), "values() mismatch");

        // Owning iteration
        let rb_pairs: Vec<_> = rb_map.into_iter().collect();
        let bt_pairs: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(rb_pairs, bt_pairs, "into_iter() mismatch");
    }

    /// Tests ExactSizeIterator and DoubleEndedIterator behavior.
    #[test]
    fn iter_size_and_double_ended(pairs in proptest::collection::vec((key_strategy(), any::<i64>()), 1..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = pairs.iter().copied().collect();

        let iter = rb_map.iter();
        prop_assert_eq!(iter.len(), rb_map.len(), "ExactSizeIterator len mismatch");

        // Alternating front/back consumes every element exactly once.
        let mut from_front = Vec::new();
        let mut from_back = Vec::new();
        let mut iter = rb_map.iter();
        let mut toggle = true;
        loop {
            if toggle {
                if let Some(item) = iter.next() {
                    from_front.push(item);
                } else {
                    break;
                }
            } else if let Some(item) = iter.next_back() {
                from_back.push(item);
            } else {
                break;
            }
            toggle = !toggle;
        }
        prop_assert_eq!(from_front.len() + from_back.len(), rb_map.len());

        from_back.reverse();
        from_front.extend(from_back);
        prop_assert!(from_front.into_iter().eq(rb_map.iter()), "interleaved traversal mismatch");
    }

    /// Tests range queries match BTreeMap.
    #[test]
    fn range_matches_btreemap(
        pairs in proptest::collection::vec((key_strategy(), any::<i64>()), TEST_SIZE),
        bounds in proptest::collection::vec((key_strategy(), key_strategy()), 32),
    ) {
        let rb_map: RBTreeMap<i64, i64> = pairs.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = pairs.iter().copied().collect();

        for (a, b) in bounds {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(rb_map.range(lo..hi).eq(bt_map.range(lo..hi)), "range({}..{})", lo, hi);
            prop_assert!(rb_map.range(lo..=hi).eq(bt_map.range(lo..=hi)), "range({}..={})", lo, hi);
            prop_assert!(rb_map.range(lo..).eq(bt_map.range(lo..)), "range({}..)", lo);
            prop_assert!(rb_map.range(..hi).eq(bt_map.range(..hi)), "range(..{})", hi);
            prop_assert!(rb_map.range(..).eq(bt_map.range(..)), "range(..)");

            // Backwards over the same range.
            prop_assert!(
                rb_map.range(lo..=hi).rev().eq(bt_map.range(lo..=hi).rev()),
                "range({}..={}).rev()", lo, hi
            );
        }
    }

    /// Tests the entry API against direct mutation of a model BTreeMap.
    #[test]
    fn entry_api_matches_model(ops in proptest::collection::vec((key_strategy(), any::<i64>()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for (k, v) in ops {
            match rb_map.entry(k) {
                Entry::Occupied(mut o) => {
                    prop_assert!(bt_map.contains_key(&k), "occupied for missing key {}", k);
                    *o.get_mut() += v;
                    *bt_map.get_mut(&k).unwrap() += v;
                }
                Entry::Vacant(vacant) => {
                    prop_assert!(!bt_map.contains_key(&k), "vacant for present key {}", k);
                    vacant.insert(v);
                    bt_map.insert(k, v);
                }
            }
        }

        prop_assert!(rb_map.iter().eq(bt_map.iter()), "final iter() mismatch");
    }

    /// Tests append, split_off, and retain against BTreeMap.
    #[test]
    fn bulk_ops_match_btreemap(
        left in proptest::collection::vec((key_strategy(), any::<i64>()), 0..500),
        right in proptest::collection::vec((key_strategy(), any::<i64>()), 0..500),
        pivot in key_strategy(),
    ) {
        let mut rb_a: RBTreeMap<i64, i64> = left.iter().copied().collect();
        let mut rb_b: RBTreeMap<i64, i64> = right.iter().copied().collect();
        let mut bt_a: BTreeMap<i64, i64> = left.iter().copied().collect();
        let mut bt_b: BTreeMap<i64, i64> = right.iter().copied().collect();

        rb_a.append(&mut rb_b);
        bt_a.append(&mut bt_b);
        prop_assert!(rb_b.is_empty());
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "append mismatch");

        let rb_high = rb_a.split_off(&pivot);
        let bt_high = bt_a.split_off(&pivot);
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "split_off left mismatch");
        prop_assert!(rb_high.iter().eq(bt_high.iter()), "split_off right mismatch");

        rb_a.retain(|k, _| k % 3 == 0);
        bt_a.retain(|k, _| k % 3 == 0);
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "retain mismatch");
    }

    /// Clone produces an equal, independent map.
    #[test]
    fn clone_is_deep(pairs in proptest::collection::vec((key_strategy(), any::<i64>()), 0..500)) {
        let original: RBTreeMap<i64, i64> = pairs.iter().copied().collect();
        let mut copy = original.clone();

        prop_assert_eq!(&original, &copy);

        copy.insert(9_999, 0);
        prop_assert!(!original.contains_key(&9_999), "clone shares storage with the original");
    }

    /// iter_mut writes are visible through subsequent reads.
    #[test]
    fn iter_mut_updates_all_values(pairs in proptest::collection::vec((key_strategy(), -1_000i64..1_000), 0..500)) {
        let mut rb_map: RBTreeMap<i64, i64> = pairs.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = pairs.iter().copied().collect();

        for (k, v) in rb_map.iter_mut() {
            *v = k.wrapping_mul(2).wrapping_add(*v);
        }
        for (k, v) in bt_map.iter_mut() {
            *v = k.wrapping_mul(2).wrapping_add(*v);
        }

        prop_assert!(rb_map.iter().eq(bt_map.iter()), "iter_mut() result mismatch");
    }
}

// ─── Unit tests for fixed scenarios ──────────────────────────────────────────

#[test]
fn build_erase_find_scenario() {
    let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);

    assert_eq!(map.remove(&1), Some("a"));

    let remaining: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(remaining, [(2, "b")]);
    assert_eq!(map.get(&1), None);
}

#[test]
fn insert_reports_replaced_value() {
    let mut map = RBTreeMap::new();
    assert_eq!(map.insert(37, "a"), None);
    assert_eq!(map.insert(37, "b"), Some("a"));
    assert_eq!(map.len(), 1);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_panics_on_missing_key() {
    let map = RBTreeMap::from([(1, "a")]);
    assert_eq!(map[&1], "a");
    let _ = map[&2];
}

#[test]
fn entry_or_default_inserts_missing_key() {
    let mut map: RBTreeMap<&str, u32> = RBTreeMap::new();
    *map.entry("counter").or_default() += 1;
    *map.entry("counter").or_default() += 1;
    assert_eq!(map["counter"], 2);
}

#[test]
fn first_and_last_entry_views() {
    let mut map = RBTreeMap::from([(2, "b"), (1, "a"), (3, "c")]);

    let first = map.first_entry().unwrap();
    assert_eq!(*first.key(), 1);
    assert_eq!(first.remove(), "a");

    let last = map.last_entry().unwrap();
    assert_eq!(*last.key(), 3);
    assert_eq!(last.remove(), "c");

    assert_eq!(map.len(), 1);
    assert_eq!(map.first_key_value(), Some((&2, &"b")));
}

#[test]
fn empty_map_accessors_return_none() {
    let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.last_key_value(), None);
    assert_eq!(map.pop_first(), None);
    assert_eq!(map.pop_last(), None);
    assert_eq!(map.get(&1), None);
    assert!(map.first_entry().is_none());
    assert!(map.last_entry().is_none());
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.range(..).next(), None);
}

#[test]
fn equality_is_element_wise() {
    let a = RBTreeMap::from([(1, "a"), (2, "b")]);
    let mut b = RBTreeMap::new();
    // Insertion order does not affect equality.
    b.insert(2, "b");
    b.insert(1, "a");
    assert_eq!(a, b);

    b.insert(3, "c");
    assert_ne!(a, b);
}

#[test]
#[should_panic(expected = "range start is greater than range end")]
fn backwards_range_panics() {
    let map = RBTreeMap::from([(1, "a")]);
    let _ = map.range(5..1);
}
