use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rubra_tree::RBTreeSet;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a range narrow enough to force collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of insert/remove/contains operations on both
    /// RBTreeSet and BTreeSet and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(rb_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(rb_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(rb_set.last(), bt_set.last(), "last()");
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first(), "pop_first()");
                }
                SetOp::PopLast => {
                    prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// Tests that iteration order matches BTreeSet after random insertions.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        // Forward iteration
        prop_assert!(rb_set.iter().eq(bt_set.iter()), "iter() mismatch");

        // Reverse iteration
        prop_assert!(rb_set.iter().rev().eq(bt_set.iter().rev()), "iter().rev() mismatch");

        // into_iter
        let rb_into: Vec<_> = rb_set.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_set.clone().into_iter().collect();
        prop_assert_eq!(&rb_into, &bt_into, "into_iter() mismatch");
    }

    /// Tests range queries match BTreeSet.
    #[test]
    fn range_matches_btreeset(
        values in proptest::collection::vec(value_strategy(), TEST_SIZE),
        bounds in proptest::collection::vec((value_strategy(), value_strategy()), 32),
    ) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        for (a, b) in bounds {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(rb_set.range(lo..hi).eq(bt_set.range(lo..hi)), "range({}..{})", lo, hi);
            prop_assert!(rb_set.range(lo..=hi).eq(bt_set.range(lo..=hi)), "range({}..={})", lo, hi);
            prop_assert!(rb_set.range(lo..).eq(bt_set.range(lo..)), "range({}..)", lo);
            prop_assert!(rb_set.range(..hi).eq(bt_set.range(..hi)), "range(..{})", hi);
            prop_assert!(
                rb_set.range(lo..=hi).rev().eq(bt_set.range(lo..=hi).rev()),
                "range({}..={}).rev()", lo, hi
            );
        }
    }

    /// Tests the set algebra iterators against BTreeSet's.
    #[test]
    fn set_algebra_matches_btreeset(
        left in proptest::collection::vec(value_strategy(), 0..500),
        right in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let rb_a: RBTreeSet<i64> = left.iter().copied().collect();
        let rb_b: RBTreeSet<i64> = right.iter().copied().collect();
        let bt_a: BTreeSet<i64> = left.iter().copied().collect();
        let bt_b: BTreeSet<i64> = right.iter().copied().collect();

        prop_assert!(rb_a.difference(&rb_b).eq(bt_a.difference(&bt_b)), "difference mismatch");
        prop_assert!(rb_a.intersection(&rb_b).eq(bt_a.intersection(&bt_b)), "intersection mismatch");
        prop_assert!(rb_a.union(&rb_b).eq(bt_a.union(&bt_b)), "union mismatch");
        prop_assert!(
            rb_a.symmetric_difference(&rb_b).eq(bt_a.symmetric_difference(&bt_b)),
            "symmetric_difference mismatch"
        );

        prop_assert_eq!(rb_a.is_disjoint(&rb_b), bt_a.is_disjoint(&bt_b), "is_disjoint mismatch");
        prop_assert_eq!(rb_a.is_subset(&rb_b), bt_a.is_subset(&bt_b), "is_subset mismatch");
        prop_assert_eq!(rb_a.is_superset(&rb_b), bt_a.is_superset(&bt_b), "is_superset mismatch");

        // Operator forms agree with the iterator forms.
        prop_assert!((&rb_a - &rb_b).iter().eq(rb_a.difference(&rb_b)), "Sub mismatch");
        prop_assert!((&rb_a & &rb_b).iter().eq(rb_a.intersection(&rb_b)), "BitAnd mismatch");
        prop_assert!((&rb_a | &rb_b).iter().eq(rb_a.union(&rb_b)), "BitOr mismatch");
        prop_assert!((&rb_a ^ &rb_b).iter().eq(rb_a.symmetric_difference(&rb_b)), "BitXor mismatch");
    }

    /// Tests append and split_off against BTreeSet.
    #[test]
    fn bulk_ops_match_btreeset(
        left in proptest::collection::vec(value_strategy(), 0..500),
        right in proptest::collection::vec(value_strategy(), 0..500),
        pivot in value_strategy(),
    ) {
        let mut rb_a: RBTreeSet<i64> = left.iter().copied().collect();
        let mut rb_b: RBTreeSet<i64> = right.iter().copied().collect();
        let mut bt_a: BTreeSet<i64> = left.iter().copied().collect();
        let mut bt_b: BTreeSet<i64> = right.iter().copied().collect();

        rb_a.append(&mut rb_b);
        bt_a.append(&mut bt_b);
        prop_assert!(rb_b.is_empty());
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "append mismatch");

        let rb_high = rb_a.split_off(&pivot);
        let bt_high = bt_a.split_off(&pivot);
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "split_off left mismatch");
        prop_assert!(rb_high.iter().eq(bt_high.iter()), "split_off right mismatch");

        rb_a.retain(|v| v % 2 == 0);
        bt_a.retain(|v| v % 2 == 0);
        prop_assert!(rb_a.iter().eq(bt_a.iter()), "retain mismatch");
    }
}

// ─── Unit tests for fixed scenarios ──────────────────────────────────────────

#[test]
fn ascending_inserts_traverse_in_order() {
    let mut set = RBTreeSet::new();
    set.insert(10);
    set.insert(20);
    set.insert(30);

    let items: Vec<_> = set.iter().copied().collect();
    assert_eq!(items, [10, 20, 30]);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut set = RBTreeSet::new();
    assert!(set.insert(2));
    assert!(!set.insert(2));
    assert_eq!(set.len(), 1);

    let items: Vec<_> = set.iter().copied().collect();
    assert_eq!(items, [2]);
}

#[test]
fn replace_swaps_the_stored_element() {
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        id: u32,
        tag: &'static str,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.id.cmp(&other.id)
        }
    }

    let mut set = RBTreeSet::new();
    set.insert(Tagged { id: 1, tag: "old" });

    let replaced = set.replace(Tagged { id: 1, tag: "new" });
    assert_eq!(replaced.unwrap().tag, "old");
    assert_eq!(set.get(&Tagged { id: 1, tag: "" }).unwrap().tag, "new");
    assert_eq!(set.len(), 1);

    // Replacing a missing element inserts it.
    assert!(set.replace(Tagged { id: 2, tag: "fresh" }).is_none());
    assert_eq!(set.len(), 2);
}

#[test]
fn take_returns_the_stored_element() {
    let mut set = RBTreeSet::from([1, 2, 3]);
    assert_eq!(set.take(&2), Some(2));
    assert_eq!(set.take(&2), None);
    assert_eq!(set.len(), 2);
}

#[test]
fn empty_set_accessors_return_none() {
    let mut set: RBTreeSet<i32> = RBTreeSet::new();
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.pop_first(), None);
    assert_eq!(set.pop_last(), None);
    assert_eq!(set.iter().next(), None);
    assert_eq!(set.range(..).next(), None);
}
