use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rubra_tree::RBTreeMultiSet;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a range narrow enough to force many duplicates.
fn value_strategy() -> impl Strategy<Value = i64> {
    -50i64..50i64
}

/// Reference model: a Vec kept sorted, with new duplicates appended after
/// their equals (the multiset's tie-break).
#[derive(Debug, Default)]
struct SortedVecModel {
    items: Vec<i64>,
}

impl SortedVecModel {
    fn insert(&mut self, value: i64) {
        let at = self.items.partition_point(|&item| item <= value);
        self.items.insert(at, value);
    }

    fn remove_one(&mut self, value: i64) -> bool {
        match self.items.binary_search(&value) {
            Ok(_) => {
                let at = self.items.partition_point(|&item| item < value);
                self.items.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    fn remove_all(&mut self, value: i64) -> usize {
        let before = self.items.len();
        self.items.retain(|&item| item != value);
        before - self.items.len()
    }

    fn count(&self, value: i64) -> usize {
        self.items.iter().filter(|&&item| item == value).count()
    }

    fn pop_first(&mut self) -> Option<i64> {
        if self.items.is_empty() { None } else { Some(self.items.remove(0)) }
    }

    fn pop_last(&mut self) -> Option<i64> {
        self.items.pop()
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum BagOp {
    Insert(i64),
    RemoveOne(i64),
    RemoveAll(i64),
    Count(i64),
    Contains(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn bag_op_strategy() -> impl Strategy<Value = BagOp> {
    prop_oneof![
        6 => value_strategy().prop_map(BagOp::Insert),
        3 => value_strategy().prop_map(BagOp::RemoveOne),
        1 => value_strategy().prop_map(BagOp::RemoveAll),
        2 => value_strategy().prop_map(BagOp::Count),
        1 => value_strategy().prop_map(BagOp::Contains),
        1 => Just(BagOp::First),
        1 => Just(BagOp::Last),
        1 => Just(BagOp::PopFirst),
        1 => Just(BagOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMultiSet and the
    /// sorted-Vec model and asserts identical results at every step.
    #[test]
    fn bag_ops_match_sorted_vec(ops in proptest::collection::vec(bag_op_strategy(), TEST_SIZE)) {
        let mut bag: RBTreeMultiSet<i64> = RBTreeMultiSet::new();
        let mut model = SortedVecModel::default();

        for op in &ops {
            match op {
                BagOp::Insert(v) => {
                    bag.insert(*v);
                    model.insert(*v);
                }
                BagOp::RemoveOne(v) => {
                    prop_assert_eq!(bag.remove_one(v), model.remove_one(*v), "remove_one({})", v);
                }
                BagOp::RemoveAll(v) => {
                    prop_assert_eq!(bag.remove_all(v), model.remove_all(*v), "remove_all({})", v);
                }
                BagOp::Count(v) => {
                    prop_assert_eq!(bag.count(v), model.count(*v), "count({})", v);
                }
                BagOp::Contains(v) => {
                    prop_assert_eq!(bag.contains(v), model.count(*v) > 0, "contains({})", v);
                }
                BagOp::First => {
                    prop_assert_eq!(bag.first(), model.items.first(), "first()");
                }
                BagOp::Last => {
                    prop_assert_eq!(bag.last(), model.items.last(), "last()");
                }
                BagOp::PopFirst => {
                    prop_assert_eq!(bag.pop_first(), model.pop_first(), "pop_first()");
                }
                BagOp::PopLast => {
                    prop_assert_eq!(bag.pop_last(), model.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(bag.len(), model.items.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bag.is_empty(), model.items.is_empty(), "is_empty mismatch after {:?}", op);
        }

        // Final sweep: the full in-order sequences agree.
        prop_assert!(bag.iter().eq(model.items.iter()), "final iter() mismatch");
    }

    /// Tests that iteration yields the sorted sequence with duplicates kept.
    #[test]
    fn iter_matches_sorted_vec(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let bag: RBTreeMultiSet<i64> = values.iter().copied().collect();

        let mut expected = values.clone();
        expected.sort_unstable();

        prop_assert!(bag.iter().eq(expected.iter()), "iter() mismatch");
        prop_assert!(bag.iter().rev().eq(expected.iter().rev()), "iter().rev() mismatch");

        let drained: Vec<_> = bag.into_iter().collect();
        prop_assert_eq!(drained, expected, "into_iter() mismatch");
    }

    /// Tests range and equal_range against slices of the sorted model.
    #[test]
    fn range_matches_sorted_vec(
        values in proptest::collection::vec(value_strategy(), TEST_SIZE),
        bounds in proptest::collection::vec((value_strategy(), value_strategy()), 32),
    ) {
        let bag: RBTreeMultiSet<i64> = values.iter().copied().collect();

        let mut sorted = values.clone();
        sorted.sort_unstable();

        for (a, b) in bounds {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let half_open: Vec<_> = sorted.iter().copied().filter(|&v| lo <= v && v < hi).collect();
            prop_assert!(bag.range(lo..hi).copied().eq(half_open), "range({}..{})", lo, hi);

            let closed: Vec<_> = sorted.iter().copied().filter(|&v| lo <= v && v <= hi).collect();
            prop_assert!(bag.range(lo..=hi).copied().eq(closed.iter().copied()), "range({}..={})", lo, hi);
            prop_assert!(
                bag.range(lo..=hi).rev().copied().eq(closed.iter().rev().copied()),
                "range({}..={}).rev()", lo, hi
            );

            prop_assert_eq!(bag.equal_range(&lo).count(), bag.count(&lo), "equal_range({})", lo);
        }
    }

    /// append keeps every duplicate from both sides.
    #[test]
    fn append_keeps_duplicates(
        left in proptest::collection::vec(value_strategy(), 0..500),
        right in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let mut bag_a: RBTreeMultiSet<i64> = left.iter().copied().collect();
        let mut bag_b: RBTreeMultiSet<i64> = right.iter().copied().collect();

        bag_a.append(&mut bag_b);

        let mut expected: Vec<i64> = left;
        expected.extend(right);
        expected.sort_unstable();

        prop_assert!(bag_b.is_empty());
        prop_assert_eq!(bag_a.len(), expected.len());
        prop_assert!(bag_a.iter().eq(expected.iter()), "append mismatch");
    }

    /// Clone produces an equal, independent multiset.
    #[test]
    fn clone_is_deep(values in proptest::collection::vec(value_strategy(), 0..500)) {
        let original: RBTreeMultiSet<i64> = values.iter().copied().collect();
        let mut copy = original.clone();

        prop_assert_eq!(&original, &copy);

        copy.insert(999);
        prop_assert!(!original.contains(&999), "clone shares storage with the original");
    }
}

// ─── Unit tests for fixed scenarios ──────────────────────────────────────────

#[test]
fn triple_insert_counts_three() {
    let mut bag = RBTreeMultiSet::new();
    bag.insert(5);
    bag.insert(5);
    bag.insert(5);

    assert_eq!(bag.count(&5), 3);
    let items: Vec<_> = bag.iter().copied().collect();
    assert_eq!(items, [5, 5, 5]);
}

#[test]
fn equal_elements_stay_in_insertion_order() {
    #[derive(Debug, Clone, Copy)]
    struct Card {
        rank: u8,
        deal: u32,
    }

    impl PartialEq for Card {
        fn eq(&self, other: &Self) -> bool {
            self.rank == other.rank
        }
    }
    impl Eq for Card {}
    impl PartialOrd for Card {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Card {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.rank.cmp(&other.rank)
        }
    }

    let mut bag = RBTreeMultiSet::new();
    for deal in 0..6 {
        bag.insert(Card { rank: (deal % 2) as u8, deal });
    }

    // Each equal run preserves the order the cards were dealt in.
    let deals: Vec<_> = bag.iter().map(|card| card.deal).collect();
    assert_eq!(deals, [0, 2, 4, 1, 3, 5]);

    // remove_one evicts the oldest member of the run.
    assert!(bag.remove_one(&Card { rank: 0, deal: 99 }));
    let deals: Vec<_> = bag.iter().map(|card| card.deal).collect();
    assert_eq!(deals, [2, 4, 1, 3, 5]);
}

#[test]
fn remove_all_empties_the_run() {
    let mut bag = RBTreeMultiSet::from([5, 5, 7]);
    assert_eq!(bag.remove_all(&5), 2);
    assert_eq!(bag.remove_all(&5), 0);
    assert_eq!(bag.count(&5), 0);
    assert_eq!(bag.len(), 1);
    assert!(bag.contains(&7));
}

#[test]
fn retain_keeps_equal_runs_intact() {
    let mut bag = RBTreeMultiSet::from([1, 2, 2, 3, 4, 4, 4]);
    bag.retain(|&v| v % 2 == 0);

    let items: Vec<_> = bag.iter().copied().collect();
    assert_eq!(items, [2, 2, 4, 4, 4]);
    assert_eq!(bag.count(&4), 3);
}

#[test]
fn empty_bag_accessors_return_none() {
    let mut bag: RBTreeMultiSet<i32> = RBTreeMultiSet::new();
    assert_eq!(bag.first(), None);
    assert_eq!(bag.last(), None);
    assert_eq!(bag.pop_first(), None);
    assert_eq!(bag.pop_last(), None);
    assert_eq!(bag.count(&1), 0);
    assert_eq!(bag.iter().next(), None);
    assert_eq!(bag.range(..).next(), None);
    assert_eq!(bag.equal_range(&1).next(), None);
}

#[test]
fn equality_counts_multiplicity() {
    let a = RBTreeMultiSet::from([1, 2, 2]);
    let b = RBTreeMultiSet::from([2, 1, 2]);
    assert_eq!(a, b);

    let c = RBTreeMultiSet::from([1, 2]);
    assert_ne!(a, c);
}

#[test]
#[should_panic(expected = "range start is greater than range end")]
fn backwards_range_panics() {
    let bag = RBTreeMultiSet::from([1, 2, 3]);
    let _ = bag.range(5..1);
}
