use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wbt_collections::compare::{ComparatorExt, by_key_descending};
use wbt_collections::{Error, TreePriorityQueue};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Popping everything from the front is a stable sort by priority.
    #[test]
    fn draining_is_a_stable_sort(priorities in proptest::collection::vec(0u8..16, 0..500)) {
        let mut queue = TreePriorityQueue::with_key(|item: &(u8, usize)| item.0);
        queue.push_items(priorities.iter().copied().zip(0..));

        let mut expected: Vec<(u8, usize)> = priorities.iter().copied().zip(0..).collect();
        expected.sort_by_key(|item| item.0);

        prop_assert_eq!(queue.iter().copied().collect::<Vec<_>>(), expected.clone());
        let mut drained = Vec::new();
        while let Ok(item) = queue.pop_first() {
            drained.push(item);
        }
        prop_assert_eq!(drained, expected);
    }

    /// `initialize` and repeated `push` end in the same order.
    #[test]
    fn initialize_matches_pushing(priorities in proptest::collection::vec(any::<i16>(), 0..300)) {
        let mut pushed = TreePriorityQueue::new();
        pushed.extend(priorities.iter().copied());
        let built: TreePriorityQueue<i16> = priorities.iter().copied().collect();

        prop_assert_eq!(pushed.len(), built.len());
        prop_assert!(pushed.iter().eq(built.iter()));
        prop_assert!(pushed.iter_descending().eq(built.into_sorted_vec().iter().rev()));
    }
}

#[test]
fn min_and_max_from_both_ends() {
    let mut queue: TreePriorityQueue<_> = [5, 1, 9, 3, 7].into_iter().collect();
    assert_eq!((queue.first(), queue.last()), (Ok(&1), Ok(&9)));
    assert_eq!(queue.pop_last(), Ok(9));
    assert_eq!(queue.pop_first(), Ok(1));
    assert_eq!(queue.pop_last(), Ok(7));
    assert_eq!(queue.len(), 2);
    assert_eq!(format!("{queue:?}"), "[3, 5]");
}

#[test]
fn empty_queue_is_an_error() {
    let mut queue: TreePriorityQueue<String> = TreePriorityQueue::default();
    assert_eq!(queue.first(), Err(Error::Empty));
    assert_eq!(queue.pop_last(), Err(Error::Empty));

    queue.push("only".to_string());
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.pop_first(), Err(Error::Empty));
}

#[test]
fn composed_key_orders_jobs() {
    // Highest priority first; equal priorities by shortest name.
    let order = by_key_descending(|job: &(u8, &str)| job.0).then_by_key(|job: &(u8, &str)| job.1.len());
    let mut queue: TreePriorityQueue<(u8, &str), _> = TreePriorityQueue::with_comparator(order);
    queue.push_items([(1, "index"), (3, "build"), (3, "ci"), (2, "docs"), (3, "lint")]);

    let order: Vec<&str> = queue.into_sorted_vec().into_iter().map(|job| job.1).collect();
    assert_eq!(order, ["ci", "lint", "build", "docs", "index"]);
}
