/// A zero-based rank into the sorted order of a map or set.
///
/// Indexing by `Rank` selects the item at that sorted position rather than looking up a
/// key, which keeps `map[Rank(0)]` distinct from `map[&0]`.
///
/// # Examples
///
/// ```
/// use wbt_collections::{Rank, WBTreeMap, WBTreeMultiSet};
///
/// let mut map = WBTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
/// assert_eq!(map[Rank(0)], 10);
///
/// let set = WBTreeMultiSet::from([2, 1, 2]);
/// assert_eq!(set[Rank(2)], 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
