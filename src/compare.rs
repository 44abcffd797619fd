//! Comparators: the ordering contract of the sorted collections, plus a few
//! combinators for building descending and multi-key orders.
//!
//! Any `Fn(&T, &T) -> Ordering` is a [`Comparator`], so ad-hoc closures work directly.
//! The named types exist for orders that are reused or composed:
//!
//! ```
//! use wbt_collections::compare::{by_key, by_key_descending, Comparator, ComparatorExt};
//!
//! struct Player {
//!     team: &'static str,
//!     score: u32,
//! }
//!
//! // Team name ascending, then score descending.
//! let order = by_key(|p: &Player| p.team).then_with(by_key_descending(|p: &Player| p.score));
//!
//! let a = Player { team: "blue", score: 10 };
//! let b = Player { team: "blue", score: 30 };
//! let c = Player { team: "red", score: 50 };
//! assert!(order.compare(&b, &a).is_lt());
//! assert!(order.compare(&a, &c).is_lt());
//! ```

use core::cmp::Ordering;
use core::marker::PhantomData;

/// A total order over `T`.
///
/// Implementations must be consistent: antisymmetric, transitive, and returning
/// [`Ordering::Equal`] exactly for items that should be treated as the same key. A
/// comparator that violates this produces unspecified (but memory-safe) results in the
/// collection that uses it.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The natural order of `T` given by its [`Ord`] implementation.
///
/// For `str` and `String` this is byte-wise (ordinal) order, independent of locale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The inverse of the wrapped comparator.
///
/// ```
/// use wbt_collections::compare::{Comparator, NaturalOrder, Reversed};
///
/// assert!(Reversed(NaturalOrder).compare(&1, &2).is_gt());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders items by a projected key, compared with `C`.
///
/// Created by [`by_key`] and [`by_key_descending`]. The projection is called on every
/// comparison, so it should be cheap, like the key function of `slice::sort_by_key`.
pub struct ByKey<F, K, C = NaturalOrder> {
    key: F,
    cmp: C,
    _key: PhantomData<fn() -> K>,
}

impl<F, K, C> ByKey<F, K, C> {
    /// Projects items through `key` and orders the keys with `cmp`.
    pub const fn new(key: F, cmp: C) -> Self {
        ByKey {
            key,
            cmp,
            _key: PhantomData,
        }
    }
}

impl<T: ?Sized, F, K, C> Comparator<T> for ByKey<F, K, C>
where
    F: Fn(&T) -> K,
    C: Comparator<K>,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.cmp.compare(&(self.key)(a), &(self.key)(b))
    }
}

impl<F: Clone, K, C: Clone> Clone for ByKey<F, K, C> {
    fn clone(&self) -> Self {
        ByKey::new(self.key.clone(), self.cmp.clone())
    }
}

impl<F, K, C: core::fmt::Debug> core::fmt::Debug for ByKey<F, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByKey").field("cmp", &self.cmp).finish_non_exhaustive()
    }
}

/// Lexicographic composition: `first`, and `then` to break its ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ThenWith<A, B> {
    first: A,
    then: B,
}

impl<T: ?Sized, A: Comparator<T>, B: Comparator<T>> Comparator<T> for ThenWith<A, B> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.first.compare(a, b).then_with(|| self.then.compare(a, b))
    }
}

/// Orders items by the natural order of `key(item)`.
///
/// ```
/// use wbt_collections::compare::{by_key, Comparator};
///
/// let by_len = by_key(|s: &&str| s.len());
/// assert!(by_len.compare(&"ab", &"abc").is_lt());
/// ```
pub const fn by_key<F, K>(key: F) -> ByKey<F, K> {
    ByKey::new(key, NaturalOrder)
}

/// Orders items by the reversed natural order of `key(item)`.
pub const fn by_key_descending<F, K>(key: F) -> ByKey<F, K, Reversed<NaturalOrder>> {
    ByKey::new(key, Reversed(NaturalOrder))
}

/// Combinators for the comparator types of this module.
///
/// Closures are comparators too; wrap one in [`Reversed`] or [`ByKey::new`] to compose it.
pub trait ComparatorExt: Sized {
    /// The inverse order.
    fn reversed(self) -> Reversed<Self> {
        Reversed(self)
    }

    /// Breaks ties of `self` with `then`.
    fn then_with<B>(self, then: B) -> ThenWith<Self, B> {
        ThenWith {
            first: self,
            then,
        }
    }

    /// Breaks ties of `self` with the natural order of `key(item)`.
    fn then_by_key<F, K>(self, key: F) -> ThenWith<Self, ByKey<F, K>> {
        self.then_with(by_key(key))
    }

    /// Breaks ties of `self` with the reversed natural order of `key(item)`.
    fn then_by_key_descending<F, K>(self, key: F) -> ThenWith<Self, ByKey<F, K, Reversed<NaturalOrder>>> {
        self.then_with(by_key_descending(key))
    }
}

impl ComparatorExt for NaturalOrder {}
impl<C> ComparatorExt for Reversed<C> {}
impl<F, K, C> ComparatorExt for ByKey<F, K, C> {}
impl<A, B> ComparatorExt for ThenWith<A, B> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Row {
        a: u8,
        b: i32,
        c: char,
    }

    fn sorted_by<C: Comparator<Row>>(rows: &[Row], cmp: &C) -> Vec<Row> {
        let mut rows = rows.to_vec();
        rows.sort_by(|x, y| cmp.compare(x, y));
        rows
    }

    #[test]
    fn closures_are_comparators() {
        let cmp = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(cmp.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn natural_and_reversed() {
        assert_eq!(NaturalOrder.compare("a", "b"), Ordering::Less);
        assert_eq!(NaturalOrder.reversed().compare(&3, &3), Ordering::Equal);
        assert_eq!(Reversed(NaturalOrder).compare(&1u8, &2u8), Ordering::Greater);
    }

    #[test]
    fn three_key_composition() {
        let rows = [
            Row { a: 1, b: 5, c: 'x' },
            Row { a: 0, b: 5, c: 'y' },
            Row { a: 1, b: 7, c: 'a' },
            Row { a: 1, b: 5, c: 'b' },
        ];

        let cmp = by_key(|r: &Row| r.a).then_by_key_descending(|r: &Row| r.b).then_by_key(|r: &Row| r.c);
        let order: Vec<char> = sorted_by(&rows, &cmp).iter().map(|r| r.c).collect();
        assert_eq!(order, vec!['y', 'a', 'b', 'x']);

        let reversed: Vec<char> = sorted_by(&rows, &cmp.clone().reversed()).iter().map(|r| r.c).collect();
        assert_eq!(reversed, vec!['x', 'b', 'a', 'y']);
    }
}
