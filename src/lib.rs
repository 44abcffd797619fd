//! Weight-balanced order-statistic trees for Rust.
//!
//! Every collection in this crate is a binary search tree that keeps a subtree size in
//! each node and rebalances by weight. That gives O(log n) insertion, removal and search,
//! and it also makes positions cheap: the item at a sorted position, or the position of
//! an item, is found in O(log n) without walking the tree.
//!
//! - [`WBTreeSet`] / [`WBTreeMultiSet`] - sorted sets, with or without duplicates
//! - [`WBTreeMap`] / [`WBTreeMultiMap`] - sorted maps, with or without duplicate keys
//! - [`WBTreeList`] - a sequence with O(log n) insert and remove at any position
//! - [`WBTreeLinkedList`] - a linked list whose nodes also know their position
//! - [`TreePriorityQueue`] - a double-ended priority queue
//!
//! Ordering is pluggable through the [`compare`] module. Equal items are kept in the
//! order they were inserted, so the multi-collections and the priority queue are stable.
//!
//! # Example
//!
//! ```
//! use wbt_collections::{Rank, WBTreeMap, WBTreeMultiSet};
//!
//! let mut scores = WBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Order-statistic operations (O(log n))
//! let (name, score) = scores.get_by_rank(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Equal items form a run that can be counted and located directly.
//! let rolls: WBTreeMultiSet<u8> = [3, 1, 4, 1, 5, 1].into_iter().collect();
//! assert_eq!(rolls.count_of(&1), 3);
//! assert_eq!(rolls.first_index_of(&4), Some(4));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`
//! - **Stable node ids** - [`NodeId`] names a node until it is removed, and a removed
//!   node's id is rejected rather than reused
//! - **Fallible where it matters** - positional accessors that promise a result return
//!   [`Result`] with an [`Error`]; searches that may miss return `Option`
//!
//! # Implementation
//!
//! The trees live in an index-based arena. After every insertion or removal, each
//! ancestor of the edited position is checked with `lc = size(left) + 1` and
//! `rc = size(right) + 1`, and rotated when one side outweighs the other more than twice.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod node;
mod order_statistic;
mod raw;
mod sorted;

pub mod compare;
pub mod iter;
pub mod priority_queue;
pub mod wbtree_linked_list;
pub mod wbtree_list;
pub mod wbtree_map;
pub mod wbtree_set;

pub use error::{Error, Result};
pub use node::{NodeId, NodeRef};
pub use order_statistic::Rank;
pub use priority_queue::TreePriorityQueue;
pub use wbtree_linked_list::WBTreeLinkedList;
pub use wbtree_list::WBTreeList;
pub use wbtree_map::{SortedMap, WBTreeMap, WBTreeMultiMap};
pub use wbtree_set::{SortedSet, WBTreeMultiSet, WBTreeSet};
