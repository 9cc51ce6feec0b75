//! Red-black tree collections for Rust.
//!
//! This crate provides [`RBTreeMap`], [`RBTreeSet`], and [`RBTreeMultiSet`]:
//! ordered containers backed by a classic red-black tree with parent links,
//! stored in an index-addressed arena rather than individually boxed nodes.
//!
//! - [`RBTreeMap`] and [`RBTreeSet`] mirror the standard library's
//!   `BTreeMap` and `BTreeSet` APIs and reject duplicate keys.
//! - [`RBTreeMultiSet`] permits duplicate elements; equal elements stay
//!   contiguous in insertion order and can be counted or ranged over as a
//!   group.
//!
//! # Example
//!
//! ```
//! use rubra_tree::{RBTreeMap, RBTreeMultiSet};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Standard BTreeMap operations work as expected
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Keys come back in sorted order
//! let names: Vec<_> = scores.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // The multiset keeps duplicates
//! let mut rolls = RBTreeMultiSet::new();
//! rolls.insert(4);
//! rolls.insert(6);
//! rolls.insert(4);
//! assert_eq!(rolls.count(&4), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Drop-in replacement** - `RBTreeMap`/`RBTreeSet` mirror `std::collections`
//! - **Multiset support** - duplicate keys with a deterministic, stable tie-break
//! - **Stable handles** - nodes live in an arena addressed by indices, so
//!   rebalancing rewrites a constant number of indices and never moves elements
//!
//! # Implementation
//!
//! All three containers share one raw engine: a red-black tree whose nodes
//! carry parent/left/right links as 4-byte optional handles into an arena.
//! Insertion and deletion restore the red-black invariants with the standard
//! rotation/recolor fixup passes, which bounds the height at
//! 2·log₂(n + 1) and makes every operation O(log n). In-order iteration
//! walks successor/predecessor chains through the parent links, so no
//! per-iterator stack is needed.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod rbtree_map;
pub mod rbtree_multiset;
pub mod rbtree_set;

pub use rbtree_map::RBTreeMap;
pub use rbtree_multiset::RBTreeMultiSet;
pub use rbtree_set::RBTreeSet;
