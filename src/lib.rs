//! # rax-rs
//!
//! An ordered map from string keys to values, backed by a path-compressed
//! prefix tree (radix tree).
//!
//! Keys that share prefixes share tree paths, so the structure stays compact
//! on clustered key sets, and forward/reverse iteration yields keys in
//! lexicographic order directly from the tree shape, with no sorting step.
//! Lookup, insertion and removal all run in time proportional to the key
//! length, not the number of stored keys.
//!
//! The node graph lives in an index-addressed arena: children are owned
//! through their parent's edges, while parent back-references are plain
//! indices, so there is no cyclic ownership and upward navigation during
//! deletion stays O(1).
//!
//! ## Example
//!
//! ```rust
//! use rax_rs::RadixMap;
//!
//! let mut map: RadixMap<u64> = RadixMap::new();
//! map.insert("romane", 1);
//! map.insert("romanus", 2);
//! map.insert("romulus", 3);
//!
//! assert_eq!(map.get("romanus"), Some(&2));
//!
//! let keys: Vec<String> = map.keys().collect();
//! assert_eq!(keys, vec!["romane", "romanus", "romulus"]);
//!
//! let last: Vec<String> = map.reverse_iter().take(1).map(|(k, _)| k).collect();
//! assert_eq!(last, vec!["romulus"]);
//! ```
//!
//! Single-threaded by design: there is no internal synchronization, and the
//! borrow checker statically prevents mutating a map while iterating it.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod iter;
mod map;
mod node;
mod tree;

pub use error::Error;
pub use iter::{IntoIter, Iter, Keys, RevIter, Values};
pub use map::RadixMap;

#[cfg(test)]
mod proptests;
