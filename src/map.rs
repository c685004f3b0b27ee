//! The public map surface: the dictionary protocol over the tree engine.
//!
//! Everything here is a thin composition of the core primitives: lookup,
//! insert, delete and the ordered iterators. The wider surface comes from
//! the standard container traits (`FromIterator`, `Extend`, `PartialEq`,
//! `Index`, `IntoIterator`), which is where Rust keeps its equivalent of the
//! mapping protocol.

use crate::error::Error;
use crate::iter::{IntoIter, Iter, Keys, RevIter, Values};
use crate::tree::RadixTree;
use std::fmt;

/// An ordered map from string keys to values, backed by a path-compressed
/// radix tree.
///
/// Keys sharing prefixes share tree paths, and iteration visits keys in
/// lexicographic order without any sorting step. Lookups, insertions and
/// removals cost O(key length), independent of how many keys are stored.
///
/// # Example
///
/// ```rust
/// use rax_rs::RadixMap;
///
/// let mut map: RadixMap<u64> = RadixMap::new();
/// map.insert("car", 1);
/// map.insert("card", 2);
/// map.insert("care", 3);
///
/// assert_eq!(map.get("car"), Some(&1));
/// let keys: Vec<String> = map.keys().collect();
/// assert_eq!(keys, vec!["car", "card", "care"]);
/// ```
#[derive(Clone)]
pub struct RadixMap<V> {
    tree: RadixTree<V>,
}

impl<V> RadixMap<V> {
    /// Creates an empty map.
    pub fn new() -> RadixMap<V> {
        RadixMap {
            tree: RadixTree::new(),
        }
    }

    /// Builds a map holding every key in `keys` with a clone of `value`.
    ///
    /// Later duplicates overwrite earlier ones, which is invisible here but
    /// keeps the length honest.
    pub fn from_keys<I, K>(keys: I, value: V) -> RadixMap<V>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        V: Clone,
    {
        let mut map = RadixMap::new();
        for key in keys {
            map.insert(key.as_ref(), value.clone());
        }
        map
    }

    /// Number of keys in the map. O(1).
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Returns a reference to the value under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.tree.lookup(key)
    }

    /// Returns a mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.tree.lookup_mut(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.tree.lookup(key).is_some()
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        self.tree.insert(key, value)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.tree.remove(key)
    }

    /// Removes `key`, failing with [`Error::KeyNotFound`] if it is absent.
    ///
    /// The failing case leaves the map untouched.
    pub fn pop(&mut self, key: &str) -> Result<V, Error> {
        self.tree
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Removes and returns the smallest key and its value, or `None` on an
    /// empty map.
    pub fn pop_first(&mut self) -> Option<(String, V)> {
        let key = self.iter().next().map(|(key, _)| key)?;
        let value = self.tree.remove(&key)?;
        Some((key, value))
    }

    /// Removes and returns the largest key and its value, or `None` on an
    /// empty map.
    pub fn pop_last(&mut self) -> Option<(String, V)> {
        let key = self.reverse_iter().next().map(|(key, _)| key)?;
        let value = self.tree.remove(&key)?;
        Some((key, value))
    }

    /// Returns the value under `key`, first inserting `default` if the key
    /// is absent.
    pub fn get_or_insert(&mut self, key: &str, default: V) -> &mut V {
        self.tree.get_or_insert_with(key, || default)
    }

    /// Returns the value under `key`, first inserting `default()` if the key
    /// is absent. The closure only runs on a miss.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        self.tree.get_or_insert_with(key, default)
    }

    /// The smallest key and its value.
    pub fn first_key_value(&self) -> Option<(String, &V)> {
        self.iter().next()
    }

    /// The largest key and its value.
    pub fn last_key_value(&self) -> Option<(String, &V)> {
        self.reverse_iter().next()
    }

    /// Drops every key. Size returns to zero.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Iterates over `(key, &value)` entries in ascending key order.
    ///
    /// The iterator walks the live structure lazily; the shared borrow it
    /// holds rules out mutation for as long as it exists.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.tree)
    }

    /// Iterates over `(key, &value)` entries in descending key order.
    pub fn reverse_iter(&self) -> RevIter<'_, V> {
        RevIter::new(&self.tree)
    }

    /// Iterates over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Walks the whole tree and verifies its structural invariants: path
    /// compression, sorted pairwise-distinct sibling discriminators,
    /// consistent parent links and an accurate size counter.
    ///
    /// A violation means a bug in this crate, never misuse; the check exists
    /// for tests and debugging and costs a full traversal.
    pub fn check_invariants(&self) -> Result<(), Error> {
        self.tree.check_invariants()
    }
}

impl<V> Default for RadixMap<V> {
    fn default() -> RadixMap<V> {
        RadixMap::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Panics with the [`Error::KeyNotFound`] message when the key is absent;
/// use [`RadixMap::get`] for the non-panicking form.
impl<V> std::ops::Index<&str> for RadixMap<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound(key.to_owned())),
        }
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for RadixMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for RadixMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> RadixMap<V> {
        let mut map = RadixMap::new();
        map.extend(iter);
        map
    }
}

/// Equal iff the key/value sets match, regardless of insertion order or the
/// shape either tree happens to have.
impl<V: PartialEq> PartialEq for RadixMap<V> {
    fn eq(&self, other: &RadixMap<V>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<V: Eq> Eq for RadixMap<V> {}

impl<'a, V> IntoIterator for &'a RadixMap<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V> IntoIterator for RadixMap<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter::new(self.tree)
    }
}
