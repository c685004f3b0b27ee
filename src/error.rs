//! Error types for the radix-tree map.

use thiserror::Error;

/// Errors surfaced by the map's strict operations.
///
/// Every other operation is defined and non-failing: inserting over an
/// existing key, deleting the last key, mutating an empty map and so on all
/// have plain `Option`-shaped outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested key holds no entry.
    #[error("key {0:?} was not found in the radix tree")]
    KeyNotFound(String),

    /// The structural self-check found a broken invariant.
    ///
    /// This indicates a bug in the split/merge logic, not a user error; it
    /// is only ever produced by
    /// [`RadixMap::check_invariants`](crate::RadixMap::check_invariants).
    #[error("radix tree invariant violated: {0}")]
    InvariantViolation(&'static str),
}
