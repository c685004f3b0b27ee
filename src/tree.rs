//! The tree engine: insertion with edge splitting, deletion with pruning and
//! merging, and point lookups.
//!
//! The structural invariant maintained here is path compression: apart from
//! the root, no node may be simultaneously non-terminal and single-edged.
//! `ensure_node` upholds it on the way down (splits), `prune`/`merge` restore
//! it on the way up (deletes).

use crate::error::Error;
use crate::node::{Edge, NodeArena, NodeId, ROOT};

/// Byte length of the longest common prefix of `a` and `b`. Compared by
/// `char` so the result always lands on a character boundary and every edge
/// label stays valid UTF-8.
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            break;
        }
        len += x.len_utf8();
    }
    len
}

/// Path-compressed prefix tree over `&str` keys.
///
/// This is the core engine behind [`RadixMap`](crate::RadixMap); the map
/// wraps it with the full dictionary surface.
#[derive(Clone, Debug)]
pub(crate) struct RadixTree<V> {
    pub(crate) arena: NodeArena<V>,
    len: usize,
}

impl<V> RadixTree<V> {
    pub(crate) fn new() -> RadixTree<V> {
        RadixTree {
            arena: NodeArena::new(),
            len: 0,
        }
    }

    /// Number of keys stored.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Walks `key` down from the root. Returns the node whose root path is
    /// exactly `key`, terminal or not; `None` when the walk diverges or stops
    /// in the middle of an edge label.
    pub(crate) fn seek(&self, key: &str) -> Option<NodeId> {
        let mut node = ROOT;
        let mut rest = key;
        loop {
            let Some(first) = rest.chars().next() else {
                return Some(node);
            };
            let Ok(at) = self.arena[node].edge_position(first) else {
                return None;
            };
            let edge = &self.arena[node].edges[at];
            rest = rest.strip_prefix(&*edge.label)?;
            node = edge.child;
        }
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<&V> {
        let id = self.seek(key)?;
        self.arena[id].value.as_ref()
    }

    pub(crate) fn lookup_mut(&mut self, key: &str) -> Option<&mut V> {
        let id = self.seek(key)?;
        self.arena[id].value.as_mut()
    }

    /// Inserts `key`, returning the value it previously held.
    pub(crate) fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let id = self.ensure_node(key);
        let old = self.arena[id].value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Returns the value under `key`, inserting `default()` first if the key
    /// is absent.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> V,
    ) -> &mut V {
        let id = self.ensure_node(key);
        let node = &mut self.arena[id];
        if node.value.is_none() {
            self.len += 1;
        }
        node.value.get_or_insert_with(default)
    }

    /// Removes `key` and returns its value. On a miss the tree is left
    /// untouched.
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.seek(key)?;
        let value = self.arena[id].value.take()?;
        self.len -= 1;
        self.prune(id);
        Some(value)
    }

    /// Drops every key.
    pub(crate) fn clear(&mut self) {
        self.arena.reset();
        self.len = 0;
    }

    /// The shared insert walk: grows the tree so that a node whose root path
    /// equals `key` exists and returns it. Setting the terminal payload is
    /// left to the caller; every caller does so before returning.
    fn ensure_node(&mut self, key: &str) -> NodeId {
        let mut node = ROOT;
        let mut rest = key;
        loop {
            let Some(first) = rest.chars().next() else {
                return node;
            };
            let at = match self.arena[node].edge_position(first) {
                Ok(at) => at,
                Err(_) => {
                    // No edge shares the first character: one new edge
                    // labeled with the whole remaining suffix.
                    let leaf = self.arena.alloc(node);
                    self.arena[node].insert_edge(Edge::new(rest, leaf));
                    return leaf;
                }
            };
            let (child, label_len, shared) = {
                let edge = &self.arena[node].edges[at];
                (edge.child, edge.label.len(), common_prefix_len(&edge.label, rest))
            };
            if shared == label_len {
                node = child;
                rest = &rest[shared..];
                continue;
            }
            return self.split_edge(node, at, rest, shared);
        }
    }

    /// Breaks the edge at `at` under `node` at byte offset `shared`: the
    /// edge keeps the shared prefix and now leads to a fresh intermediate
    /// node, under which the old child hangs with the label remainder.
    /// Returns the node for `rest`: the intermediate itself when the key
    /// ends exactly at the split point, a new leaf branching off otherwise.
    fn split_edge(&mut self, node: NodeId, at: usize, rest: &str, shared: usize) -> NodeId {
        let mid = self.arena.alloc(node);
        let (old_child, old_label) = {
            let edge = &mut self.arena[node].edges[at];
            debug_assert!(shared < edge.label.len());
            let old_child = std::mem::replace(&mut edge.child, mid);
            let old_label = std::mem::take(&mut edge.label);
            edge.label = old_label[..shared].into();
            (old_child, old_label)
        };
        self.arena[old_child].parent = mid;
        self.arena[mid].insert_edge(Edge::new(&old_label[shared..], old_child));

        if shared == rest.len() {
            mid
        } else {
            let leaf = self.arena.alloc(mid);
            self.arena[mid].insert_edge(Edge::new(&rest[shared..], leaf));
            leaf
        }
    }

    /// Restores the compression invariant after `node` lost its terminal
    /// payload: detaches childless non-terminals bottom-up, then merges the
    /// node the walk stops at if it became a single-edge non-terminal.
    fn prune(&mut self, mut node: NodeId) {
        while node != ROOT
            && self.arena[node].value.is_none()
            && self.arena[node].edges.is_empty()
        {
            let parent = self.arena[node].parent;
            if let Some(at) = self.arena[parent].edge_to(node) {
                self.arena[parent].edges.remove(at);
            }
            self.arena.release(node);
            node = parent;
        }
        self.merge(node);
    }

    /// Splices a non-terminal single-edge node out by concatenating its
    /// incoming and outgoing labels into one edge from its parent to its
    /// child. No-op unless the node actually violates the invariant.
    fn merge(&mut self, node: NodeId) {
        if node == ROOT || self.arena[node].value.is_some() || self.arena[node].edges.len() != 1 {
            return;
        }
        let parent = self.arena[node].parent;
        let Some(down) = self.arena[node].edges.pop() else {
            return;
        };
        let Some(at) = self.arena[parent].edge_to(node) else {
            debug_assert!(false, "node missing from its parent's edge set");
            return;
        };
        {
            let edge = &mut self.arena[parent].edges[at];
            let mut joined = String::with_capacity(edge.label.len() + down.label.len());
            joined.push_str(&edge.label);
            joined.push_str(&down.label);
            edge.label = joined.into_boxed_str();
            edge.child = down.child;
        }
        self.arena[down.child].parent = parent;
        self.arena.release(node);
    }

    /// Full structural self-check; surfaced publicly through the map.
    pub(crate) fn check_invariants(&self) -> Result<(), Error> {
        let mut stack = vec![ROOT];
        let mut reachable = 0usize;
        let mut terminals = 0usize;
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = &self.arena[id];
            if node.value.is_some() {
                terminals += 1;
            } else if id != ROOT {
                if node.edges.is_empty() {
                    return Err(Error::InvariantViolation("childless non-terminal node"));
                }
                if node.edges.len() == 1 {
                    return Err(Error::InvariantViolation(
                        "single-edge non-terminal node left uncompressed",
                    ));
                }
            }
            let mut prev: Option<char> = None;
            for edge in &node.edges {
                let Some(first) = edge.label.chars().next() else {
                    return Err(Error::InvariantViolation("empty edge label"));
                };
                if edge.first != first {
                    return Err(Error::InvariantViolation(
                        "edge discriminator does not match its label",
                    ));
                }
                if prev.map_or(false, |p| p >= first) {
                    return Err(Error::InvariantViolation(
                        "sibling edges out of discriminator order",
                    ));
                }
                prev = Some(first);
                if self.arena[edge.child].parent != id {
                    return Err(Error::InvariantViolation(
                        "child's parent back-reference is stale",
                    ));
                }
                stack.push(edge.child);
            }
        }
        if terminals != self.len {
            return Err(Error::InvariantViolation(
                "len does not match reachable terminal count",
            ));
        }
        if reachable != self.arena.live() {
            return Err(Error::InvariantViolation("arena holds unreachable nodes"));
        }
        Ok(())
    }

    /// Consumes the tree into its entries in ascending key order. Backs the
    /// owning iterator.
    pub(crate) fn into_entries(mut self) -> Vec<(String, V)> {
        let mut out = Vec::with_capacity(self.len);
        let mut path = String::new();
        // (node, next edge, incoming label length)
        let mut stack: Vec<(NodeId, usize, usize)> = vec![(ROOT, 0, 0)];
        if let Some(value) = self.arena[ROOT].value.take() {
            out.push((String::new(), value));
        }
        while let Some(frame) = stack.last_mut() {
            let (node, next, label_len) = *frame;
            if next == self.arena[node].edges.len() {
                stack.pop();
                path.truncate(path.len() - label_len);
                continue;
            }
            frame.1 += 1;
            let (child, child_label_len) = {
                let edge = &self.arena[node].edges[next];
                path.push_str(&edge.label);
                (edge.child, edge.label.len())
            };
            stack.push((child, 0, child_label_len));
            if let Some(value) = self.arena[child].value.take() {
                out.push((path.clone(), value));
            }
        }
        out
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> RadixTree<V> {
        RadixTree::new()
    }
}
