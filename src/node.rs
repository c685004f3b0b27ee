//! Node model: arena-allocated nodes with sorted, labeled edges.
//!
//! The node graph is a strict tree. The arena owns every node; each node is
//! reachable through exactly one parent edge. Parent back-references are
//! plain indices used for upward navigation during deletion and never keep a
//! node alive, so there is no cyclic ownership to manage.

use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Stable index of a node inside the arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Sentinel used as the root's parent.
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The root lives in slot 0 and is never released.
pub(crate) const ROOT: NodeId = NodeId(0);

/// A labeled edge to a child node.
///
/// `first` caches the label's first character: siblings are sorted by it and
/// it is the only character inspected when selecting among them.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
    pub(crate) first: char,
    pub(crate) label: Box<str>,
    pub(crate) child: NodeId,
}

impl Edge {
    /// `label` must be non-empty.
    pub(crate) fn new(label: &str, child: NodeId) -> Edge {
        debug_assert!(!label.is_empty());
        let first = label.chars().next().unwrap_or('\0');
        Edge {
            first,
            label: label.into(),
            child,
        }
    }
}

/// A single tree node: sorted outgoing edges, an optional payload marking it
/// as a key terminus, and a parent back-reference.
#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) edges: SmallVec<[Edge; 4]>,
    pub(crate) value: Option<V>,
    pub(crate) parent: NodeId,
}

impl<V> Node<V> {
    fn new(parent: NodeId) -> Node<V> {
        Node {
            edges: SmallVec::new(),
            value: None,
            parent,
        }
    }

    /// Binary-searches the sorted edge list for the edge whose label starts
    /// with `first`. `Err` carries the insertion point.
    #[inline]
    pub(crate) fn edge_position(&self, first: char) -> Result<usize, usize> {
        self.edges.binary_search_by(|edge| edge.first.cmp(&first))
    }

    /// Inserts `edge` at its sorted position. The caller guarantees no
    /// sibling shares its discriminator.
    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        let at = self.edges.partition_point(|e| e.first < edge.first);
        debug_assert!(self.edges.get(at).map_or(true, |e| e.first != edge.first));
        self.edges.insert(at, edge);
    }

    /// Position of the edge leading to `child`, if any.
    pub(crate) fn edge_to(&self, child: NodeId) -> Option<usize> {
        self.edges.iter().position(|edge| edge.child == child)
    }
}

/// Slab of nodes with a free list, so deleted slots are recycled and node
/// indices stay stable for the nodes that survive.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Node<V>>,
    free: Vec<NodeId>,
}

impl<V> NodeArena<V> {
    pub(crate) fn new() -> NodeArena<V> {
        NodeArena {
            slots: vec![Node::new(NodeId::NONE)],
            free: Vec::new(),
        }
    }

    /// Allocates an empty node attached to nothing, with `parent` recorded.
    pub(crate) fn alloc(&mut self, parent: NodeId) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                debug_assert!(slot.value.is_none() && slot.edges.is_empty());
                slot.parent = parent;
                id
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Node::new(parent));
                id
            }
        }
    }

    /// Returns a node's slot to the free list. The node must already be
    /// detached from its parent.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(id != ROOT);
        let slot = &mut self.slots[id.index()];
        slot.value = None;
        slot.edges.clear();
        slot.parent = NodeId::NONE;
        self.free.push(id);
    }

    /// Drops every node except the root and clears the root in place.
    pub(crate) fn reset(&mut self) {
        self.slots.truncate(1);
        self.free.clear();
        let root = &mut self.slots[ROOT.index()];
        root.value = None;
        root.edges.clear();
    }

    /// Number of live (non-recycled) nodes, root included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<V> Index<NodeId> for NodeArena<V> {
    type Output = Node<V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<V> {
        &self.slots[id.index()]
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.slots[id.index()]
    }
}
