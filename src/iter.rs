//! Ordered traversal: cursor-stack iterators over the node graph.
//!
//! Both directions are a depth-first walk over edge-sorted siblings. Forward
//! iteration yields a node's key before descending (a prefix sorts before
//! every key it prefixes); reverse iteration descends right-to-left and
//! yields the node's key only after its whole subtree, which reverses that
//! order exactly.

use crate::node::{NodeId, ROOT};
use crate::tree::RadixTree;

/// One level of the traversal: which node, which sibling edge comes next,
/// and how many bytes of the accumulated path the node's incoming label
/// occupies (popped off on ascent).
struct Frame {
    node: NodeId,
    next: usize,
    label_len: usize,
}

/// Iterator over `(key, &value)` entries in ascending lexicographic order.
///
/// Created by [`RadixMap::iter`](crate::RadixMap::iter). The borrow on the
/// map freezes it for the iterator's whole lifetime, so the cursor can never
/// observe a structural mutation.
pub struct Iter<'a, V> {
    tree: &'a RadixTree<V>,
    stack: Vec<Frame>,
    path: String,
    yielded: usize,
    visit_root: bool,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(tree: &'a RadixTree<V>) -> Iter<'a, V> {
        Iter {
            tree,
            stack: vec![Frame {
                node: ROOT,
                next: 0,
                label_len: 0,
            }],
            path: String::new(),
            yielded: 0,
            visit_root: true,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<(String, &'a V)> {
        let tree = self.tree;
        if self.visit_root {
            // The root carries the empty-string key, which sorts first.
            self.visit_root = false;
            if let Some(value) = tree.arena[ROOT].value.as_ref() {
                self.yielded += 1;
                return Some((String::new(), value));
            }
        }
        loop {
            let (node, next) = {
                let frame = self.stack.last_mut()?;
                let pair = (frame.node, frame.next);
                frame.next += 1;
                pair
            };
            if next >= tree.arena[node].edges.len() {
                let frame = self.stack.pop()?;
                self.path.truncate(self.path.len() - frame.label_len);
                continue;
            }
            let edge = &tree.arena[node].edges[next];
            self.path.push_str(&edge.label);
            self.stack.push(Frame {
                node: edge.child,
                next: 0,
                label_len: edge.label.len(),
            });
            if let Some(value) = tree.arena[edge.child].value.as_ref() {
                self.yielded += 1;
                return Some((self.path.clone(), value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.len() - self.yielded;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> std::iter::FusedIterator for Iter<'_, V> {}

/// Iterator over `(key, &value)` entries in descending lexicographic order.
///
/// Created by [`RadixMap::reverse_iter`](crate::RadixMap::reverse_iter).
pub struct RevIter<'a, V> {
    tree: &'a RadixTree<V>,
    stack: Vec<Frame>,
    path: String,
    yielded: usize,
}

impl<'a, V> RevIter<'a, V> {
    pub(crate) fn new(tree: &'a RadixTree<V>) -> RevIter<'a, V> {
        RevIter {
            tree,
            stack: vec![Frame {
                node: ROOT,
                next: tree.arena[ROOT].edges.len(),
                label_len: 0,
            }],
            path: String::new(),
            yielded: 0,
        }
    }
}

impl<'a, V> Iterator for RevIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<(String, &'a V)> {
        let tree = self.tree;
        loop {
            let remaining = {
                let frame = self.stack.last()?;
                frame.next
            };
            if remaining == 0 {
                // Subtree exhausted; the node's own key is the smallest
                // beneath it, so it goes out last.
                let frame = self.stack.pop()?;
                if let Some(value) = tree.arena[frame.node].value.as_ref() {
                    let key = self.path.clone();
                    self.path.truncate(self.path.len() - frame.label_len);
                    self.yielded += 1;
                    return Some((key, value));
                }
                self.path.truncate(self.path.len() - frame.label_len);
                continue;
            }
            let at = remaining - 1;
            let node = {
                let frame = self.stack.last_mut()?;
                frame.next = at;
                frame.node
            };
            let (child, label_len) = {
                let edge = &tree.arena[node].edges[at];
                self.path.push_str(&edge.label);
                (edge.child, edge.label.len())
            };
            self.stack.push(Frame {
                node: child,
                next: tree.arena[child].edges.len(),
                label_len,
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.len() - self.yielded;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for RevIter<'_, V> {}

impl<V> std::iter::FusedIterator for RevIter<'_, V> {}

/// Iterator over keys in ascending order.
///
/// Created by [`RadixMap::keys`](crate::RadixMap::keys).
pub struct Keys<'a, V> {
    pub(crate) inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> std::iter::FusedIterator for Keys<'_, V> {}

/// Iterator over values in ascending key order.
///
/// Created by [`RadixMap::values`](crate::RadixMap::values).
pub struct Values<'a, V> {
    pub(crate) inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> std::iter::FusedIterator for Values<'_, V> {}

/// Owning iterator over `(key, value)` entries in ascending order.
///
/// Created by [`RadixMap`](crate::RadixMap)'s `IntoIterator` impl. Entries
/// are drained from the tree up front; iteration itself is trivial.
pub struct IntoIter<V> {
    entries: std::vec::IntoIter<(String, V)>,
}

impl<V> IntoIter<V> {
    pub(crate) fn new(tree: RadixTree<V>) -> IntoIter<V> {
        IntoIter {
            entries: tree.into_entries().into_iter(),
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<(String, V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<(String, V)> {
        self.entries.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> std::iter::FusedIterator for IntoIter<V> {}
