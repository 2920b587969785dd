//! Utilities to traverse the PSP tree structure.

use std::iter::FusedIterator;

use tinyvec::TinyVec;

use crate::position::Position;
use crate::psptree::node::{Node, NodeId};
use crate::psptree::PspTree;

/// A read-only view onto a node in a [`PspTree`].
#[derive(Debug)]
pub struct NodeRef<'a, V, M> {
    /// The tree that this node is a reference onto
    tree: &'a PspTree<V, M>,
    id: NodeId,
}

impl<V, M> Clone for NodeRef<'_, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, M> Copy for NodeRef<'_, V, M> {}

impl<'a, V, M> NodeRef<'a, V, M> {
    fn new(tree: &'a PspTree<V, M>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn node(&self) -> &'a Node<V> {
        self.tree.arena.get(self.id)
    }

    /// The position stored at this node.
    pub fn position(&self) -> &'a Position {
        &self.node().position
    }

    /// The value stored at this node.
    pub fn value(&self) -> &'a V {
        self.node()
            .value
            .as_ref()
            .expect("node views are never created for the sentinel")
    }

    /// The distance to this node's parent when it was attached, and the threshold between its
    /// inner and outer children.
    pub fn split_radius(&self) -> f64 {
        self.node().split_radius
    }

    /// The child holding points within [`split_radius`][Self::split_radius] of this node.
    pub fn inner(&self) -> Option<NodeRef<'a, V, M>> {
        self.node().inner.map(|id| NodeRef::new(self.tree, id))
    }

    /// The child holding points beyond [`split_radius`][Self::split_radius] of this node.
    pub fn outer(&self) -> Option<NodeRef<'a, V, M>> {
        self.node().outer.map(|id| NodeRef::new(self.tree, id))
    }

    /// The parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, V, M>> {
        self.node()
            .parent
            .filter(|id| *id != NodeId::SENTINEL)
            .map(|id| NodeRef::new(self.tree, id))
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

impl<V, M> PspTree<V, M> {
    /// Access the root node of the tree for manual traversal.
    ///
    /// Returns `None` for an empty tree. The sentinel is not exposed.
    pub fn root(&self) -> Option<NodeRef<'_, V, M>> {
        self.arena.root().map(|id| NodeRef::new(self, id))
    }

    /// Iterate over all entries in pre-order: a node, then its inner subtree, then its outer
    /// subtree. There is no other natural order in the tree.
    pub fn iter(&self) -> Iter<'_, V, M> {
        Iter::new(self)
    }

    /// Iterate over all stored positions, in the order of [`iter`][Self::iter].
    pub fn keys(&self) -> Keys<'_, V, M> {
        Keys { inner: self.iter() }
    }

    /// Iterate over all stored values, in the order of [`iter`][Self::iter].
    pub fn values(&self) -> Values<'_, V, M> {
        Values { inner: self.iter() }
    }

    /// Handles of the subtree rooted at `root`, in pre-order.
    pub(crate) fn preorder_ids(&self, root: NodeId) -> Vec<NodeId> {
        let mut stack: TinyVec<[NodeId; 32]> = TinyVec::new();
        stack.push(root);

        let mut order = vec![];
        while let Some(id) = stack.pop() {
            order.push(id);
            push_children(&mut stack, self.arena.get(id));
        }
        order
    }
}

#[inline]
fn push_children<V>(stack: &mut TinyVec<[NodeId; 32]>, node: &Node<V>) {
    // outer first so that the inner subtree is popped first
    if let Some(outer) = node.outer {
        stack.push(outer);
    }
    if let Some(inner) = node.inner {
        stack.push(inner);
    }
}

/// Pre-order iterator over the entries of a [`PspTree`].
#[derive(Debug)]
pub struct Iter<'a, V, M> {
    tree: &'a PspTree<V, M>,
    stack: TinyVec<[NodeId; 32]>,
    remaining: usize,
}

impl<'a, V, M> Iter<'a, V, M> {
    fn new(tree: &'a PspTree<V, M>) -> Self {
        let mut stack = TinyVec::new();
        if let Some(root) = tree.arena.root() {
            stack.push(root);
        }
        Self {
            tree,
            stack,
            remaining: tree.len,
        }
    }
}

impl<'a, V, M> Iterator for Iter<'a, V, M> {
    type Item = (&'a Position, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.arena.get(id);
        push_children(&mut self.stack, node);
        self.remaining = self.remaining.saturating_sub(1);
        let value = node.value.as_ref()?;
        Some((&node.position, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, M> ExactSizeIterator for Iter<'_, V, M> {}

impl<V, M> FusedIterator for Iter<'_, V, M> {}

/// Iterator over the positions of a [`PspTree`].
#[derive(Debug)]
pub struct Keys<'a, V, M> {
    inner: Iter<'a, V, M>,
}

impl<'a, V, M> Iterator for Keys<'a, V, M> {
    type Item = &'a Position;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(position, _)| position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, M> ExactSizeIterator for Keys<'_, V, M> {}

/// Iterator over the values of a [`PspTree`].
#[derive(Debug)]
pub struct Values<'a, V, M> {
    inner: Iter<'a, V, M>,
}

impl<'a, V, M> Iterator for Values<'a, V, M> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, M> ExactSizeIterator for Values<'_, V, M> {}

impl<'a, V, M> IntoIterator for &'a PspTree<V, M> {
    type Item = (&'a Position, &'a V);
    type IntoIter = Iter<'a, V, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
