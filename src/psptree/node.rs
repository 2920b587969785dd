//! Arena storage for tree nodes.

use crate::position::Position;

/// Handle of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The sentinel always occupies the first slot.
    pub(crate) const SENTINEL: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which half of a node's split a point falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// Within or on the split radius.
    Inner,
    /// Strictly beyond the split radius.
    Outer,
}

impl Side {
    #[inline]
    pub(crate) fn flip(self) -> Self {
        match self {
            Side::Inner => Side::Outer,
            Side::Outer => Side::Inner,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) position: Position,
    /// Distance to `parent` when this node was last attached. Also the threshold splitting this
    /// node's children.
    pub(crate) split_radius: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) inner: Option<NodeId>,
    pub(crate) outer: Option<NodeId>,
    /// `None` only for the sentinel.
    pub(crate) value: Option<V>,
}

impl<V> Node<V> {
    pub(crate) fn new(position: Position, value: Option<V>) -> Self {
        Self {
            position,
            split_radius: f64::INFINITY,
            parent: None,
            inner: None,
            outer: None,
            value,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Inner => self.inner,
            Side::Outer => self.outer,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Inner => &mut self.inner,
            Side::Outer => &mut self.outer,
        }
    }

    /// The side whose slot holds `child`, if any.
    #[inline]
    pub(crate) fn slot_of(&self, child: NodeId) -> Option<Side> {
        if self.inner == Some(child) {
            Some(Side::Inner)
        } else if self.outer == Some(child) {
            Some(Side::Outer)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.inner.is_none() && self.outer.is_none()
    }
}

/// Slot storage for nodes. Parent links are handles into this arena, so ownership of every node
/// stays with the arena and no reference cycles exist.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<NodeId>,
}

impl<V> NodeArena<V> {
    /// Create an arena holding only the sentinel.
    pub(crate) fn with_sentinel(sentinel: Position) -> Self {
        let mut root = Node::new(sentinel, None);
        root.split_radius = 0.0;
        Self {
            slots: vec![Some(root)],
            free: vec![],
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            id
        } else {
            let id = NodeId(
                self.slots
                    .len()
                    .try_into()
                    .expect("PSP tree cannot hold more than u32::MAX nodes"),
            );
            self.slots.push(Some(node));
            id
        }
    }

    pub(crate) fn free(&mut self, id: NodeId) -> Node<V> {
        debug_assert_ne!(id, NodeId::SENTINEL, "the sentinel is never freed");
        let node = self.slots[id.index()]
            .take()
            .expect("freed a node that is not allocated");
        self.free.push(id);
        node
    }

    /// Number of live slots, the sentinel included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<V> {
        self.slots[id.index()]
            .as_ref()
            .expect("dangling node handle")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.slots[id.index()]
            .as_mut()
            .expect("dangling node handle")
    }

    #[inline]
    pub(crate) fn sentinel(&self) -> &Node<V> {
        self.get(NodeId::SENTINEL)
    }

    /// The real root of the tree.
    #[inline]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.sentinel().outer
    }
}
