use std::fmt;

use log::{debug, trace};

use crate::metric::{DistanceMetric, EuclideanDistance};
use crate::position::Position;
use crate::psptree::builder::{PspTreeBuilder, Sentinel};
use crate::psptree::node::{Node, NodeArena, NodeId, Side};
use crate::psptree::search::Neighbor;

/// A dynamic metric-space partitioning tree.
///
/// Every node splits the space around its own position: points within its split radius go to
/// the `inner` child, points beyond it to the `outer` child. A node's split radius is its
/// distance to the parent it was attached to, so the tree is built online, one insertion at a
/// time, and never rebalances. Its shape depends only on insertion order and the metric.
///
/// ```
/// use psp_tree::{PspTreeBuilder, Position};
/// use psp_tree::metric::ManhattanDistance;
///
/// let mut tree = PspTreeBuilder::new(2)
///     .metric(ManhattanDistance)
///     .finish()
///     .unwrap();
/// tree.insert(Position::new([0., 0.]), "origin");
/// tree.insert(Position::new([4., 2.]), "b");
///
/// let nearest = tree.nearest(&Position::new([3., 3.])).unwrap();
/// assert_eq!(*nearest.value, "b");
/// assert_eq!(nearest.distance, 2.);
/// ```
pub struct PspTree<V, M = EuclideanDistance> {
    pub(crate) arena: NodeArena<V>,
    pub(crate) metric: M,
    pub(crate) dimension: usize,
    pub(crate) len: usize,
    /// How the sentinel was placed, replayed by [`clear`][Self::clear].
    placement: Sentinel,
}

/// Result of a structural descent for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    /// A node already holds the position.
    Occupied(NodeId),
    /// The position is absent; `parent`'s slot on `side` is where it belongs.
    Vacant { parent: NodeId, side: Side },
}

impl<V, M: DistanceMetric> PspTree<V, M> {
    /// Create an empty tree with the default sentinel placement.
    ///
    /// Panics if `dimension` is zero. Use [`PspTreeBuilder`] to handle that case or to configure
    /// the sentinel.
    pub fn new(metric: M, dimension: usize) -> Self {
        match PspTreeBuilder::new(dimension).metric(metric).finish() {
            Ok(tree) => tree,
            Err(err) => panic!("invalid tree configuration: {err}"),
        }
    }

    pub(crate) fn from_parts(
        metric: M,
        dimension: usize,
        placement: Sentinel,
        sentinel: Position,
    ) -> Self {
        Self {
            arena: NodeArena::with_sentinel(sentinel),
            metric,
            dimension,
            len: 0,
            placement,
        }
    }

    /// The number of entries in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of coordinates every position in this tree must have.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The distance metric this tree was built with.
    #[inline]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The position of the synthetic root every real node descends from.
    pub fn sentinel_position(&self) -> &Position {
        &self.arena.sentinel().position
    }

    /// Insert `value` at `position`.
    ///
    /// If the position is already stored its value is replaced and the old value returned; the
    /// size of the tree does not change.
    pub fn insert(&mut self, position: Position, value: V) -> Option<V> {
        self.insert_entry(position, value).1
    }

    pub(crate) fn insert_entry(&mut self, position: Position, value: V) -> (NodeId, Option<V>) {
        self.assert_dimension(&position);
        match self.locate(&position) {
            Location::Occupied(id) => {
                let old = self.arena.get_mut(id).value.replace(value);
                (id, old)
            }
            Location::Vacant { parent, side } => {
                let id = self.arena.alloc(Node::new(position, Some(value)));
                self.attach(id, parent, side);
                self.len += 1;
                (id, None)
            }
        }
    }

    /// Access the value stored at `position`.
    pub fn get(&self, position: &Position) -> Option<&V> {
        let id = self.find(position)?;
        self.arena.get(id).value.as_ref()
    }

    /// Mutably access the value stored at `position`.
    pub fn get_mut(&mut self, position: &Position) -> Option<&mut V> {
        let id = self.find(position)?;
        self.arena.get_mut(id).value.as_mut()
    }

    /// Returns `true` if `position` is stored in this tree.
    pub fn contains(&self, position: &Position) -> bool {
        self.find(position).is_some()
    }

    /// Exact lookup: the nearest neighbor of `position`, kept only if it sits exactly there.
    pub(crate) fn find(&self, position: &Position) -> Option<NodeId> {
        self.assert_dimension(position);
        let best = self.nearest_candidate(position)?;
        (self.arena.get(best.id).position == *position).then_some(best.id)
    }

    /// Remove `position` from the tree, returning its value.
    pub fn delete(&mut self, position: &Position) -> Option<V> {
        self.remove_entry(position).map(|(_, value)| value)
    }

    /// Remove `position` from the tree, returning the stored position and its value.
    pub fn remove_entry(&mut self, position: &Position) -> Option<(Position, V)> {
        self.assert_dimension(position);
        match self.locate(position) {
            Location::Occupied(id) => self.remove_node(id),
            Location::Vacant { .. } => None,
        }
    }

    /// Return the `k` entries closest to `position`, in ascending order of distance.
    ///
    /// `k` is clamped to the size of the tree. The entries are found by repeatedly taking the
    /// nearest neighbor and deleting it, and are re-inserted before this returns, so the tree
    /// holds the same entries afterwards. Its shape may differ.
    pub fn k_nearest_neighbors(&mut self, position: &Position, k: usize) -> Vec<Neighbor<'_, V>> {
        self.assert_dimension(position);
        let k = k.min(self.len);

        let mut extracted = Vec::with_capacity(k);
        for _ in 0..k {
            let Some(best) = self.nearest_candidate(position) else {
                break;
            };
            if let Some((found, value)) = self.remove_node(best.id) {
                extracted.push((found, value, best.distance));
            }
        }

        debug!(
            "restoring {} entries extracted for k-nearest query at {}",
            extracted.len(),
            position
        );
        let mut restored = Vec::with_capacity(extracted.len());
        for (found, value, distance) in extracted {
            let (id, _) = self.insert_entry(found, value);
            restored.push((id, distance));
        }

        // stable, so entries at equal distance keep their extraction order
        restored.sort_by(|a, b| a.1.total_cmp(&b.1));
        let tree: &Self = self;
        restored
            .into_iter()
            .map(|(id, distance)| tree.neighbor(id, distance))
            .collect()
    }

    /// Remove every entry.
    ///
    /// The sentinel is regenerated from the [`Sentinel`] placement the tree was built with.
    pub fn clear(&mut self) {
        debug!("clearing tree with {} entries", self.len);
        // the placement was checked against the dimension when the tree was built
        let sentinel = self
            .placement
            .position(self.dimension)
            .unwrap_or_else(|_| self.arena.sentinel().position.clone());
        self.arena = NodeArena::with_sentinel(sentinel);
        self.len = 0;
    }

    #[inline]
    pub(crate) fn assert_dimension(&self, position: &Position) {
        assert_eq!(
            position.dim(),
            self.dimension,
            "position {} has {} coordinates, tree expects {}",
            position,
            position.dim(),
            self.dimension
        );
    }

    #[inline]
    pub(crate) fn distance_to(&self, id: NodeId, target: &Position) -> f64 {
        self.metric
            .distance(self.arena.get(id).position.coords(), target.coords())
    }

    /// The boundary test, given the already computed distance from `id` to the target.
    ///
    /// The sentinel sends every point outward so that its inner slot stays empty.
    #[inline]
    pub(crate) fn side_for_distance(&self, id: NodeId, distance: f64) -> Side {
        if id != NodeId::SENTINEL && distance <= self.arena.get(id).split_radius {
            Side::Inner
        } else {
            Side::Outer
        }
    }

    #[inline]
    pub(crate) fn side_of(&self, id: NodeId, target: &Position) -> Side {
        if id == NodeId::SENTINEL {
            return Side::Outer;
        }
        self.side_for_distance(id, self.distance_to(id, target))
    }

    /// Walk from the sentinel along the boundary tests for `target`. This is the same path the
    /// candidate descent of a nearest-neighbor search takes; it ends either at the node holding
    /// `target` or at the node whose empty slot `target` belongs in.
    pub(crate) fn locate(&self, target: &Position) -> Location {
        let mut parent = NodeId::SENTINEL;
        loop {
            let side = self.side_of(parent, target);
            match self.arena.get(parent).child(side) {
                Some(child) if self.arena.get(child).position == *target => {
                    return Location::Occupied(child)
                }
                Some(child) => parent = child,
                None => return Location::Vacant { parent, side },
            }
        }
    }

    /// Hang a detached node in `parent`'s empty slot, fixing its split radius to the distance
    /// from `parent`.
    fn attach(&mut self, id: NodeId, parent: NodeId, side: Side) {
        let split_radius = self.metric.distance(
            self.arena.get(parent).position.coords(),
            self.arena.get(id).position.coords(),
        );

        let node = self.arena.get_mut(id);
        debug_assert!(node.is_leaf(), "only detached leaves are attached");
        node.split_radius = split_radius;
        node.parent = Some(parent);
        trace!(
            "attached {} under {:?} with split radius {}",
            node.position,
            side,
            split_radius
        );

        let slot = self.arena.get_mut(parent).child_mut(side);
        debug_assert!(slot.is_none(), "attached into an occupied slot");
        *slot = Some(id);
    }

    /// Unlink `id` from its parent and free it, then re-attach its children.
    fn remove_node(&mut self, id: NodeId) -> Option<(Position, V)> {
        let node = self.arena.get(id);
        let parent = node.parent?;
        let (inner, outer) = (node.inner, node.outer);
        let side = self.arena.get(parent).slot_of(id)?;
        debug_assert_eq!(
            side,
            self.side_of(parent, &node.position),
            "slot disagrees with the boundary test"
        );

        *self.arena.get_mut(parent).child_mut(side) = None;
        let node = self.arena.free(id);
        self.len -= 1;
        trace!("detached {}", node.position);

        for subtree in [inner, outer].into_iter().flatten() {
            self.reattach_subtree(subtree);
        }

        let value = node.value?;
        Some((node.position, value))
    }

    /// Re-attach an orphaned subtree, root first.
    ///
    /// The root lands in the slot its old parent vacated, or deeper if that slot was refilled
    /// meanwhile. The root's split radius changes, and with it the partition of its children,
    /// so every descendant is detached and re-attached after it in pre-order.
    fn reattach_subtree(&mut self, root: NodeId) {
        let order = self.preorder_ids(root);
        debug!(
            "re-attaching subtree of {} nodes rooted at {}",
            order.len(),
            self.arena.get(root).position
        );

        for &id in &order {
            let node = self.arena.get_mut(id);
            node.parent = None;
            node.inner = None;
            node.outer = None;
        }

        for id in order {
            let location = self.locate(&self.arena.get(id).position);
            match location {
                Location::Vacant { parent, side } => self.attach(id, parent, side),
                Location::Occupied(other) => {
                    unreachable!("position of {:?} is already held by {:?}", id, other)
                }
            }
        }
    }
}

impl<V: fmt::Debug, M> fmt::Debug for PspTree<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display, M> fmt::Display for PspTree<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (position, value) in self.iter() {
            writeln!(f, "{}={} ;", position, value)?;
        }
        write!(f, "}}")
    }
}
