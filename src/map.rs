//! A map interface over [`PspTree`].

use std::fmt;
use std::ops::Index;

use crate::error::Result;
use crate::metric::{DistanceMetric, EuclideanDistance};
use crate::position::Position;
use crate::psptree::{Iter, Keys, Neighbor, PspTree, PspTreeBuilder, Values};

/// A map from [`Position`]s to values, backed by a [`PspTree`].
///
/// ```
/// use psp_tree::{Position, PspTreeMap};
/// use psp_tree::metric::EuclideanDistance;
///
/// let mut map = PspTreeMap::new(EuclideanDistance, 1);
/// for i in 0..=30 {
///     map.put(Position::new([i as f64]), i);
/// }
///
/// let nearest = map.k_nearest_neighbors(&Position::new([10.0]), 3);
/// assert_eq!(nearest.len(), 3);
/// assert_eq!(*nearest[0].value, 10);
/// assert!(nearest.windows(2).all(|w| w[0].distance <= w[1].distance));
///
/// // entries extracted by the query are back in place
/// assert_eq!(map.len(), 31);
/// assert_eq!(map.get(&Position::new([10.0])), Some(&10));
/// ```
pub struct PspTreeMap<V, M = EuclideanDistance> {
    tree: PspTree<V, M>,
}

impl<V, M: DistanceMetric> PspTreeMap<V, M> {
    /// Create an empty map over `dimension`-dimensional positions.
    ///
    /// Panics if `dimension` is zero.
    pub fn new(metric: M, dimension: usize) -> Self {
        Self {
            tree: PspTree::new(metric, dimension),
        }
    }

    /// Create an empty map from a configured builder.
    pub fn from_builder(builder: PspTreeBuilder<M>) -> Result<Self> {
        Ok(Self {
            tree: builder.finish()?,
        })
    }

    /// The number of entries in this map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of coordinates every key must have.
    pub fn dimension(&self) -> usize {
        self.tree.dimension()
    }

    /// The distance metric of the underlying tree.
    pub fn metric(&self) -> &M {
        self.tree.metric()
    }

    /// Associate `value` with `position`, returning the value previously stored there.
    pub fn put(&mut self, position: Position, value: V) -> Option<V> {
        self.tree.insert(position, value)
    }

    /// Put every entry of `entries` into the map.
    pub fn put_all<I: IntoIterator<Item = (Position, V)>>(&mut self, entries: I) {
        for (position, value) in entries {
            self.put(position, value);
        }
    }

    /// The value stored at `position`.
    pub fn get(&self, position: &Position) -> Option<&V> {
        self.tree.get(position)
    }

    /// A mutable reference to the value stored at `position`.
    pub fn get_mut(&mut self, position: &Position) -> Option<&mut V> {
        self.tree.get_mut(position)
    }

    /// Remove the entry at `position`, returning its value.
    pub fn remove(&mut self, position: &Position) -> Option<V> {
        self.tree.delete(position)
    }

    /// Returns `true` if the map has an entry at `position`.
    pub fn contains_key(&self, position: &Position) -> bool {
        self.tree.contains(position)
    }

    /// Returns `true` if any entry holds `value`. This scans the whole map.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// The entry closest to `position`; see [`PspTree::nearest`].
    pub fn nearest(&self, position: &Position) -> Option<Neighbor<'_, V>> {
        self.tree.nearest(position)
    }

    /// The `k` entries closest to `position` in ascending order of distance; see
    /// [`PspTree::k_nearest_neighbors`].
    pub fn k_nearest_neighbors(&mut self, position: &Position, k: usize) -> Vec<Neighbor<'_, V>> {
        self.tree.k_nearest_neighbors(position, k)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.tree.clear()
    }

    /// All entries, collected in pre-order.
    pub fn entries(&self) -> Vec<(&Position, &V)> {
        self.iter().collect()
    }
}

impl<V, M> PspTreeMap<V, M> {
    /// Iterate over all entries in pre-order.
    pub fn iter(&self) -> Iter<'_, V, M> {
        self.tree.iter()
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> Keys<'_, V, M> {
        self.tree.keys()
    }

    /// Iterate over all values.
    pub fn values(&self) -> Values<'_, V, M> {
        self.tree.values()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &PspTree<V, M> {
        &self.tree
    }

    /// Consume the map, returning the underlying tree.
    pub fn into_tree(self) -> PspTree<V, M> {
        self.tree
    }
}

impl<V, M> From<PspTree<V, M>> for PspTreeMap<V, M> {
    fn from(tree: PspTree<V, M>) -> Self {
        Self { tree }
    }
}

impl<V, M: DistanceMetric> Extend<(Position, V)> for PspTreeMap<V, M> {
    fn extend<I: IntoIterator<Item = (Position, V)>>(&mut self, iter: I) {
        self.put_all(iter)
    }
}

impl<V, M: DistanceMetric> Index<&Position> for PspTreeMap<V, M> {
    type Output = V;

    /// Panics if the position is not stored.
    fn index(&self, position: &Position) -> &V {
        match self.get(position) {
            Some(value) => value,
            None => panic!("no entry found for position {position}"),
        }
    }
}

impl<'a, V, M> IntoIterator for &'a PspTreeMap<V, M> {
    type Item = (&'a Position, &'a V);
    type IntoIter = Iter<'a, V, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, M> fmt::Debug for PspTreeMap<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<V: fmt::Display, M> fmt::Display for PspTreeMap<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}
