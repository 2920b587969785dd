//! Nearest-neighbor search.

use crate::metric::DistanceMetric;
use crate::position::Position;
use crate::psptree::node::NodeId;
use crate::psptree::PspTree;

/// An entry returned from a neighbor query, with its distance to the query point.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, V> {
    /// The stored position.
    pub position: &'a Position,
    /// The value stored at `position`.
    pub value: &'a V,
    /// Distance from the query point to `position`.
    pub distance: f64,
}

// Manual impls so that `V` does not need to be `Clone`.
impl<V> Clone for Neighbor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Neighbor<'_, V> {}

/// The best node found so far and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) id: NodeId,
    pub(crate) distance: f64,
}

impl<V, M: DistanceMetric> PspTree<V, M> {
    /// Find the stored entry closest to `position`.
    ///
    /// The search walks one root-to-leaf path, then reconsiders the subtree on the far side of
    /// the best node found, and repeats from there. It does not backtrack into every ancestor's
    /// far side, so with enough branching it can miss the true nearest neighbor. A position that
    /// is stored in the tree is always found exactly.
    ///
    /// Returns `None` if the tree is empty.
    pub fn nearest(&self, position: &Position) -> Option<Neighbor<'_, V>> {
        self.assert_dimension(position);
        let best = self.nearest_candidate(position)?;
        Some(self.neighbor(best.id, best.distance))
    }

    pub(crate) fn nearest_candidate(&self, target: &Position) -> Option<Candidate> {
        let root = self.arena.root()?;
        Some(self.nearest_from(root, target, f64::INFINITY))
    }

    /// Two-phase search starting at `start`, with `bound` the best distance already known.
    ///
    /// Each round descends from `start` to a local candidate, then starts the next round at that
    /// candidate's child on the side opposite the target. A later round's candidate replaces the
    /// result only when strictly closer.
    pub(crate) fn nearest_from(&self, start: NodeId, target: &Position, bound: f64) -> Candidate {
        let (mut best, mut bound) = self.candidate_descent(start, target, bound);
        let mut candidate = best;

        loop {
            let side = self.side_for_distance(candidate.id, candidate.distance);
            let Some(sibling) = self.arena.get(candidate.id).child(side.flip()) else {
                break;
            };
            let (next, next_bound) = self.candidate_descent(sibling, target, bound);
            bound = next_bound;
            if next.distance < best.distance {
                best = next;
            }
            candidate = next;
        }

        best
    }

    /// Follow the boundary tests from `start` to a leaf, keeping the closest node that beats
    /// `bound`. Falls back to `start` itself when nothing does.
    fn candidate_descent(&self, start: NodeId, target: &Position, mut bound: f64) -> (Candidate, f64) {
        let start_distance = self.distance_to(start, target);
        let mut candidate = Candidate {
            id: start,
            distance: start_distance,
        };

        let mut cursor = Some((start, start_distance));
        while let Some((id, distance)) = cursor {
            if distance < bound {
                bound = distance;
                candidate = Candidate { id, distance };
            }
            let side = self.side_for_distance(id, distance);
            cursor = self
                .arena
                .get(id)
                .child(side)
                .map(|child| (child, self.distance_to(child, target)));
        }

        (candidate, bound)
    }

    pub(crate) fn neighbor(&self, id: NodeId, distance: f64) -> Neighbor<'_, V> {
        let node = self.arena.get(id);
        Neighbor {
            position: &node.position,
            value: node
                .value
                .as_ref()
                .expect("neighbor queries never return the sentinel"),
            distance,
        }
    }
}
