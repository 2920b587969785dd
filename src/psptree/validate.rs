use std::collections::HashSet;

use crate::error::{PspError, Result};
use crate::metric::DistanceMetric;
use crate::psptree::node::{NodeId, Side};
use crate::psptree::PspTree;

impl<V, M: DistanceMetric> PspTree<V, M> {
    /// Check the structural invariants of the tree.
    ///
    /// - the sentinel has split radius 0, no value, no parent and an empty inner slot;
    /// - every node's parent link points at the node whose slot holds it;
    /// - every node's split radius equals its distance to its parent;
    /// - every position below a node's inner child is within that node's split radius, every
    ///   position below its outer child is beyond it;
    /// - positions are unique, have the tree's dimension, and their count matches
    ///   [`len`][Self::len].
    ///
    /// This visits every node once per ancestor, so it is meant for tests and debugging.
    pub fn validate(&self) -> Result<()> {
        let sentinel = self.arena.sentinel();
        if sentinel.split_radius != 0.0
            || sentinel.value.is_some()
            || sentinel.parent.is_some()
            || sentinel.inner.is_some()
        {
            return Err(violation("sentinel has been modified".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.len);
        // ancestors of the current node with the side taken below each of them
        let mut path: Vec<(NodeId, Side)> = vec![];
        // (node, path length at its parent, edge from its parent)
        let mut stack: Vec<(NodeId, usize, Option<(NodeId, Side)>)> = vec![];
        if let Some(root) = self.arena.root() {
            stack.push((root, 0, None));
        }

        while let Some((id, depth, edge)) = stack.pop() {
            path.truncate(depth);
            if let Some(edge) = edge {
                path.push(edge);
            }

            let node = self.arena.get(id);
            let expected_parent = edge.map_or(NodeId::SENTINEL, |(parent, _)| parent);
            if node.parent != Some(expected_parent) {
                return Err(violation(format!(
                    "{} has a stale parent link",
                    node.position
                )));
            }
            if node.value.is_none() {
                return Err(violation(format!("{} has no value", node.position)));
            }
            if node.position.dim() != self.dimension {
                return Err(PspError::DimensionMismatch {
                    expected: self.dimension,
                    found: node.position.dim(),
                });
            }
            if !seen.insert(&node.position) {
                return Err(violation(format!("{} is stored twice", node.position)));
            }

            let parent_distance = self.metric.distance(
                self.arena.get(expected_parent).position.coords(),
                node.position.coords(),
            );
            if node.split_radius != parent_distance {
                return Err(violation(format!(
                    "{} has split radius {} but is {} from its parent",
                    node.position, node.split_radius, parent_distance
                )));
            }

            for &(ancestor, side) in &path {
                let ancestor = self.arena.get(ancestor);
                let distance = self
                    .metric
                    .distance(ancestor.position.coords(), node.position.coords());
                let inside = distance <= ancestor.split_radius;
                if inside != (side == Side::Inner) {
                    return Err(violation(format!(
                        "{} is {} from {} with split radius {} but sits on its {:?} side",
                        node.position, distance, ancestor.position, ancestor.split_radius, side
                    )));
                }
            }

            let depth = path.len();
            if let Some(outer) = node.outer {
                stack.push((outer, depth, Some((id, Side::Outer))));
            }
            if let Some(inner) = node.inner {
                stack.push((inner, depth, Some((id, Side::Inner))));
            }
        }

        if seen.len() != self.len {
            return Err(violation(format!(
                "reached {} nodes but the tree reports {}",
                seen.len(),
                self.len
            )));
        }
        if self.arena.live() != self.len + 1 {
            return Err(violation(format!(
                "{} nodes allocated for {} entries",
                self.arena.live() - 1,
                self.len
            )));
        }
        Ok(())
    }
}

fn violation(message: String) -> PspError {
    PspError::InvariantViolation(message)
}
