//! An implementation of a dynamic, unbalanced metric-space partitioning tree.

#![warn(missing_docs)]

mod builder;
pub(crate) mod node;
mod search;
mod traversal;
mod tree;
mod validate;

pub use builder::{PspTreeBuilder, Sentinel};
pub use search::Neighbor;
pub use traversal::{Iter, Keys, NodeRef, Values};
pub use tree::PspTree;
