#![doc = include_str!("../README.md")]

mod error;
pub mod map;
pub mod metric;
mod position;
pub mod psptree;

pub use error::{PspError, Result};
pub use map::PspTreeMap;
pub use position::Position;
pub use psptree::{Neighbor, NodeRef, PspTree, PspTreeBuilder, Sentinel};

#[cfg(test)]
pub(crate) mod test;
