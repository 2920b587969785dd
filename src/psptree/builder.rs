use log::warn;
use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PspError, Result};
use crate::metric::{DistanceMetric, EuclideanDistance};
use crate::position::Position;
use crate::psptree::PspTree;

/// Fractional part of the golden ratio, used to spread the default sentinel over the unit cube.
const GOLDEN_FRACTION: f64 = 0.618_033_988_749_894_9;

/// Where the synthetic root of a tree is placed.
///
/// The sentinel only sets the split radius of the first real node, so any point works; the
/// defaults sit strictly inside the unit hypercube at coordinates unlikely to be inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Sentinel {
    /// A fixed point with coordinates `frac((i + 1) * 0.618...)` on axis `i`.
    #[default]
    Fixed,
    /// A uniformly random point in the open unit hypercube, from a seeded generator.
    Seeded(u64),
    /// An explicit point. Must have the tree's dimension.
    At(Position),
}

impl Sentinel {
    pub(crate) fn position(&self, dimension: usize) -> Result<Position> {
        let position = match self {
            Sentinel::Fixed => Position::new(
                (1..=dimension)
                    .map(|i| {
                        let c = (i as f64 * GOLDEN_FRACTION).fract();
                        if c > 0.0 {
                            c
                        } else {
                            0.5
                        }
                    })
                    .collect::<Vec<_>>(),
            ),
            Sentinel::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                Position::new(
                    (0..dimension)
                        .map(|_| rng.sample::<f64, _>(Open01))
                        .collect::<Vec<_>>(),
                )
            }
            Sentinel::At(position) => {
                if position.dim() != dimension {
                    return Err(PspError::DimensionMismatch {
                        expected: dimension,
                        found: position.dim(),
                    });
                }
                position.clone()
            }
        };
        Ok(position)
    }
}

/// A builder to configure and create a [`PspTree`].
///
/// ```
/// use psp_tree::{PspTreeBuilder, Sentinel};
/// use psp_tree::metric::ManhattanDistance;
///
/// let tree = PspTreeBuilder::new(3)
///     .metric(ManhattanDistance)
///     .sentinel(Sentinel::Seeded(42))
///     .finish::<&str>()
///     .unwrap();
/// assert!(tree.is_empty());
/// assert_eq!(tree.dimension(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PspTreeBuilder<M = EuclideanDistance> {
    dimension: usize,
    metric: M,
    sentinel: Sentinel,
}

impl PspTreeBuilder<EuclideanDistance> {
    /// Create a new builder for a tree over `dimension`-dimensional positions, using the
    /// Euclidean metric and the fixed sentinel by default.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            metric: EuclideanDistance,
            sentinel: Sentinel::default(),
        }
    }
}

impl<M> PspTreeBuilder<M> {
    /// Use `metric` to measure distances.
    pub fn metric<M2: DistanceMetric>(self, metric: M2) -> PspTreeBuilder<M2> {
        PspTreeBuilder {
            dimension: self.dimension,
            metric,
            sentinel: self.sentinel,
        }
    }

    /// Place the sentinel according to `sentinel`.
    pub fn sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// The dimension the tree will have.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl<M: DistanceMetric> PspTreeBuilder<M> {
    /// Consume this builder, creating an empty tree.
    pub fn finish<V>(self) -> Result<PspTree<V, M>> {
        if self.dimension == 0 {
            return Err(PspError::ZeroDimension);
        }
        let sentinel = self.sentinel.position(self.dimension)?;
        if !self.metric.satisfies_triangle_inequality() {
            warn!(
                "building a PSP tree with a distance that breaks the triangle inequality; \
                 nearest-neighbor results may be wrong"
            );
        }
        Ok(PspTree::from_parts(
            self.metric,
            self.dimension,
            self.sentinel,
            sentinel,
        ))
    }
}
