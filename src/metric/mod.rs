//! Distance metrics for partitioning and searching the tree.
//!
//! This module provides the [`DistanceMetric`] trait the tree is generic over, together with
//! Euclidean, squared Euclidean and Manhattan implementations. With the `use-geo_0_31` feature,
//! Haversine and Spheroid distances for `(lon, lat)` positions are available as well.

#[cfg(feature = "use-geo_0_31")]
mod geo;

use std::str::FromStr;

use crate::error::PspError;

#[cfg(feature = "use-geo_0_31")]
pub use geo::{HaversineDistance, SpheroidDistance};

/// A distance function over coordinate slices of equal length.
///
/// Implementations must be symmetric (`d(a, b) == d(b, a)`) and non-negative. The tree also
/// assumes the triangle inequality when it decides which subtree to search; a function that
/// breaks it is still accepted, but nearest-neighbor answers can be wrong.
pub trait DistanceMetric {
    /// Calculate the distance between two points.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Whether this function satisfies the triangle inequality.
    fn satisfies_triangle_inequality(&self) -> bool {
        true
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).distance(a, b)
    }

    fn satisfies_triangle_inequality(&self) -> bool {
        (**self).satisfies_triangle_inequality()
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for Box<M> {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).distance(a, b)
    }

    fn satisfies_triangle_inequality(&self) -> bool {
        (**self).satisfies_triangle_inequality()
    }
}

/// Euclidean distance metric.
///
/// The standard straight-line distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanDistance;

impl DistanceMetric for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        SquaredEuclideanDistance.distance(a, b).sqrt()
    }
}

/// Squared Euclidean distance.
///
/// Cheaper than [`EuclideanDistance`] since it skips the square root, but it does **not** satisfy
/// the triangle inequality, so nearest-neighbor results computed with it may be wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclideanDistance;

impl DistanceMetric for SquaredEuclideanDistance {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "points must be of equal dimension");
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }

    fn satisfies_triangle_inequality(&self) -> bool {
        false
    }
}

/// Manhattan (taxicab, L1) distance metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManhattanDistance;

impl DistanceMetric for ManhattanDistance {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "points must be of equal dimension");
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// A metric chosen at runtime, e.g. from a configuration value.
///
/// ```
/// use psp_tree::metric::{DistanceMetric, MetricKind};
///
/// let metric: MetricKind = "manhattan".parse().unwrap();
/// assert_eq!(metric.distance(&[0., 0.], &[3., 4.]), 7.);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricKind {
    /// [`EuclideanDistance`]
    #[default]
    Euclidean,
    /// [`SquaredEuclideanDistance`]
    SquaredEuclidean,
    /// [`ManhattanDistance`]
    Manhattan,
}

impl MetricKind {
    /// The name this metric is parsed from.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => "euclidean",
            MetricKind::SquaredEuclidean => "squared-euclidean",
            MetricKind::Manhattan => "manhattan",
        }
    }
}

impl DistanceMetric for MetricKind {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            MetricKind::Euclidean => EuclideanDistance.distance(a, b),
            MetricKind::SquaredEuclidean => SquaredEuclideanDistance.distance(a, b),
            MetricKind::Manhattan => ManhattanDistance.distance(a, b),
        }
    }

    fn satisfies_triangle_inequality(&self) -> bool {
        !matches!(self, MetricKind::SquaredEuclidean)
    }
}

impl FromStr for MetricKind {
    type Err = PspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "euclidean" | "l2" => Ok(MetricKind::Euclidean),
            "squared-euclidean" | "sqeuclidean" => Ok(MetricKind::SquaredEuclidean),
            "manhattan" | "l1" | "taxicab" => Ok(MetricKind::Manhattan),
            _ => Err(PspError::UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let distance = EuclideanDistance.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert_relative_eq!(distance, 5.0);

        // the difference is squared, not the coordinates
        let distance = EuclideanDistance.distance(&[1.0, 1.0], &[1.0, 1.0]);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_squared_euclidean_distance() {
        let distance = SquaredEuclideanDistance.distance(&[0.0, 0.0, 5.0, 3.0], &[4.0, 2.0, -8.0, 6.0]);
        assert_eq!(distance, 16.0 + 4.0 + 169.0 + 9.0);
        assert!(!SquaredEuclideanDistance.satisfies_triangle_inequality());
    }

    #[test]
    fn test_squared_euclidean_breaks_triangle_inequality() {
        let a = [0.0];
        let b = [1.0];
        let c = [2.0];
        let m = SquaredEuclideanDistance;
        assert!(m.distance(&a, &c) > m.distance(&a, &b) + m.distance(&b, &c));
    }

    #[test]
    fn test_manhattan_distance() {
        let distance = ManhattanDistance.distance(&[-4.0, -6.0], &[0.0, -3.0]);
        assert_eq!(distance, 7.0);
        assert!(ManhattanDistance.satisfies_triangle_inequality());
    }

    #[test]
    fn test_metric_kind_from_str() {
        assert_eq!("Euclidean".parse::<MetricKind>(), Ok(MetricKind::Euclidean));
        assert_eq!(
            "squared_euclidean".parse::<MetricKind>(),
            Ok(MetricKind::SquaredEuclidean)
        );
        assert_eq!(" l1 ".parse::<MetricKind>(), Ok(MetricKind::Manhattan));
        assert_eq!(
            "cosine".parse::<MetricKind>(),
            Err(PspError::UnknownMetric("cosine".to_string()))
        );

        for kind in [
            MetricKind::Euclidean,
            MetricKind::SquaredEuclidean,
            MetricKind::Manhattan,
        ] {
            assert_eq!(kind.name().parse::<MetricKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_boxed_metric() {
        let metric: Box<dyn DistanceMetric> = Box::new(SquaredEuclideanDistance);
        assert_eq!(metric.distance(&[1.0], &[3.0]), 4.0);
        assert!(!metric.satisfies_triangle_inequality());
    }
}
