//! Geographic distance metrics over `(lon, lat)` positions in degrees.

use geo_0_31::algorithm::{Distance, Geodesic, Haversine};
use geo_0_31::Point;

use crate::metric::DistanceMetric;

/// Haversine distance metric.
///
/// This calculates the great-circle distance between two points on a sphere, in meters.
/// Positions must be two-dimensional `(longitude, latitude)` pairs in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistance;

impl DistanceMetric for HaversineDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        Haversine.distance(lon_lat(a), lon_lat(b))
    }
}

/// Spheroid distance metric (using Geodesic/Karney's formula).
///
/// The shortest distance between two points on the surface of the WGS84 ellipsoid, in meters.
/// Positions must be two-dimensional `(longitude, latitude)` pairs in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpheroidDistance;

impl DistanceMetric for SpheroidDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        Geodesic.distance(lon_lat(a), lon_lat(b))
    }
}

#[inline]
fn lon_lat(coords: &[f64]) -> Point<f64> {
    assert_eq!(coords.len(), 2, "geographic positions must be (lon, lat)");
    Point::new(coords[0], coords[1])
}
