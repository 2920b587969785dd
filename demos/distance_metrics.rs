//! Demonstrates how the choice of distance metric changes nearest-neighbor answers.
//!
//! Pass a metric name (`euclidean`, `squared-euclidean`, `manhattan`) as the first argument to
//! run the last section with that metric. Build with `--features use-geo_0_31` to include the
//! geographic metrics.

use std::env;

use psp_tree::metric::{DistanceMetric, EuclideanDistance, ManhattanDistance, MetricKind};
use psp_tree::{Position, PspTreeBuilder, PspTreeMap};

fn main() {
    println!("=== Distance Metrics Example ===\n");

    println!("1. Euclidean Distance:");
    nearest_example(EuclideanDistance);

    println!("\n2. Manhattan Distance:");
    nearest_example(ManhattanDistance);

    #[cfg(feature = "use-geo_0_31")]
    {
        println!("\n3. Haversine Distance (lon, lat):");
        geographic_example();
    }

    println!("\n4. k nearest neighbors with a metric chosen at runtime:");
    let metric = match env::args().nth(1) {
        Some(name) => match name.parse::<MetricKind>() {
            Ok(metric) => metric,
            Err(err) => {
                eprintln!("  {err}; falling back to euclidean");
                MetricKind::default()
            }
        },
        None => MetricKind::default(),
    };
    runtime_metric_example(metric);
}

fn nearest_example<M: DistanceMetric>(metric: M) {
    let mut tree = PspTreeBuilder::new(2).metric(metric).finish().unwrap();
    tree.insert(Position::new([3.0, 0.0]), "A"); // 3 away along an axis
    tree.insert(Position::new([2.0, 2.0]), "B"); // 2.83 straight, 4 by blocks

    let query = Position::new([0.0, 0.0]);
    let nearest = tree.nearest(&query).unwrap();
    println!("  Query point: {}", query);
    println!(
        "  Nearest: {} at {} (distance {:.3})",
        nearest.value, nearest.position, nearest.distance
    );
}

#[cfg(feature = "use-geo_0_31")]
fn geographic_example() {
    use psp_tree::metric::HaversineDistance;

    let mut tree = PspTreeBuilder::new(2)
        .metric(HaversineDistance)
        .finish()
        .unwrap();
    tree.insert(Position::new([-0.1, 51.5]), "London");
    tree.insert(Position::new([2.35, 48.86]), "Paris");
    tree.insert(Position::new([-74.0, 40.7]), "New York");

    let query = Position::new([-3.7, 40.4]); // Madrid
    let nearest = tree.nearest(&query).unwrap();
    println!(
        "  Nearest to Madrid: {} ({:.0} km)",
        nearest.value,
        nearest.distance / 1000.0
    );
}

fn runtime_metric_example(metric: MetricKind) {
    let mut map = PspTreeMap::from_builder(PspTreeBuilder::new(2).metric(metric)).unwrap();
    map.put_all([
        (Position::new([0.0, 0.0]), "A"),
        (Position::new([4.0, 2.0]), "B"),
        (Position::new([5.0, 1.0]), "C"),
        (Position::new([-4.0, -6.0]), "D"),
        (Position::new([0.0, -3.0]), "E"),
        (Position::new([7.0, 10.0]), "F"),
    ]);

    let query = Position::new([1.0, 1.0]);
    println!("  Metric: {}", metric.name());
    for neighbor in map.k_nearest_neighbors(&query, 3) {
        println!(
            "  {} at {} (distance {:.3})",
            neighbor.value, neighbor.position, neighbor.distance
        );
    }
    println!("  Entries after the query: {}", map.len());
}
