use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
#[cfg(feature = "use-geo_0_31")]
use psp_tree::metric::{HaversineDistance, SpheroidDistance};
use psp_tree::metric::{
    DistanceMetric, EuclideanDistance, ManhattanDistance, MetricKind, SquaredEuclideanDistance,
};
use psp_tree::{Position, PspTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_points(n: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Position::new([rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)]))
        .collect()
}

fn build_tree<M: DistanceMetric>(metric: M, points: &[Position]) -> PspTree<usize, M> {
    let mut tree = PspTree::new(metric, 2);
    for (i, point) in points.iter().enumerate() {
        tree.insert(point.clone(), i);
    }
    tree
}

fn benchmark_distance_calculations(c: &mut Criterion) {
    let p1 = [-74.0, 40.7]; // New York
    let p2 = [-0.1, 51.5]; // London

    let mut group = c.benchmark_group("distance_calculation");

    group.bench_function("euclidean", |b| {
        b.iter(|| EuclideanDistance.distance(&p1, &p2))
    });
    group.bench_function("squared_euclidean", |b| {
        b.iter(|| SquaredEuclideanDistance.distance(&p1, &p2))
    });
    group.bench_function("manhattan", |b| {
        b.iter(|| ManhattanDistance.distance(&p1, &p2))
    });
    group.bench_function("metric_kind_euclidean", |b| {
        b.iter(|| MetricKind::Euclidean.distance(&p1, &p2))
    });

    #[cfg(feature = "use-geo_0_31")]
    {
        group.bench_function("haversine", |b| {
            b.iter(|| HaversineDistance.distance(&p1, &p2))
        });
        group.bench_function("spheroid", |b| {
            b.iter(|| SpheroidDistance.distance(&p1, &p2))
        });
    }

    group.finish();
}

fn benchmark_nearest_by_metric(c: &mut Criterion) {
    let query = Position::new([0.0, 0.0]);

    for size in [100, 1000] {
        let points = generate_points(size);
        let euclidean = build_tree(EuclideanDistance, &points);
        let manhattan = build_tree(ManhattanDistance, &points);
        let dynamic = build_tree(MetricKind::Euclidean, &points);

        let mut group = c.benchmark_group("nearest_by_metric");
        group.bench_with_input(BenchmarkId::new("euclidean", size), &size, |b, _| {
            b.iter(|| euclidean.nearest(&query))
        });
        group.bench_with_input(BenchmarkId::new("manhattan", size), &size, |b, _| {
            b.iter(|| manhattan.nearest(&query))
        });
        group.bench_with_input(BenchmarkId::new("metric_kind", size), &size, |b, _| {
            b.iter(|| dynamic.nearest(&query))
        });

        #[cfg(feature = "use-geo_0_31")]
        {
            let haversine = build_tree(HaversineDistance, &points);
            group.bench_with_input(BenchmarkId::new("haversine", size), &size, |b, _| {
                b.iter(|| haversine.nearest(&query))
            });
        }

        group.finish();
    }
}

criterion_group!(
    benches,
    benchmark_distance_calculations,
    benchmark_nearest_by_metric
);
criterion_main!(benches);
