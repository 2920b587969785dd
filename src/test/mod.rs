//! Fixtures shared between the unit tests of different modules.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Position;

pub(crate) fn scenario_positions_2d() -> [Position; 6] {
    [
        Position::new([0.0, 0.0]),
        Position::new([4.0, 2.0]),
        Position::new([5.0, 1.0]),
        Position::new([-4.0, -6.0]),
        Position::new([0.0, -3.0]),
        Position::new([7.0, 10.0]),
    ]
}

/// Six labelled 2-D entries, in insertion order.
pub(crate) fn scenario_2d() -> Vec<(Position, &'static str)> {
    scenario_positions_2d()
        .into_iter()
        .zip(["A", "B", "C", "D", "E", "F"])
        .collect()
}

/// Four labelled 4-D entries, in insertion order.
pub(crate) fn scenario_4d() -> Vec<(Position, &'static str)> {
    vec![
        (Position::new([0.0, 0.0, 5.0, 3.0]), "A"),
        (Position::new([4.0, 2.0, -8.0, 6.0]), "B"),
        (Position::new([5.0, 1.0, -4.0, 0.0]), "C"),
        (Position::new([-4.0, -6.0, 0.0, 0.0]), "D"),
    ]
}

/// Integer grid points in 2-D, in a scrambled order.
pub(crate) fn points() -> Vec<Position> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
        [49, 60],
        [4, 98],
        [71, 15],
        [60, 25],
        [38, 84],
        [52, 38],
        [94, 51],
        [13, 25],
        [77, 73],
        [88, 87],
    ];
    coords
        .iter()
        .map(|c| Position::try_from_numbers(c).unwrap())
        .collect()
}

/// `n` reproducible random positions with coordinates in `[-100, 100)`.
pub(crate) fn random_positions(n: usize, dimension: usize, seed: u64) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Position::new(
                (0..dimension)
                    .map(|_| rng.gen_range(-100.0..100.0))
                    .collect::<Vec<f64>>(),
            )
        })
        .collect()
}
