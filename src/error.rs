use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PspError {
    /// A tree cannot be built over a zero-dimensional space.
    #[error("Dimension must be at least 1")]
    ZeroDimension,

    /// A position had a different number of coordinates than the tree expects.
    #[error("Dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A coordinate was NaN or infinite.
    #[error("Coordinate on axis {axis} is not finite")]
    NonFiniteCoordinate { axis: usize },

    /// A coordinate could not be represented as an `f64`.
    #[error("Coordinate on axis {axis} is not representable as f64")]
    NonNumericCoordinate { axis: usize },

    /// No metric is registered under this name.
    #[error("Unknown distance metric: {0}")]
    UnknownMetric(String),

    /// A structural invariant of the tree does not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, PspError>;
