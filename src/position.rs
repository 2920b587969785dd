//! The key type stored in a [`PspTree`][crate::PspTree].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use geo_traits::CoordTrait;
use num_traits::ToPrimitive;

use crate::error::{PspError, Result};

/// An immutable point in a D-dimensional space.
///
/// Two positions are equal when all of their coordinates are equal. `-0.0` is stored as `0.0`,
/// and NaN or infinite coordinates are rejected, so equality is total and consistent with [`Hash`]
/// and every distance between positions is finite.
#[derive(Clone, PartialEq)]
pub struct Position {
    coords: Box<[f64]>,
}

impl Position {
    /// Create a new position from its coordinates.
    ///
    /// Panics if any coordinate is NaN or infinite. Use [`Position::try_new`] to handle that case.
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        match Self::try_new(coords) {
            Ok(position) => position,
            Err(err) => panic!("invalid position: {err}"),
        }
    }

    /// Create a new position, returning an error if any coordinate is NaN or infinite.
    pub fn try_new(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let mut coords = coords.into();
        for (axis, c) in coords.iter_mut().enumerate() {
            if !c.is_finite() {
                return Err(PspError::NonFiniteCoordinate { axis });
            }
            // collapse -0.0 so that it hashes like 0.0
            if *c == 0.0 {
                *c = 0.0;
            }
        }
        Ok(Self {
            coords: coords.into_boxed_slice(),
        })
    }

    /// Create a position from any numeric coordinates, e.g. integers.
    ///
    /// ```
    /// use psp_tree::Position;
    ///
    /// let p = Position::try_from_numbers(&[7, 10]).unwrap();
    /// assert_eq!(p, Position::new([7.0, 10.0]));
    /// ```
    pub fn try_from_numbers<N: ToPrimitive>(coords: &[N]) -> Result<Self> {
        let coords = coords
            .iter()
            .enumerate()
            .map(|(axis, c)| {
                c.to_f64()
                    .ok_or(PspError::NonNumericCoordinate { axis })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::try_new(coords)
    }

    /// Create a position from a [`CoordTrait`] implementation, keeping every dimension it
    /// reports.
    pub fn from_coord(coord: &impl CoordTrait<T = f64>) -> Self {
        let dim = coord.dim().size();
        let coords: Vec<f64> = (0..dim).map(|n| coord.nth_or_panic(n)).collect();
        Self::new(coords)
    }

    /// The number of coordinates of this position.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinates of this position.
    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coords.len().hash(state);
        for c in self.coords.iter() {
            c.to_bits().hash(state);
        }
    }
}

impl Deref for Position {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.coords
    }
}

impl AsRef<[f64]> for Position {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

impl From<Vec<f64>> for Position {
    fn from(value: Vec<f64>) -> Self {
        Self::new(value)
    }
}

impl From<&[f64]> for Position {
    fn from(value: &[f64]) -> Self {
        Self::new(value)
    }
}

impl<const D: usize> From<[f64; D]> for Position {
    fn from(value: [f64; D]) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c:?}")?;
        }
        f.write_str("]")
    }
}
