//! Integer enumeration grid.

use crate::error::{GridError, Result};
use crate::grid::integration::IntegrationRule;
use crate::grid::point::Point;
use crate::grid::{Bracket, GridBase};
use crate::scalar::Scalar;

/// Consecutive integers `min, min + 1, ..., max - 1`.
///
/// Useful for orbital, spin or site labels.
///
/// # Example
///
/// ```
/// use gftools::grid::{EnumGrid, GridBase};
///
/// let g = EnumGrid::new(-1, 2).unwrap();
/// assert_eq!(g.size(), 3);
/// assert_eq!(g.point(0).unwrap().index, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumGrid {
    min: i64,
    max: i64,
    points: Vec<Point<i64>>,
}

impl EnumGrid {
    /// Grid over the half-open range `[min, max)`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if max <= min {
            return Err(GridError::InvalidGrid(format!(
                "enumeration range [{min}, {max}) is empty"
            )));
        }
        let points = (min..max)
            .enumerate()
            .map(|(i, v)| Point::new(v, i))
            .collect();
        Ok(Self { min, max, points })
    }

    /// Grid `0, 1, ..., n - 1`.
    pub fn with_size(n: usize) -> Result<Self> {
        Self::new(0, n as i64)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Exclusive upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }
}

impl GridBase for EnumGrid {
    type Value = i64;

    const NAME: &'static str = "enumeration";

    fn points(&self) -> &[Point<i64>] {
        &self.points
    }

    fn find(&self, x: i64) -> Option<Bracket> {
        (self.min..self.max).contains(&x).then(|| Bracket {
            index: (x - self.min) as usize,
            weight: 0.0,
        })
    }

    fn find_nearest(&self, x: i64) -> Point<i64> {
        let clamped = x.clamp(self.min, self.max - 1);
        self.points[(clamped - self.min) as usize]
    }

    fn point(&self, x: i64) -> Result<Point<i64>> {
        match self.find(x) {
            Some(b) => Ok(self.points[b.index]),
            None => Err(self.not_found(x)),
        }
    }

    fn translate(&self, x: i64, delta: i64) -> i64 {
        x.saturating_add(delta)
    }

    fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T {
        IntegrationRule::Sum { measure: 1.0 }.integrate(&[], samples)
    }
}
