//! Periodic reciprocal-space mesh.

use std::f64::consts::PI;

use crate::error::{GridError, Result};
use crate::grid::integration::IntegrationRule;
use crate::grid::point::Point;
use crate::grid::{Bracket, GridBase};
use crate::scalar::Scalar;

/// Relative tolerance on the spacing of explicit mesh values.
const SPACING_TOLERANCE: f64 = 1e-6;

/// `n` equally spaced points `0, L/n, ..., (n-1)L/n` on a periodic domain
/// of length `L` (`2π` by default).
///
/// Translation wraps modulo `L`; indices are computed in closed form.
///
/// # Example
///
/// ```
/// use gftools::grid::{GridBase, KMesh};
///
/// let k = KMesh::new(4).unwrap();
/// let shifted = k.shift(k.get(3).unwrap().value, k.get(2).unwrap().value).unwrap();
/// assert_eq!(k.point(shifted).unwrap().index, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMesh {
    length: f64,
    spacing: f64,
    points: Vec<Point<f64>>,
    rule: IntegrationRule,
}

impl KMesh {
    /// Resolution tolerance, scaled by `max(1, |x|)`.
    pub const TOLERANCE: f64 = 1e-8;

    /// Mesh of `n` points over `[0, 2π)`.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_length(n, 2.0 * PI)
    }

    /// Mesh of `n` points over `[0, length)`.
    pub fn with_length(n: usize, length: f64) -> Result<Self> {
        if n == 0 {
            return Err(GridError::InvalidGrid("k-mesh needs at least one point".into()));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(GridError::InvalidGrid(format!(
                "k-mesh domain length must be positive, got {length}"
            )));
        }
        let spacing = length / n as f64;
        let points = (0..n).map(|i| Point::new(spacing * i as f64, i)).collect();
        Ok(Self {
            length,
            spacing,
            points,
            rule: IntegrationRule::Sum {
                measure: 1.0 / n as f64,
            },
        })
    }

    /// Rebuild a mesh from explicit values.
    ///
    /// The values must start at zero and be equally spaced to a relative
    /// tolerance of `1e-6`; the domain length is inferred from the spacing.
    ///
    /// # Errors
    ///
    /// `NonUniformMesh` on uneven spacing, `InvalidGrid` for fewer than two
    /// values or a non-zero origin.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(GridError::InvalidGrid(
                "k-mesh needs at least two values to infer its spacing".into(),
            ));
        }
        if values[0].abs() > Self::TOLERANCE {
            return Err(GridError::InvalidGrid(format!(
                "k-mesh must start at 0, got {}",
                values[0]
            )));
        }
        let n = values.len();
        let expected = (values[n - 1] - values[0]) / (n - 1) as f64;
        if expected <= 0.0 {
            return Err(GridError::InvalidGrid("k-mesh values must increase".into()));
        }
        let mut worst = 0.0_f64;
        for (position, w) in values.windows(2).enumerate() {
            let step = w[1] - w[0];
            let deviation = (step - expected).abs() / expected;
            if deviation > SPACING_TOLERANCE {
                return Err(GridError::NonUniformMesh {
                    position,
                    step,
                    expected,
                });
            }
            worst = worst.max(deviation);
        }
        if worst > f64::EPSILON * n as f64 {
            log::warn!(
                "k-mesh values are only approximately uniform (relative deviation {worst:e}), rebuilding with spacing {expected}"
            );
        }
        Self::with_length(n, expected * n as f64)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Add the indices of two points modulo the point count.
    pub fn shift_by_point(&self, p: Point<f64>, q: Point<f64>) -> Point<f64> {
        let n = self.size();
        let shifted = self.points[(p.index + q.index) % n];
        debug_assert_eq!(
            self.shift_point(p, q.value).map(|r| r.index).ok(),
            Some(shifted.index),
            "index and value shifts disagree on the k-mesh"
        );
        shifted
    }

    fn wrapped_index(&self, x: f64) -> usize {
        let n = self.size() as i64;
        ((x / self.spacing).round() as i64).rem_euclid(n) as usize
    }
}

impl GridBase for KMesh {
    type Value = f64;

    const NAME: &'static str = "k-mesh";

    fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    fn find(&self, x: f64) -> Option<Bracket> {
        if !x.is_finite() {
            return None;
        }
        let pos = x.rem_euclid(self.length) / self.spacing;
        let lower = pos.floor();
        Some(Bracket {
            index: (lower as usize) % self.size(),
            weight: pos - lower,
        })
    }

    fn find_nearest(&self, x: f64) -> Point<f64> {
        self.points[self.wrapped_index(x)]
    }

    fn point(&self, x: f64) -> Result<Point<f64>> {
        if !x.is_finite() {
            return Err(self.not_found(x));
        }
        let off_lattice = ((x / self.spacing) - (x / self.spacing).round()).abs() * self.spacing;
        if off_lattice <= Self::TOLERANCE * x.abs().max(1.0) {
            Ok(self.points[self.wrapped_index(x)])
        } else {
            Err(self.not_found(x))
        }
    }

    fn translate(&self, x: f64, delta: f64) -> f64 {
        (x + delta).rem_euclid(self.length)
    }

    fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T {
        self.rule.integrate(&[], samples)
    }
}
