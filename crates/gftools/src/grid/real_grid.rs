//! Real-axis grid on an open interval.

use crate::error::{GridError, Result};
use crate::grid::integration::{IntegrationRule, SIMPSON_MIN_POINTS};
use crate::grid::point::Point;
use crate::grid::{Bracket, GridBase};
use crate::scalar::Scalar;

/// Relative tolerance under which consecutive steps count as equal.
const UNIFORMITY_TOLERANCE: f64 = 1e-6;

/// Sorted real values, uniform or not.
///
/// The grid is open: shifting past either end fails instead of wrapping.
/// Uniform grids with at least eight points integrate with Simpson's rule,
/// all others with the trapezoidal rule.
///
/// # Example
///
/// ```
/// use gftools::grid::{GridBase, RealGrid};
///
/// let g = RealGrid::linspace(0.0, 1.0, 11, true).unwrap();
/// let b = g.find(0.25).unwrap();
/// assert_eq!(b.index, 2);
/// assert!((b.weight - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RealGrid {
    points: Vec<Point<f64>>,
    values: Vec<f64>,
    uniform: bool,
    rule: IntegrationRule,
}

impl RealGrid {
    /// Resolution tolerance, scaled by `max(1, |x|)`.
    pub const TOLERANCE: f64 = 1e-10;

    /// Grid from explicit values. Values are sorted and duplicates removed.
    pub fn new(mut values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(GridError::InvalidGrid("real grid needs at least one point".into()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(GridError::InvalidGrid(format!("non-finite grid value {bad}")));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();

        let uniform = is_uniform(&values);
        let rule = if uniform && values.len() >= SIMPSON_MIN_POINTS {
            IntegrationRule::Simpson
        } else {
            IntegrationRule::Trapezoid
        };
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new(v, i))
            .collect();
        Ok(Self {
            points,
            values,
            uniform,
            rule,
        })
    }

    /// `n` equally spaced points from `min` to `max`, with or without `max` itself.
    pub fn linspace(min: f64, max: f64, n: usize, include_last: bool) -> Result<Self> {
        if n < 2 || max <= min {
            return Err(GridError::InvalidGrid(format!(
                "cannot place {n} points on [{min}, {max}]"
            )));
        }
        let divisions = if include_last { n - 1 } else { n } as f64;
        let step = (max - min) / divisions;
        Self::new((0..n).map(|i| min + step * i as f64).collect())
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn rule(&self) -> IntegrationRule {
        self.rule
    }

    /// Linear interpolation of `data` (sampled on this grid) at `x`.
    ///
    /// # Errors
    ///
    /// `PointNotFound` when `x` lies outside `[min, max]`.
    pub fn interpolate<T: Scalar>(&self, data: &[T], x: f64) -> Result<T> {
        let b = self.find(x).ok_or_else(|| self.not_found(x))?;
        let lo = *data.get(b.index).ok_or(GridError::OutOfBounds {
            index: b.index,
            size: data.len(),
        })?;
        if b.weight == 0.0 {
            return Ok(lo);
        }
        let hi = *data.get(b.index + 1).ok_or(GridError::OutOfBounds {
            index: b.index + 1,
            size: data.len(),
        })?;
        Ok(lo * (1.0 - b.weight) + hi * b.weight)
    }

    fn tolerance_at(x: f64) -> f64 {
        Self::TOLERANCE * x.abs().max(1.0)
    }
}

fn is_uniform(values: &[f64]) -> bool {
    if values.len() < 3 {
        return true;
    }
    let step = (values[values.len() - 1] - values[0]) / (values.len() - 1) as f64;
    values
        .windows(2)
        .all(|w| ((w[1] - w[0]) - step).abs() <= UNIFORMITY_TOLERANCE * step.abs())
}

impl GridBase for RealGrid {
    type Value = f64;

    const NAME: &'static str = "real";

    fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    fn find(&self, x: f64) -> Option<Bracket> {
        let n = self.values.len();
        if !(self.min()..=self.max()).contains(&x) {
            return None;
        }
        // number of values <= x, at least one since x >= min
        let i = self.values.partition_point(|&v| v <= x) - 1;
        if i == n - 1 {
            return Some(Bracket {
                index: i,
                weight: 0.0,
            });
        }
        let weight = (x - self.values[i]) / (self.values[i + 1] - self.values[i]);
        Some(Bracket { index: i, weight })
    }

    fn find_nearest(&self, x: f64) -> Point<f64> {
        let n = self.values.len();
        let upper = self.values.partition_point(|&v| v < x);
        if upper == 0 {
            return self.points[0];
        }
        if upper == n {
            return self.points[n - 1];
        }
        let lower = upper - 1;
        if (self.values[upper] - x).abs() < (x - self.values[lower]).abs() {
            self.points[upper]
        } else {
            self.points[lower]
        }
    }

    fn point(&self, x: f64) -> Result<Point<f64>> {
        let p = self.find_nearest(x);
        if (p.value - x).abs() <= Self::tolerance_at(x) {
            Ok(p)
        } else {
            Err(self.not_found(x))
        }
    }

    fn translate(&self, x: f64, delta: f64) -> f64 {
        x + delta
    }

    fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T {
        self.rule.integrate(&self.values, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sorted_and_deduplicated() {
        let g = RealGrid::new(vec![0.5, -1.0, 0.5, 2.5]).unwrap();
        assert_eq!(g.values(), vec![-1.0, 0.5, 2.5]);
        assert_eq!(g.get(1).unwrap(), Point::new(0.5, 1));
        assert!(!g.is_uniform());
        assert_eq!(g.rule(), IntegrationRule::Trapezoid);
    }

    #[test]
    fn test_short_uniform_grid_uses_trapezoid() {
        let g = RealGrid::linspace(0.0, 1.0, 3, true).unwrap();
        assert!(g.is_uniform());
        assert_eq!(g.rule(), IntegrationRule::Trapezoid);
        let fine = RealGrid::linspace(0.0, 1.0, 8, true).unwrap();
        assert_eq!(fine.rule(), IntegrationRule::Simpson);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(RealGrid::new(vec![]).is_err());
        assert!(RealGrid::new(vec![0.0, f64::NAN]).is_err());
        assert!(RealGrid::linspace(1.0, 0.0, 4, true).is_err());
    }

    #[test]
    fn test_linspace_without_last() {
        let g = RealGrid::linspace(0.0, 1.0, 4, false).unwrap();
        assert_eq!(g.values(), vec![0.0, 0.25, 0.5, 0.75]);
        assert!(g.is_uniform());
    }

    #[test]
    fn test_find_brackets() {
        let g = RealGrid::new(vec![0.0, 1.0, 3.0]).unwrap();
        let b = g.find(2.0).unwrap();
        assert_eq!(b.index, 1);
        assert_relative_eq!(b.weight, 0.5);
        assert_eq!(g.find(3.0).unwrap(), Bracket { index: 2, weight: 0.0 });
        assert_eq!(g.find(0.0).unwrap(), Bracket { index: 0, weight: 0.0 });
        assert!(g.find(-0.1).is_none());
        assert!(g.find(3.1).is_none());
    }

    #[test]
    fn test_find_nearest_recovers_points() {
        let g = RealGrid::new(vec![-2.0, -0.3, 0.0, 0.7, 5.0]).unwrap();
        for p in g.points() {
            assert_eq!(g.find_nearest(p.value), *p);
        }
        assert_eq!(g.find_nearest(0.4).value, 0.7);
        assert_eq!(g.find_nearest(-10.0).value, -2.0);
        assert_eq!(g.find_nearest(10.0).value, 5.0);
    }

    #[test]
    fn test_shift_requires_grid_point() {
        let g = RealGrid::linspace(0.0, 1.0, 5, true).unwrap();
        assert_relative_eq!(g.shift(0.25, 0.5).unwrap(), 0.75);
        assert!(matches!(g.shift(0.25, 0.1), Err(GridError::PointNotFound { .. })));
        assert!(g.shift(0.75, 0.5).is_err());
        let p = g.shift_point(g.get(1).unwrap(), 0.25).unwrap();
        assert_eq!(p.index, 2);
    }

    #[test]
    fn test_integrate_simpson_and_trapezoid() {
        let g = RealGrid::linspace(0.0, std::f64::consts::PI, 101, true).unwrap();
        assert_eq!(g.rule(), IntegrationRule::Simpson);
        assert_relative_eq!(g.integrate(f64::sin), 2.0, epsilon = 1e-7);

        let coarse = RealGrid::linspace(0.0, 1.0, 5, true).unwrap();
        assert_eq!(coarse.rule(), IntegrationRule::Trapezoid);
        assert_relative_eq!(coarse.integrate(|x| x), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate() {
        let g = RealGrid::new(vec![0.0, 1.0, 2.0]).unwrap();
        let data = [0.0, 10.0, 30.0];
        assert_relative_eq!(g.interpolate(&data, 0.5).unwrap(), 5.0);
        assert_relative_eq!(g.interpolate(&data, 1.25).unwrap(), 15.0);
        assert_relative_eq!(g.interpolate(&data, 2.0).unwrap(), 30.0);
        assert!(g.interpolate(&data, 2.5).is_err());
    }
}
