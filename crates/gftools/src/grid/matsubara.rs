//! Matsubara frequency grids.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{GridError, Result};
use crate::grid::integration::IntegrationRule;
use crate::grid::point::Point;
use crate::grid::{Bracket, GridBase};
use crate::scalar::{Scalar, c64};

/// Particle statistics of a Matsubara grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistics {
    /// Odd frequencies `iπ(2n+1)/β`.
    Fermion,
    /// Even frequencies `iπ2n/β`.
    Boson,
}

impl Statistics {
    /// Parity offset `s` in `iπ(2n+s)/β`.
    pub fn parity(self) -> i64 {
        match self {
            Statistics::Fermion => 1,
            Statistics::Boson => 0,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistics::Fermion => write!(f, "fermionic"),
            Statistics::Boson => write!(f, "bosonic"),
        }
    }
}

/// Frequencies `iπ(2n+s)/β` for `n` in `[n_min, n_max)`.
///
/// # Example
///
/// ```
/// use gftools::grid::{GridBase, MatsubaraGrid};
///
/// let w = MatsubaraGrid::fermionic(10.0, 2).unwrap();
/// assert!((w.get(1).unwrap().value.im - 3.0 * std::f64::consts::PI / 10.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatsubaraGrid {
    beta: f64,
    statistics: Statistics,
    n_min: i64,
    n_max: i64,
    points: Vec<Point<c64>>,
    rule: IntegrationRule,
}

impl MatsubaraGrid {
    /// Resolution tolerance, scaled by `max(1, |x|)`.
    pub const TOLERANCE: f64 = 1e-10;

    pub fn new(beta: f64, n_min: i64, n_max: i64, statistics: Statistics) -> Result<Self> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(GridError::InvalidGrid(format!(
                "inverse temperature must be positive, got {beta}"
            )));
        }
        if n_max <= n_min {
            return Err(GridError::InvalidGrid(format!(
                "Matsubara index range [{n_min}, {n_max}) is empty"
            )));
        }
        let points = (n_min..n_max)
            .enumerate()
            .map(|(i, n)| Point::new(frequency(beta, n, statistics), i))
            .collect();
        Ok(Self {
            beta,
            statistics,
            n_min,
            n_max,
            points,
            rule: IntegrationRule::Sum { measure: 1.0 / beta },
        })
    }

    /// The first `n` non-negative fermionic frequencies.
    pub fn fermionic(beta: f64, n: usize) -> Result<Self> {
        Self::new(beta, 0, n as i64, Statistics::Fermion)
    }

    /// The first `n` non-negative bosonic frequencies.
    pub fn bosonic(beta: f64, n: usize) -> Result<Self> {
        Self::new(beta, 0, n as i64, Statistics::Boson)
    }

    /// Frequencies symmetric around zero: `n` in `[-n, n)`.
    pub fn symmetric(beta: f64, n: usize, statistics: Statistics) -> Result<Self> {
        Self::new(beta, -(n as i64), n as i64, statistics)
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Distance between neighbouring frequencies, `2π/β`.
    pub fn spacing(&self) -> f64 {
        2.0 * PI / self.beta
    }

    pub fn n_min(&self) -> i64 {
        self.n_min
    }

    pub fn n_max(&self) -> i64 {
        self.n_max
    }

    // Matsubara number n of the frequency closest to z.
    fn number_of(&self, z: c64) -> i64 {
        debug_assert!(
            z.re.abs() <= Self::TOLERANCE * z.norm().max(1.0),
            "Matsubara coordinate {z} is not purely imaginary"
        );
        let s = self.statistics.parity() as f64;
        ((z.im * self.beta / PI - s) / 2.0).round() as i64
    }
}

fn frequency(beta: f64, n: i64, statistics: Statistics) -> c64 {
    c64::new(0.0, PI * (2 * n + statistics.parity()) as f64 / beta)
}

impl GridBase for MatsubaraGrid {
    type Value = c64;

    const NAME: &'static str = "Matsubara";

    fn points(&self) -> &[Point<c64>] {
        &self.points
    }

    fn find(&self, z: c64) -> Option<Bracket> {
        if !(z.re.is_finite() && z.im.is_finite()) {
            return None;
        }
        let n = self.number_of(z);
        (self.n_min..self.n_max).contains(&n).then(|| Bracket {
            index: (n - self.n_min) as usize,
            weight: 0.0,
        })
    }

    fn find_nearest(&self, z: c64) -> Point<c64> {
        let n = self.number_of(z).clamp(self.n_min, self.n_max - 1);
        self.points[(n - self.n_min) as usize]
    }

    fn point(&self, z: c64) -> Result<Point<c64>> {
        let b = self.find(z).ok_or_else(|| self.not_found(z))?;
        let p = self.points[b.index];
        if (p.value - z).norm() <= Self::TOLERANCE * z.norm().max(1.0) {
            Ok(p)
        } else {
            Err(self.not_found(z))
        }
    }

    fn translate(&self, z: c64, delta: c64) -> c64 {
        z + delta
    }

    fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T {
        self.rule.integrate(&[], samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fermionic_and_bosonic_values() {
        let f = MatsubaraGrid::fermionic(2.0, 3).unwrap();
        assert_relative_eq!(f.get(0).unwrap().value.im, PI / 2.0);
        assert_relative_eq!(f.get(2).unwrap().value.im, 5.0 * PI / 2.0);
        let b = MatsubaraGrid::bosonic(2.0, 3).unwrap();
        assert_eq!(b.get(0).unwrap().value, c64::new(0.0, 0.0));
        assert_relative_eq!(b.spacing(), PI);
    }

    #[test]
    fn test_invalid() {
        assert!(MatsubaraGrid::fermionic(0.0, 3).is_err());
        assert!(MatsubaraGrid::fermionic(1.0, 0).is_err());
    }

    #[test]
    fn test_symmetric_find() {
        let g = MatsubaraGrid::symmetric(5.0, 4, Statistics::Fermion).unwrap();
        assert_eq!(g.size(), 8);
        let w = frequency(5.0, -1, Statistics::Fermion);
        assert_eq!(g.find(w).unwrap(), Bracket { index: 3, weight: 0.0 });
        assert!(g.find(frequency(5.0, 4, Statistics::Fermion)).is_none());
    }

    #[test]
    fn test_find_nearest_clamps() {
        let g = MatsubaraGrid::fermionic(10.0, 4).unwrap();
        assert_eq!(g.find_nearest(c64::new(0.0, -50.0)).index, 0);
        assert_eq!(g.find_nearest(c64::new(0.0, 50.0)).index, 3);
        for p in g.points() {
            assert_eq!(g.find_nearest(p.value), *p);
        }
    }

    #[test]
    fn test_point_rejects_off_lattice() {
        let g = MatsubaraGrid::fermionic(10.0, 4).unwrap();
        assert!(g.point(c64::new(0.0, 0.5)).is_err());
        assert_eq!(g.point(g.get(2).unwrap().value).unwrap().index, 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not purely imaginary")]
    fn test_real_part_rejected_in_debug() {
        let g = MatsubaraGrid::fermionic(10.0, 4).unwrap();
        let _ = g.point(c64::new(0.5, PI / 10.0));
    }

    #[test]
    fn test_bosonic_shift_keeps_statistics() {
        let f = MatsubaraGrid::fermionic(10.0, 6).unwrap();
        let nu = MatsubaraGrid::bosonic(10.0, 3).unwrap().get(2).unwrap().value;
        let p = f.shift_point(f.get(1).unwrap(), nu).unwrap();
        assert_eq!(p.index, 3);
        assert!(f.shift_point(f.get(4).unwrap(), nu).is_err());
    }

    #[test]
    fn test_integrate_divides_by_beta() {
        let g = MatsubaraGrid::fermionic(4.0, 8).unwrap();
        assert_relative_eq!(g.integrate(|_| 1.0), 2.0);
    }
}
