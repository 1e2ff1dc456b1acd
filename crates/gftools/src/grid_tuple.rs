//! Ordered tuple of grids and the index/point/coordinate conversions over it.
//!
//! A grid object of rank N is addressed three ways: a flat container index,
//! N container indices, or N coordinates (one per grid). [`GridTuple`]
//! converts between them and shifts all axes together.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{GridError, Result};
use crate::grid::{Args, Coord, Grid, Point};
use crate::strides::{cartesian_to_linear, compute_strides, linear_to_cartesian};

/// One point per axis.
pub type Points = SmallVec<[Point<Coord>; 4]>;

/// Container indices, one per axis.
pub type Indices = SmallVec<[usize; 4]>;

/// Grids of a grid object, shared between objects built on the same axes.
///
/// Cloning is cheap and keeps the grids shared.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTuple {
    grids: Arc<[Grid]>,
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl GridTuple {
    pub fn new(grids: Vec<Grid>) -> Self {
        let dims: Vec<usize> = grids.iter().map(Grid::size).collect();
        let strides = compute_strides(&dims);
        Self {
            grids: grids.into(),
            dims,
            strides,
        }
    }

    pub fn rank(&self) -> usize {
        self.grids.len()
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Size of every grid, in axis order.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of coordinate tuples, `product(dims())`.
    pub fn total_size(&self) -> usize {
        self.dims.iter().product()
    }

    /// True when both tuples share the same grid allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.grids, &other.grids)
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual == self.rank() {
            Ok(())
        } else {
            Err(GridError::WrongNumberOfIndices {
                expected: self.rank(),
                actual,
            })
        }
    }

    /// Points stored at the given container indices.
    pub fn points_at(&self, indices: &[usize]) -> Result<Points> {
        self.check_len(indices.len())?;
        self.grids
            .iter()
            .zip(indices)
            .map(|(g, &i)| g.get(i))
            .collect()
    }

    /// Coordinates stored at the given container indices.
    pub fn args_at(&self, indices: &[usize]) -> Result<Args> {
        Ok(self.points_at(indices)?.iter().map(|p| p.value).collect())
    }

    /// Coordinates at a flat (row-major) index.
    pub fn args_at_flat(&self, flat: usize) -> Result<Args> {
        self.args_at(&self.multi_index(flat)?)
    }

    /// Container indices of the given points.
    ///
    /// # Errors
    ///
    /// `IndexMismatch` when a point's index disagrees with the index the grid
    /// stores its value at, `PointNotFound` when the value is not on the grid.
    pub fn indices_of(&self, points: &[Point<Coord>]) -> Result<Indices> {
        self.check_len(points.len())?;
        self.grids
            .iter()
            .zip(points)
            .map(|(g, p)| {
                let stored = g.point(p.value)?;
                if stored.index == p.index {
                    Ok(p.index)
                } else {
                    Err(GridError::IndexMismatch {
                        value: p.value.to_string(),
                        index: p.index,
                        expected: stored.index,
                    })
                }
            })
            .collect()
    }

    /// Resolve every coordinate to its stored point.
    pub fn find_points(&self, args: &[Coord]) -> Result<Points> {
        self.check_len(args.len())?;
        self.grids
            .iter()
            .zip(args)
            .map(|(g, &x)| g.point(x))
            .collect()
    }

    /// Shift every point by its delta, failing on the first axis that does
    /// not resolve.
    pub fn shift(&self, points: &[Point<Coord>], deltas: &[Coord]) -> Result<Points> {
        self.check_len(points.len())?;
        self.check_len(deltas.len())?;
        self.grids
            .iter()
            .zip(points.iter().zip(deltas))
            .map(|(g, (&p, &d))| g.shift_point(p, d))
            .collect()
    }

    /// Shift every coordinate by its delta and resolve it to a stored value.
    pub fn shift_args(&self, args: &[Coord], deltas: &[Coord]) -> Result<Args> {
        self.check_len(args.len())?;
        self.check_len(deltas.len())?;
        self.grids
            .iter()
            .zip(args.iter().zip(deltas))
            .map(|(g, (&x, &d))| g.shift(x, d))
            .collect()
    }

    /// Translate every coordinate without resolving it.
    pub fn translate_args(&self, args: &[Coord], deltas: &[Coord]) -> Result<Args> {
        self.check_len(args.len())?;
        self.check_len(deltas.len())?;
        self.grids
            .iter()
            .zip(args.iter().zip(deltas))
            .map(|(g, (&x, &d))| g.translate(x, d))
            .collect()
    }

    /// Row-major flat index of container indices.
    pub fn flat_index(&self, indices: &[usize]) -> Result<usize> {
        self.check_len(indices.len())?;
        for (&i, &dim) in indices.iter().zip(&self.dims) {
            if i >= dim {
                return Err(GridError::IndexOutOfBounds {
                    index: i,
                    dim_size: dim,
                });
            }
        }
        Ok(cartesian_to_linear(indices, &self.strides))
    }

    /// Container indices of a row-major flat index.
    pub fn multi_index(&self, flat: usize) -> Result<Indices> {
        let size = self.total_size();
        if flat >= size {
            return Err(GridError::OutOfBounds { index: flat, size });
        }
        Ok(linear_to_cartesian(flat, &self.dims).into_iter().collect())
    }
}

impl From<Vec<Grid>> for GridTuple {
    fn from(grids: Vec<Grid>) -> Self {
        Self::new(grids)
    }
}

/// True when both tuples have the same length and every pair of
/// coordinates is within `tol`.
pub fn args_approx_eq(a: &[Coord], b: &[Coord], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.distance(y) <= tol)
}
