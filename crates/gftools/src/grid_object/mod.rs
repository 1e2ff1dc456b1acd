//! Data sampled on a tuple of grids, with an analytic tail.
//!
//! A [`GridObject`] binds a [`GridTuple`] to a [`Container`] of the same
//! shape. Reads at coordinates the grids store hit the container; reads
//! anywhere else fall back to the tail, the function that produced the data
//! (or a combination of such functions after algebra and shifts).
//!
//! ```
//! use gftools::grid::{Coord, MatsubaraGrid};
//! use gftools::{GridObject, GridTuple, c64};
//!
//! let grids = GridTuple::new(vec![MatsubaraGrid::fermionic(10.0, 8).unwrap().into()]);
//! let mut g: GridObject<c64> = GridObject::new(grids);
//! g.fill(|args: &[Coord]| 1.0 / args[0].to_complex());
//!
//! // A frequency far outside the stored range is answered by the tail.
//! let w = c64::new(0.0, 101.0 * std::f64::consts::PI / 10.0);
//! assert_eq!(g.eval(&[Coord::Complex(w)]).unwrap(), 1.0 / w);
//! ```

mod algebra;
mod io;
mod tail;

pub use tail::{
    BinaryOp, BinaryTail, ConjTail, FnTail, ScalarTail, SharedTail, ShiftedTail, Tail, ZeroTail,
    same_tail,
};

use std::sync::Arc;

use crate::container::{Container, ContainerViewMut};
use crate::error::{GridError, Result};
use crate::grid::{Args, Coord, Point};
use crate::grid_tuple::{GridTuple, Indices};
use crate::scalar::Scalar;
use crate::strides::linear_to_cartesian;

/// Values on a tuple of grids plus a tail for everything off the grids.
///
/// # Invariants
/// - `data.shape() == grids.dims()`.
#[derive(Debug, Clone)]
pub struct GridObject<T: Scalar> {
    grids: GridTuple,
    data: Container<T>,
    tail: SharedTail<T>,
}

impl<T: Scalar> GridObject<T> {
    /// Zero-initialized object with a zero tail.
    pub fn new(grids: GridTuple) -> Self {
        let data = Container::zeros(grids.dims());
        Self {
            grids,
            data,
            tail: Arc::new(ZeroTail),
        }
    }

    /// Object over existing data.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when `data.shape()` differs from the grid sizes.
    pub fn from_container(grids: GridTuple, data: Container<T>) -> Result<Self> {
        check_shape(&grids, data.shape())?;
        Ok(Self {
            grids,
            data,
            tail: Arc::new(ZeroTail),
        })
    }

    pub fn grids(&self) -> &GridTuple {
        &self.grids
    }

    pub fn rank(&self) -> usize {
        self.grids.rank()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Container<T> {
        &self.data
    }

    /// Mutable access to the values; the shape stays fixed.
    pub fn data_mut(&mut self) -> ContainerViewMut<'_, T> {
        self.data.as_view_mut()
    }

    /// Replace the values with a container of the same shape.
    pub fn set_data(&mut self, data: Container<T>) -> Result<()> {
        check_shape(&self.grids, data.shape())?;
        self.data = data;
        Ok(())
    }

    pub fn into_container(self) -> Container<T> {
        self.data
    }

    pub fn tail(&self) -> &SharedTail<T> {
        &self.tail
    }

    pub fn set_tail(&mut self, tail: SharedTail<T>) {
        self.tail = tail;
    }

    /// True when both objects fall back to the very same tail object.
    pub fn shares_tail_with(&self, other: &Self) -> bool {
        same_tail(&self.tail, &other.tail)
    }

    /// Visit the coordinate tuple of every element in row-major order.
    fn args_iter(grids: &GridTuple) -> impl Iterator<Item = (usize, Args)> + '_ {
        let axes: Vec<Vec<Coord>> = grids.grids().iter().map(|g| g.values()).collect();
        (0..grids.total_size()).map(move |flat| {
            let args: Args = linear_to_cartesian(flat, grids.dims())
                .iter()
                .zip(&axes)
                .map(|(&i, axis)| axis[i])
                .collect();
            (flat, args)
        })
    }

    fn for_each_args<F>(grids: &GridTuple, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &Args) -> Result<()>,
    {
        for (flat, args) in Self::args_iter(grids) {
            f(flat, &args)?;
        }
        Ok(())
    }

    /// Sample `f` at every grid point and make it the tail.
    pub fn fill<F>(&mut self, f: F)
    where
        F: Fn(&[Coord]) -> T + Send + Sync + 'static,
    {
        let data = self.data.data_mut();
        for (flat, args) in Self::args_iter(&self.grids) {
            data[flat] = f(args.as_slice());
        }
        log::debug!("filled {} values on {} grid(s)", self.len(), self.rank());
        self.tail = Arc::new(FnTail::new(f));
    }

    /// Sample an existing tail at every grid point and make it the tail.
    pub fn fill_tail(&mut self, tail: SharedTail<T>) -> Result<()> {
        let mut values = Vec::with_capacity(self.len());
        Self::for_each_args(&self.grids, |_, args| {
            values.push(tail.eval(args)?);
            Ok(())
        })?;
        self.data = Container::from_vec(values, self.grids.dims())?;
        self.tail = tail;
        Ok(())
    }

    /// Value at an arbitrary coordinate tuple.
    ///
    /// Stored values are returned when every coordinate resolves to a grid
    /// point; otherwise the tail is evaluated.
    ///
    /// # Errors
    ///
    /// Coordinates of the wrong kind or count, or a failing tail.
    pub fn eval(&self, args: &[Coord]) -> Result<T> {
        match self.grids.find_points(args) {
            Ok(points) => {
                let idx: Indices = points.iter().map(|p| p.index).collect();
                self.get_index(&idx)
            }
            Err(e) if e.is_resolution_failure() => self.tail.eval(args),
            Err(e) => Err(e),
        }
    }

    /// Value at grid points.
    ///
    /// # Errors
    ///
    /// `IndexMismatch` when a point's index disagrees with its grid.
    pub fn get(&self, points: &[Point<Coord>]) -> Result<T> {
        let idx = self.grids.indices_of(points)?;
        self.get_index(&idx)
    }

    pub fn set(&mut self, points: &[Point<Coord>], value: T) -> Result<()> {
        let idx = self.grids.indices_of(points)?;
        self.set_index(&idx, value)
    }

    /// Value at container indices.
    pub fn get_index(&self, indices: &[usize]) -> Result<T> {
        self.data.get(indices).copied()
    }

    pub fn set_index(&mut self, indices: &[usize], value: T) -> Result<()> {
        self.data.set(indices, value)
    }

    /// The same object seen from coordinates moved by `deltas`.
    ///
    /// Every stored value becomes `self.eval(args + deltas)`, and the tail
    /// becomes the old tail evaluated at shifted coordinates. Translated
    /// coordinates that miss the grids are answered by the tail, so shifting
    /// an open grid past its end does not fail.
    ///
    /// # Errors
    ///
    /// `WrongNumberOfIndices` or `CoordKindMismatch` for unsuitable deltas.
    pub fn shift(&self, deltas: &[Coord]) -> Result<Self> {
        if deltas.len() != self.rank() {
            return Err(GridError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: deltas.len(),
            });
        }
        for (g, d) in self.grids.grids().iter().zip(deltas) {
            if g.coord_kind() != d.kind() {
                return Err(GridError::CoordKindMismatch {
                    grid: g.name(),
                    expected: g.coord_kind(),
                    actual: d.kind(),
                });
            }
        }

        let mut values = Vec::with_capacity(self.len());
        Self::for_each_args(&self.grids, |_, args| {
            let moved = self.grids.translate_args(args, deltas)?;
            values.push(self.eval(&moved)?);
            Ok(())
        })?;
        log::debug!("shifted object of shape {:?} by {:?}", self.shape(), deltas);

        let deltas: Args = deltas.iter().copied().collect();
        Ok(Self {
            grids: self.grids.clone(),
            data: Container::from_vec(values, self.grids.dims())?,
            tail: Arc::new(ShiftedTail::new(self.tail.clone(), self.grids.clone(), deltas)),
        })
    }

    /// Fill from `other` at this object's coordinates and adopt its tail.
    ///
    /// `other` may live on different grids of the same rank; coordinates it
    /// does not store are answered by its tail.
    pub fn copy_interpolate(&mut self, other: &Self) -> Result<()> {
        if other.rank() != self.rank() {
            return Err(GridError::RankMismatch {
                expected: self.rank(),
                actual: other.rank(),
            });
        }
        let mut values = Vec::with_capacity(self.len());
        Self::for_each_args(&self.grids, |_, args| {
            values.push(other.eval(args)?);
            Ok(())
        })?;
        self.data = Container::from_vec(values, self.grids.dims())?;
        self.tail = other.tail.clone();
        log::debug!(
            "interpolated {:?} onto {:?}",
            other.shape(),
            self.shape()
        );
        Ok(())
    }

    /// Mean absolute difference of the stored values.
    pub fn diff(&self, other: &Self) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: other.shape().to_vec(),
            });
        }
        let total: f64 = self
            .data
            .data()
            .iter()
            .zip(other.data.data())
            .map(|(&a, &b)| (a - b).abs())
            .sum();
        Ok(total / self.len() as f64)
    }

    /// Sum of all stored values.
    pub fn sum(&self) -> T {
        self.data.sum()
    }

    /// Complex conjugate of values and tail.
    pub fn conj(&self) -> Self {
        Self {
            grids: self.grids.clone(),
            data: self.data.conj(),
            tail: Arc::new(ConjTail::new(self.tail.clone())),
        }
    }

    /// Integrate over all axes, each with its grid's quadrature.
    ///
    /// Axes are integrated from the innermost outwards.
    pub fn integrate(&self) -> T {
        let mut values = self.data.data().to_vec();
        for g in self.grids.grids().iter().rev() {
            values = values
                .chunks(g.size())
                .map(|chunk| g.integrate_samples(chunk))
                .collect();
        }
        values.first().copied().unwrap_or_default()
    }
}

fn check_shape(grids: &GridTuple, shape: &[usize]) -> Result<()> {
    if grids.dims() == shape {
        Ok(())
    } else {
        Err(GridError::ShapeMismatch {
            expected: grids.dims().to_vec(),
            actual: shape.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{EnumGrid, GridBase, KMesh, RealGrid};
    use approx::assert_relative_eq;

    fn kmesh_object(n: usize) -> GridObject<f64> {
        GridObject::new(GridTuple::new(vec![KMesh::new(n).unwrap().into()]))
    }

    #[test]
    fn test_new_is_zero() {
        let g = kmesh_object(4);
        assert_eq!(g.shape(), &[4]);
        assert!(g.data().data().iter().all(|&x| x == 0.0));
        assert_eq!(g.eval(&[Coord::Real(0.123)]).unwrap(), 0.0);
    }

    #[test]
    fn test_from_container_checks_shape() {
        let grids = GridTuple::new(vec![
            EnumGrid::with_size(2).unwrap().into(),
            KMesh::new(3).unwrap().into(),
        ]);
        let ok = GridObject::from_container(grids.clone(), Container::<f64>::zeros(&[2, 3]));
        assert!(ok.is_ok());
        let err = GridObject::from_container(grids, Container::<f64>::zeros(&[3, 2])).unwrap_err();
        assert!(matches!(err, GridError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_fill_then_eval() {
        let mut g = kmesh_object(8);
        g.fill(|a: &[Coord]| a[0].to_real().sin());
        let k = KMesh::new(8).unwrap();
        for p in k.points() {
            assert_eq!(g.eval(&[Coord::Real(p.value)]).unwrap(), p.value.sin());
        }
        assert_relative_eq!(g.eval(&[Coord::Real(0.3)]).unwrap(), 0.3_f64.sin());
        assert!(matches!(
            g.eval(&[Coord::Int(1)]),
            Err(GridError::CoordKindMismatch { .. })
        ));
    }

    #[test]
    fn test_fill_visits_every_element_of_both_axes() {
        let grids = GridTuple::new(vec![
            EnumGrid::with_size(3).unwrap().into(),
            RealGrid::linspace(0.0, 1.0, 5, true).unwrap().into(),
        ]);
        let f = |a: &[Coord]| 10.0 * a[0].to_real() + a[1].to_real() + 1.0;
        let mut filled: GridObject<f64> = GridObject::new(grids.clone());
        filled.fill(f);
        assert!(filled.data().data().iter().all(|&x| x >= 1.0));

        let mut from_tail: GridObject<f64> = GridObject::new(grids);
        from_tail.fill_tail(Arc::new(FnTail::new(f))).unwrap();
        assert_eq!(filled.data(), from_tail.data());
    }

    #[test]
    fn test_get_and_set_by_point() {
        let mut g = kmesh_object(4);
        let p = g.grids().grids()[0].get(2).unwrap();
        g.set(&[p], 5.0).unwrap();
        assert_eq!(g.get(&[p]).unwrap(), 5.0);
        assert_eq!(g.get_index(&[2]).unwrap(), 5.0);
        let mut wrong = p;
        wrong.index = 1;
        assert!(matches!(g.get(&[wrong]), Err(GridError::IndexMismatch { .. })));
    }

    #[test]
    fn test_set_data_keeps_shape() {
        let mut g = kmesh_object(4);
        assert!(g.set_data(Container::zeros(&[5])).is_err());
        g.set_data(Container::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap()).unwrap();
        assert_eq!(g.sum(), 10.0);
    }

    #[test]
    fn test_shift_on_open_grid_uses_tail() {
        let grids = GridTuple::new(vec![RealGrid::linspace(0.0, 1.0, 5, true).unwrap().into()]);
        let mut g: GridObject<f64> = GridObject::new(grids);
        g.fill(|a: &[Coord]| a[0].to_real() * 10.0);
        let s = g.shift(&[Coord::Real(0.5)]).unwrap();
        assert_relative_eq!(s.get_index(&[0]).unwrap(), 5.0);
        assert_relative_eq!(s.get_index(&[4]).unwrap(), 15.0);
        assert_relative_eq!(s.eval(&[Coord::Real(0.1)]).unwrap(), 6.0);
        assert!(matches!(
            g.shift(&[Coord::Int(1)]),
            Err(GridError::CoordKindMismatch { .. })
        ));
    }

    #[test]
    fn test_fill_tail_adopts_tail() {
        let mut a = kmesh_object(4);
        a.fill(|x: &[Coord]| x[0].to_real());
        let mut b = kmesh_object(4);
        b.fill_tail(a.tail().clone()).unwrap();
        assert!(b.shares_tail_with(&a));
        assert_eq!(b.diff(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_copy_interpolate_rank_mismatch() {
        let mut a = kmesh_object(4);
        let b: GridObject<f64> = GridObject::new(GridTuple::new(vec![
            KMesh::new(2).unwrap().into(),
            KMesh::new(2).unwrap().into(),
        ]));
        assert!(matches!(
            a.copy_interpolate(&b),
            Err(GridError::RankMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_integrate_two_axes() {
        let grids = GridTuple::new(vec![
            EnumGrid::with_size(3).unwrap().into(),
            KMesh::new(4).unwrap().into(),
        ]);
        let mut g: GridObject<f64> = GridObject::new(grids);
        g.fill(|a: &[Coord]| a[0].to_real() + 1.0);
        // k-mesh average leaves n + 1, enumeration sums 1 + 2 + 3
        assert_relative_eq!(g.integrate(), 6.0);
    }
}
