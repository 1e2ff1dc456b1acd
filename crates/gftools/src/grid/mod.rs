//! One-dimensional grids.
//!
//! Every grid kind implements [`GridBase`], the common contract of index
//! lookup, nearest-point search, translation and integration. The [`Grid`]
//! enum erases the concrete kind so grids of different kinds can share a
//! [`GridTuple`](crate::GridTuple); it speaks [`Coord`] instead of the
//! concrete value type.

mod enum_grid;
pub mod integration;
mod kmesh;
mod matsubara;
mod point;
mod real_grid;

pub use enum_grid::EnumGrid;
pub use integration::IntegrationRule;
pub use kmesh::KMesh;
pub use matsubara::{MatsubaraGrid, Statistics};
pub use point::{Args, Coord, GridValue, Point};
pub use real_grid::RealGrid;

use crate::error::{GridError, Result};
use crate::scalar::Scalar;

/// Position of a coordinate relative to the stored points.
///
/// The coordinate lies between `index` and the following point, at fraction
/// `weight` of the way. Grids that resolve coordinates exactly report a
/// weight of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub index: usize,
    pub weight: f64,
}

/// Capabilities shared by all grid kinds.
pub trait GridBase {
    /// Coordinate type of the grid points.
    type Value: GridValue;

    /// Grid kind, used in error messages.
    const NAME: &'static str;

    /// Stored points in index order.
    fn points(&self) -> &[Point<Self::Value>];

    /// Locate `x` among the stored points, `None` when it lies outside the grid.
    fn find(&self, x: Self::Value) -> Option<Bracket>;

    /// The stored point closest to `x`.
    fn find_nearest(&self, x: Self::Value) -> Point<Self::Value>;

    /// The stored point equal to `x` within the grid's tolerance.
    ///
    /// # Errors
    ///
    /// `PointNotFound` when no such point exists.
    fn point(&self, x: Self::Value) -> Result<Point<Self::Value>>;

    /// Raw translation of a coordinate, without resolving it to a point.
    fn translate(&self, x: Self::Value, delta: Self::Value) -> Self::Value;

    /// Integrate values sampled at the stored points, in index order.
    fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T;

    fn size(&self) -> usize {
        self.points().len()
    }

    /// Point at `index`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when `index >= size()`.
    fn get(&self, index: usize) -> Result<Point<Self::Value>> {
        self.points()
            .get(index)
            .copied()
            .ok_or(GridError::OutOfBounds {
                index,
                size: self.size(),
            })
    }

    /// Integrate `f` over the grid with the grid's own quadrature.
    fn integrate<T: Scalar, F: Fn(Self::Value) -> T>(&self, f: F) -> T {
        let samples: Vec<T> = self.points().iter().map(|p| f(p.value)).collect();
        self.integrate_samples(&samples)
    }

    fn values(&self) -> Vec<Self::Value> {
        self.points().iter().map(|p| p.value).collect()
    }

    /// Translate `x` by `delta` and resolve the result to a stored value.
    fn shift(&self, x: Self::Value, delta: Self::Value) -> Result<Self::Value> {
        Ok(self.point(self.translate(x, delta))?.value)
    }

    fn shift_point(&self, p: Point<Self::Value>, delta: Self::Value) -> Result<Point<Self::Value>> {
        self.point(self.translate(p.value, delta))
    }

    /// Look up the value of `data` at coordinate `x`.
    ///
    /// `data` is indexed by grid position, as a rank-1 container sampled on
    /// this grid would be.
    fn evaluate<T: Scalar>(&self, data: &[T], x: Self::Value) -> Result<T> {
        let p = self.point(x)?;
        data.get(p.index).copied().ok_or(GridError::OutOfBounds {
            index: p.index,
            size: data.len(),
        })
    }

    /// Error for a coordinate that does not resolve on this grid.
    fn not_found(&self, x: Self::Value) -> GridError {
        GridError::PointNotFound {
            value: x.to_string(),
            grid: Self::NAME,
        }
    }
}

/// A grid of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Enum(EnumGrid),
    Real(RealGrid),
    KMesh(KMesh),
    Matsubara(MatsubaraGrid),
}

macro_rules! dispatch {
    ($grid:expr, $g:ident => $body:expr) => {
        match $grid {
            Grid::Enum($g) => $body,
            Grid::Real($g) => $body,
            Grid::KMesh($g) => $body,
            Grid::Matsubara($g) => $body,
        }
    };
}

macro_rules! impl_from_grid {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Grid {
                fn from(g: $ty) -> Self {
                    Grid::$variant(g)
                }
            }
        )*
    };
}

impl_from_grid!(
    Enum(EnumGrid),
    Real(RealGrid),
    KMesh(KMesh),
    Matsubara(MatsubaraGrid),
);

fn name_of<G: GridBase>(_: &G) -> &'static str {
    G::NAME
}

fn kind_of<G: GridBase>(_: &G) -> &'static str {
    <G::Value as GridValue>::KIND
}

fn value_of<G: GridBase>(_: &G, c: Coord) -> Result<G::Value> {
    G::Value::from_coord(c).ok_or(GridError::CoordKindMismatch {
        grid: G::NAME,
        expected: <G::Value as GridValue>::KIND,
        actual: c.kind(),
    })
}

fn point_of<G: GridBase>(g: &G, p: Point<Coord>) -> Result<Point<G::Value>> {
    Ok(Point::new(value_of(g, p.value)?, p.index))
}

impl Grid {
    /// Grid kind name.
    pub fn name(&self) -> &'static str {
        dispatch!(self, g => name_of(g))
    }

    /// Coordinate kind the grid accepts.
    pub fn coord_kind(&self) -> &'static str {
        dispatch!(self, g => kind_of(g))
    }

    pub fn size(&self) -> usize {
        dispatch!(self, g => g.size())
    }

    pub fn get(&self, index: usize) -> Result<Point<Coord>> {
        dispatch!(self, g => g.get(index).map(Point::into_coord))
    }

    pub fn points(&self) -> Vec<Point<Coord>> {
        dispatch!(self, g => g.points().iter().map(|p| p.into_coord()).collect())
    }

    pub fn values(&self) -> Vec<Coord> {
        dispatch!(self, g => g.points().iter().map(|p| p.value.into_coord()).collect())
    }

    pub fn find(&self, x: Coord) -> Result<Option<Bracket>> {
        dispatch!(self, g => Ok(g.find(value_of(g, x)?)))
    }

    pub fn find_nearest(&self, x: Coord) -> Result<Point<Coord>> {
        dispatch!(self, g => Ok(g.find_nearest(value_of(g, x)?).into_coord()))
    }

    pub fn point(&self, x: Coord) -> Result<Point<Coord>> {
        dispatch!(self, g => Ok(g.point(value_of(g, x)?)?.into_coord()))
    }

    pub fn translate(&self, x: Coord, delta: Coord) -> Result<Coord> {
        dispatch!(self, g => Ok(g.translate(value_of(g, x)?, value_of(g, delta)?).into_coord()))
    }

    pub fn shift(&self, x: Coord, delta: Coord) -> Result<Coord> {
        dispatch!(self, g => Ok(g.shift(value_of(g, x)?, value_of(g, delta)?)?.into_coord()))
    }

    pub fn shift_point(&self, p: Point<Coord>, delta: Coord) -> Result<Point<Coord>> {
        dispatch!(self, g => Ok(g.shift_point(point_of(g, p)?, value_of(g, delta)?)?.into_coord()))
    }

    /// Shift point `p` by the value of point `q`.
    ///
    /// On a k-mesh the indices are added modulo the point count; other grids
    /// shift by value.
    pub fn shift_by_point(&self, p: Point<Coord>, q: Point<Coord>) -> Result<Point<Coord>> {
        match self {
            Grid::KMesh(k) => Ok(k.shift_by_point(point_of(k, p)?, point_of(k, q)?).into_coord()),
            _ => self.shift_point(p, q.value),
        }
    }

    /// Integrate `f` with the grid's quadrature.
    pub fn integrate<T: Scalar, F: Fn(Coord) -> T>(&self, f: F) -> T {
        dispatch!(self, g => g.integrate(|x| f(x.into_coord())))
    }

    /// Integrate samples given in point order.
    pub fn integrate_samples<T: Scalar>(&self, samples: &[T]) -> T {
        dispatch!(self, g => g.integrate_samples(samples))
    }

    pub fn evaluate<T: Scalar>(&self, data: &[T], x: Coord) -> Result<T> {
        dispatch!(self, g => g.evaluate(data, value_of(g, x)?))
    }
}
