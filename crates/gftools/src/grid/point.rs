//! Grid points and coordinates.

use std::fmt;

use smallvec::SmallVec;

use crate::scalar::c64;

/// A coordinate value together with its position in a grid.
///
/// Two points are equal iff both value and index match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<V> {
    pub value: V,
    pub index: usize,
}

impl<V> Point<V> {
    pub fn new(value: V, index: usize) -> Self {
        Self { value, index }
    }
}

impl<V: GridValue> Point<V> {
    /// Erase the concrete value type.
    pub fn into_coord(self) -> Point<Coord> {
        Point::new(self.value.into_coord(), self.index)
    }
}

/// A coordinate on any grid kind.
///
/// Enumeration grids use `Int`, real grids and k-meshes use `Real`,
/// Matsubara grids use `Complex` (purely imaginary frequencies).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    Int(i64),
    Real(f64),
    Complex(c64),
}

/// Coordinate tuple for one element of a multi-grid object.
pub type Args = SmallVec<[Coord; 4]>;

impl Coord {
    /// Name of the coordinate kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Coord::Int(_) => i64::KIND,
            Coord::Real(_) => f64::KIND,
            Coord::Complex(_) => c64::KIND,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Coord::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match *self {
            Coord::Real(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<c64> {
        match *self {
            Coord::Complex(z) => Some(z),
            _ => None,
        }
    }

    /// Real value of the coordinate (real part for complex coordinates).
    pub fn to_real(&self) -> f64 {
        match *self {
            Coord::Int(n) => n as f64,
            Coord::Real(x) => x,
            Coord::Complex(z) => z.re,
        }
    }

    /// The coordinate embedded in the complex plane.
    pub fn to_complex(&self) -> c64 {
        match *self {
            Coord::Int(n) => c64::new(n as f64, 0.0),
            Coord::Real(x) => c64::new(x, 0.0),
            Coord::Complex(z) => z,
        }
    }

    /// Distance between two coordinates of the same kind.
    ///
    /// Coordinates of different kinds are infinitely far apart.
    pub fn distance(&self, other: &Coord) -> f64 {
        match (*self, *other) {
            (Coord::Int(a), Coord::Int(b)) => (a - b).abs() as f64,
            (Coord::Real(a), Coord::Real(b)) => (a - b).abs(),
            (Coord::Complex(a), Coord::Complex(b)) => (a - b).norm(),
            _ => f64::INFINITY,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Int(n) => write!(f, "{n}"),
            Coord::Real(x) => write!(f, "{x}"),
            Coord::Complex(z) => write!(f, "{z}"),
        }
    }
}

impl From<i64> for Coord {
    fn from(n: i64) -> Self {
        Coord::Int(n)
    }
}

impl From<f64> for Coord {
    fn from(x: f64) -> Self {
        Coord::Real(x)
    }
}

impl From<c64> for Coord {
    fn from(z: c64) -> Self {
        Coord::Complex(z)
    }
}

/// Value types a concrete grid can be built from.
pub trait GridValue: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name of the coordinate kind.
    const KIND: &'static str;

    fn into_coord(self) -> Coord;

    fn from_coord(c: Coord) -> Option<Self>;
}

impl GridValue for i64 {
    const KIND: &'static str = "integer";

    fn into_coord(self) -> Coord {
        Coord::Int(self)
    }

    fn from_coord(c: Coord) -> Option<Self> {
        c.as_int()
    }
}

impl GridValue for f64 {
    const KIND: &'static str = "real";

    fn into_coord(self) -> Coord {
        Coord::Real(self)
    }

    fn from_coord(c: Coord) -> Option<Self> {
        c.as_real()
    }
}

impl GridValue for c64 {
    const KIND: &'static str = "complex";

    fn into_coord(self) -> Coord {
        Coord::Complex(self)
    }

    fn from_coord(c: Coord) -> Option<Self> {
        c.as_complex()
    }
}
