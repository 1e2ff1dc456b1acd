//! Scalar trait for container and grid object element types.

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use faer::c64;

/// Trait for scalar types stored in containers and grid objects.
///
/// Implemented for `f64` and [`c64`]. Real-valued quantities (coordinates,
/// weights, norms) are always `f64`.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
{
    /// True for real scalar types.
    const IS_REAL: bool;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embed a real number.
    fn from_real(x: f64) -> Self;

    /// Complex conjugate (identity for real types).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> f64;

    /// Imaginary part (zero for real types).
    fn im(self) -> f64;

    /// Absolute value (modulus for complex types).
    fn abs(self) -> f64;

    /// Squared absolute value.
    fn abs_sqr(self) -> f64;
}

impl Scalar for f64 {
    const IS_REAL: bool = true;

    fn one() -> Self {
        1.0
    }

    fn from_real(x: f64) -> Self {
        x
    }

    fn conj(self) -> Self {
        self
    }

    fn re(self) -> f64 {
        self
    }

    fn im(self) -> f64 {
        0.0
    }

    fn abs(self) -> f64 {
        f64::abs(self)
    }

    fn abs_sqr(self) -> f64 {
        self * self
    }
}

impl Scalar for c64 {
    const IS_REAL: bool = false;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_real(x: f64) -> Self {
        c64::new(x, 0.0)
    }

    fn conj(self) -> Self {
        c64::new(self.re, -self.im)
    }

    fn re(self) -> f64 {
        self.re
    }

    fn im(self) -> f64 {
        self.im
    }

    fn abs(self) -> f64 {
        self.norm()
    }

    fn abs_sqr(self) -> f64 {
        self.norm_sqr()
    }
}
