//! Analytic fallbacks for coordinates a grid object does not store.
//!
//! A tail is an immutable object behind an `Arc`. Filling a grid object
//! installs a new tail; algebra and shifts wrap the operands' tails in
//! combinators instead of copying them, so the tail of `a + b` keeps
//! pointing at the tails of `a` and `b`.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::grid::{Args, Coord};
use crate::grid_tuple::GridTuple;
use crate::scalar::Scalar;

/// Value of a grid object at an arbitrary coordinate tuple.
pub trait Tail<T: Scalar>: fmt::Debug + Send + Sync {
    fn eval(&self, args: &[Coord]) -> Result<T>;
}

/// Shared, immutable tail.
pub type SharedTail<T> = Arc<dyn Tail<T>>;

/// True when both handles point at the same tail object.
pub fn same_tail<T: Scalar>(a: &SharedTail<T>, b: &SharedTail<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Tail of a freshly constructed object.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroTail;

impl<T: Scalar> Tail<T> for ZeroTail {
    fn eval(&self, _args: &[Coord]) -> Result<T> {
        Ok(T::zero())
    }
}

/// A closure used as tail.
pub struct FnTail<F> {
    f: F,
}

impl<F> FnTail<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnTail<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnTail")
    }
}

impl<T, F> Tail<T> for FnTail<F>
where
    T: Scalar,
    F: Fn(&[Coord]) -> T + Send + Sync,
{
    fn eval(&self, args: &[Coord]) -> Result<T> {
        Ok((self.f)(args))
    }
}

/// `inner(translate(args, deltas))`.
#[derive(Debug)]
pub struct ShiftedTail<T: Scalar> {
    inner: SharedTail<T>,
    grids: GridTuple,
    deltas: Args,
}

impl<T: Scalar> ShiftedTail<T> {
    pub fn new(inner: SharedTail<T>, grids: GridTuple, deltas: Args) -> Self {
        Self {
            inner,
            grids,
            deltas,
        }
    }
}

impl<T: Scalar> Tail<T> for ShiftedTail<T> {
    fn eval(&self, args: &[Coord]) -> Result<T> {
        let moved = self.grids.translate_args(args, &self.deltas)?;
        self.inner.eval(&moved)
    }
}

/// Elementwise operation of the algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn apply<T: Scalar>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

/// `lhs(args) op rhs(args)`.
#[derive(Debug)]
pub struct BinaryTail<T: Scalar> {
    lhs: SharedTail<T>,
    rhs: SharedTail<T>,
    op: BinaryOp,
}

impl<T: Scalar> BinaryTail<T> {
    pub fn new(lhs: SharedTail<T>, rhs: SharedTail<T>, op: BinaryOp) -> Self {
        Self { lhs, rhs, op }
    }
}

impl<T: Scalar> Tail<T> for BinaryTail<T> {
    fn eval(&self, args: &[Coord]) -> Result<T> {
        Ok(self.op.apply(self.lhs.eval(args)?, self.rhs.eval(args)?))
    }
}

/// `inner(args) op scalar`.
#[derive(Debug)]
pub struct ScalarTail<T: Scalar> {
    inner: SharedTail<T>,
    scalar: T,
    op: BinaryOp,
}

impl<T: Scalar> ScalarTail<T> {
    pub fn new(inner: SharedTail<T>, scalar: T, op: BinaryOp) -> Self {
        Self { inner, scalar, op }
    }
}

impl<T: Scalar> Tail<T> for ScalarTail<T> {
    fn eval(&self, args: &[Coord]) -> Result<T> {
        Ok(self.op.apply(self.inner.eval(args)?, self.scalar))
    }
}

/// Complex conjugate of `inner(args)`.
#[derive(Debug)]
pub struct ConjTail<T: Scalar> {
    inner: SharedTail<T>,
}

impl<T: Scalar> ConjTail<T> {
    pub fn new(inner: SharedTail<T>) -> Self {
        Self { inner }
    }
}

impl<T: Scalar> Tail<T> for ConjTail<T> {
    fn eval(&self, args: &[Coord]) -> Result<T> {
        Ok(self.inner.eval(args)?.conj())
    }
}
