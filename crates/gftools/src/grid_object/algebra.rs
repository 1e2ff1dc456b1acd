//! Elementwise algebra of grid objects.
//!
//! Values combine elementwise, tails combine lazily through
//! [`BinaryTail`] and [`ScalarTail`]. Operands must have equal grid sizes;
//! the result lives on the left operand's grids.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

use crate::error::{GridError, Result};
use crate::grid_object::GridObject;
use crate::grid_object::tail::{BinaryOp, BinaryTail, ScalarTail};
use crate::operations::{apply_binary, apply_binary_inplace};
use crate::scalar::Scalar;

impl<T: Scalar> GridObject<T> {
    fn check_same_dims(&self, other: &Self) -> Result<()> {
        if self.grids.dims() == other.grids.dims() {
            Ok(())
        } else {
            Err(GridError::ShapeMismatch {
                expected: self.grids.dims().to_vec(),
                actual: other.grids.dims().to_vec(),
            })
        }
    }

    fn combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.check_same_dims(other)?;
        Ok(Self {
            grids: self.grids.clone(),
            data: apply_binary(&self.data, &other.data, |a, b| op.apply(a, b))?,
            tail: Arc::new(BinaryTail::new(self.tail.clone(), other.tail.clone(), op)),
        })
    }

    fn combine_assign(&mut self, other: &Self, op: BinaryOp) -> Result<()> {
        self.check_same_dims(other)?;
        apply_binary_inplace(&mut self.data, &other.data, |a, b| op.apply(a, b))?;
        self.tail = Arc::new(BinaryTail::new(self.tail.clone(), other.tail.clone(), op));
        Ok(())
    }

    fn combine_scalar_assign(&mut self, rhs: T, op: BinaryOp) {
        for x in self.data.data_mut() {
            *x = op.apply(*x, rhs);
        }
        self.tail = Arc::new(ScalarTail::new(self.tail.clone(), rhs, op));
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when the grid sizes differ.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Add)
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Sub)
    }

    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Mul)
    }

    pub fn try_div(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Div)
    }

    pub fn add_assign_from(&mut self, other: &Self) -> Result<()> {
        self.combine_assign(other, BinaryOp::Add)
    }

    pub fn sub_assign_from(&mut self, other: &Self) -> Result<()> {
        self.combine_assign(other, BinaryOp::Sub)
    }

    pub fn mul_assign_from(&mut self, other: &Self) -> Result<()> {
        self.combine_assign(other, BinaryOp::Mul)
    }

    pub fn div_assign_from(&mut self, other: &Self) -> Result<()> {
        self.combine_assign(other, BinaryOp::Div)
    }
}

macro_rules! impl_grid_object_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:expr) => {
        impl<T: Scalar> $trait<&GridObject<T>> for &GridObject<T> {
            type Output = GridObject<T>;

            fn $method(self, rhs: &GridObject<T>) -> GridObject<T> {
                match self.combine(rhs, $op) {
                    Ok(g) => g,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: Scalar> $trait<GridObject<T>> for GridObject<T> {
            type Output = GridObject<T>;

            fn $method(mut self, rhs: GridObject<T>) -> GridObject<T> {
                self.$assign_method(&rhs);
                self
            }
        }

        impl<T: Scalar> $trait<T> for &GridObject<T> {
            type Output = GridObject<T>;

            fn $method(self, rhs: T) -> GridObject<T> {
                let mut out = self.clone();
                out.combine_scalar_assign(rhs, $op);
                out
            }
        }

        impl<T: Scalar> $trait<T> for GridObject<T> {
            type Output = GridObject<T>;

            fn $method(mut self, rhs: T) -> GridObject<T> {
                self.combine_scalar_assign(rhs, $op);
                self
            }
        }

        impl<T: Scalar> $assign_trait<&GridObject<T>> for GridObject<T> {
            fn $assign_method(&mut self, rhs: &GridObject<T>) {
                if let Err(e) = self.combine_assign(rhs, $op) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar> $assign_trait<T> for GridObject<T> {
            fn $assign_method(&mut self, rhs: T) {
                self.combine_scalar_assign(rhs, $op);
            }
        }
    };
}

impl_grid_object_op!(Add, add, AddAssign, add_assign, BinaryOp::Add);
impl_grid_object_op!(Sub, sub, SubAssign, sub_assign, BinaryOp::Sub);
impl_grid_object_op!(Mul, mul, MulAssign, mul_assign, BinaryOp::Mul);
impl_grid_object_op!(Div, div, DivAssign, div_assign, BinaryOp::Div);

impl<T: Scalar> Neg for GridObject<T> {
    type Output = GridObject<T>;

    fn neg(mut self) -> GridObject<T> {
        self.combine_scalar_assign(-T::one(), BinaryOp::Mul);
        self
    }
}

impl<T: Scalar> Neg for &GridObject<T> {
    type Output = GridObject<T>;

    fn neg(self) -> GridObject<T> {
        -self.clone()
    }
}
