//! Operator overloads for containers.
//!
//! Container-container operators panic on shape mismatch; use the fallible
//! `try_*` methods when the shapes are not known to agree. Scalar operands
//! are broadcast over every element.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::container::Container;
use crate::operations::elementwise::{apply, apply_binary, apply_binary_inplace, apply_inplace};
use crate::scalar::Scalar;

macro_rules! impl_container_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Scalar> $trait<&Container<T>> for &Container<T> {
            type Output = Container<T>;

            fn $method(self, rhs: &Container<T>) -> Container<T> {
                match apply_binary(self, rhs, |x, y| x $op y) {
                    Ok(c) => c,
                    Err(e) => panic!("{e}"),
                }
            }
        }

        impl<T: Scalar> $trait<Container<T>> for Container<T> {
            type Output = Container<T>;

            fn $method(self, rhs: Container<T>) -> Container<T> {
                &self $op &rhs
            }
        }

        impl<T: Scalar> $trait<T> for &Container<T> {
            type Output = Container<T>;

            fn $method(self, rhs: T) -> Container<T> {
                apply(self, |x| x $op rhs)
            }
        }

        impl<T: Scalar> $trait<T> for Container<T> {
            type Output = Container<T>;

            fn $method(mut self, rhs: T) -> Container<T> {
                apply_inplace(&mut self, |x| x $op rhs);
                self
            }
        }

        impl<T: Scalar> $assign_trait<&Container<T>> for Container<T> {
            fn $assign_method(&mut self, rhs: &Container<T>) {
                if let Err(e) = apply_binary_inplace(self, rhs, |x, y| x $op y) {
                    panic!("{e}");
                }
            }
        }

        impl<T: Scalar> $assign_trait<T> for Container<T> {
            fn $assign_method(&mut self, rhs: T) {
                apply_inplace(self, |x| x $op rhs);
            }
        }
    };
}

impl_container_op!(Add, add, AddAssign, add_assign, +);
impl_container_op!(Sub, sub, SubAssign, sub_assign, -);
impl_container_op!(Mul, mul, MulAssign, mul_assign, *);
impl_container_op!(Div, div, DivAssign, div_assign, /);

impl<T: Scalar> Neg for Container<T> {
    type Output = Container<T>;

    fn neg(mut self) -> Container<T> {
        apply_inplace(&mut self, |x| -x);
        self
    }
}

impl<T: Scalar> Neg for &Container<T> {
    type Output = Container<T>;

    fn neg(self) -> Container<T> {
        apply(self, |x| -x)
    }
}
