//! Element-wise container operations.

use crate::container::Container;
use crate::error::{GridError, Result};
use crate::scalar::Scalar;

fn check_same_shape<T: Scalar>(a: &Container<T>, b: &Container<T>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(GridError::ShapeMismatch {
            expected: a.shape().to_vec(),
            actual: b.shape().to_vec(),
        });
    }
    Ok(())
}

/// Return a new container with element-wise complex conjugation.
///
/// For real containers this is a copy.
///
/// # Example
///
/// ```
/// use gftools::{Container, c64};
/// use gftools::operations::conj;
///
/// let c = Container::from_vec(vec![c64::new(1.0, 2.0), c64::new(3.0, -4.0)], &[2]).unwrap();
/// let cc = conj(&c);
/// assert_eq!(cc[[0]].im, -2.0);
/// assert_eq!(cc[[1]].im, 4.0);
/// ```
pub fn conj<T: Scalar>(c: &Container<T>) -> Container<T> {
    apply(c, Scalar::conj)
}

/// Sum of all elements, reduced over the flat buffer.
///
/// # Example
///
/// ```
/// use gftools::Container;
/// use gftools::operations::sum;
///
/// let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(sum(&c), 10.0);
/// ```
pub fn sum<T: Scalar>(c: &Container<T>) -> T {
    pairwise_sum(c.data())
}

// Pairwise reduction keeps rounding error at O(log n).
fn pairwise_sum<T: Scalar>(data: &[T]) -> T {
    const BLOCK: usize = 64;
    if data.len() <= BLOCK {
        return data.iter().copied().sum();
    }
    let (lo, hi) = data.split_at(data.len() / 2);
    pairwise_sum(lo) + pairwise_sum(hi)
}

/// Apply a function to each element, returning a new container.
pub fn apply<T: Scalar, F>(c: &Container<T>, f: F) -> Container<T>
where
    F: Fn(T) -> T,
{
    let mut out = c.clone();
    apply_inplace(&mut out, f);
    out
}

/// Apply a function to each element in-place.
pub fn apply_inplace<T: Scalar, F>(c: &mut Container<T>, f: F)
where
    F: Fn(T) -> T,
{
    for x in c.data_mut() {
        *x = f(*x);
    }
}

/// Combine two containers of equal shape element-wise.
///
/// # Errors
///
/// Returns `GridError::ShapeMismatch` if the shapes differ.
///
/// # Example
///
/// ```
/// use gftools::Container;
/// use gftools::operations::apply_binary;
///
/// let a = Container::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
/// let b = Container::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();
/// let c = apply_binary(&a, &b, |x, y| x + y).unwrap();
/// assert_eq!(c.data(), &[5.0, 7.0, 9.0]);
/// ```
pub fn apply_binary<T: Scalar, F>(a: &Container<T>, b: &Container<T>, f: F) -> Result<Container<T>>
where
    F: Fn(T, T) -> T,
{
    check_same_shape(a, b)?;
    let data: Vec<T> = a
        .data()
        .iter()
        .zip(b.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Container::from_vec(data, a.shape())
}

/// Combine `b` into `a` element-wise, in place.
pub fn apply_binary_inplace<T: Scalar, F>(a: &mut Container<T>, b: &Container<T>, f: F) -> Result<()>
where
    F: Fn(T, T) -> T,
{
    check_same_shape(a, b)?;
    for (x, &y) in a.data_mut().iter_mut().zip(b.data().iter()) {
        *x = f(*x, y);
    }
    Ok(())
}

impl<T: Scalar> Container<T> {
    /// Element-wise sum with another container of equal shape.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        apply_binary(self, other, |x, y| x + y)
    }

    /// Element-wise difference with another container of equal shape.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        apply_binary(self, other, |x, y| x - y)
    }

    /// Element-wise product with another container of equal shape.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        apply_binary(self, other, |x, y| x * y)
    }

    /// Element-wise quotient with another container of equal shape.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        apply_binary(self, other, |x, y| x / y)
    }

    pub fn add_assign_from(&mut self, other: &Self) -> Result<()> {
        apply_binary_inplace(self, other, |x, y| x + y)
    }

    pub fn sub_assign_from(&mut self, other: &Self) -> Result<()> {
        apply_binary_inplace(self, other, |x, y| x - y)
    }

    pub fn mul_assign_from(&mut self, other: &Self) -> Result<()> {
        apply_binary_inplace(self, other, |x, y| x * y)
    }

    pub fn div_assign_from(&mut self, other: &Self) -> Result<()> {
        apply_binary_inplace(self, other, |x, y| x / y)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        sum(self)
    }

    /// New container holding the complex conjugate of every element.
    pub fn conj(&self) -> Self {
        conj(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    #[test]
    fn test_conj_f64() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        assert_eq!(conj(&c).data(), c.data());
    }

    #[test]
    fn test_conj_c64() {
        let c = Container::from_vec(vec![c64::new(1.0, 2.0), c64::new(3.0, -4.0)], &[2]).unwrap();
        let cc = c.conj();
        assert_eq!(cc.data(), &[c64::new(1.0, -2.0), c64::new(3.0, 4.0)]);
        // the original is untouched
        assert_eq!(c[[0]], c64::new(1.0, 2.0));
    }

    #[test]
    fn test_sum_large() {
        let n = 1000;
        let c = Container::from_fn(&[10, n / 10], |idx| (idx[0] * (n / 10) + idx[1]) as f64);
        assert_relative_eq!(c.sum(), (n * (n - 1) / 2) as f64);
    }

    #[test]
    fn test_sum_c64() {
        let c = Container::from_vec(vec![c64::new(1.0, 1.0), c64::new(2.0, -3.0)], &[2]).unwrap();
        assert_eq!(c.sum(), c64::new(3.0, -2.0));
    }

    #[test]
    fn test_apply_inplace() {
        let mut c = Container::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        apply_inplace(&mut c, |x| x * x);
        assert_eq!(c.data(), &[1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_try_ops() {
        let a = Container::from_vec(vec![6.0, 8.0], &[2]).unwrap();
        let b = Container::from_vec(vec![2.0, 4.0], &[2]).unwrap();
        assert_eq!(a.try_add(&b).unwrap().data(), &[8.0, 12.0]);
        assert_eq!(a.try_sub(&b).unwrap().data(), &[4.0, 4.0]);
        assert_eq!(a.try_mul(&b).unwrap().data(), &[12.0, 32.0]);
        assert_eq!(a.try_div(&b).unwrap().data(), &[3.0, 2.0]);
    }

    #[test]
    fn test_assign_from() {
        let mut a = Container::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Container::from_vec(vec![3.0, 5.0], &[2]).unwrap();
        a.add_assign_from(&b).unwrap();
        assert_eq!(a.data(), &[4.0, 7.0]);
        a.mul_assign_from(&b).unwrap();
        assert_eq!(a.data(), &[12.0, 35.0]);
        a.div_assign_from(&b).unwrap();
        a.sub_assign_from(&b).unwrap();
        assert_eq!(a.data(), &[1.0, 2.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Container::<f64>::zeros(&[2, 3]);
        let b = Container::<f64>::zeros(&[3, 2]);
        assert!(matches!(a.try_add(&b), Err(GridError::ShapeMismatch { .. })));
        let mut a = a;
        assert!(a.sub_assign_from(&b).is_err());
    }
}
