//! Dense N-dimensional container with borrowed sub-views.
//!
//! A [`Container`] owns a flat row-major buffer together with its shape.
//! Fixing the leading index with [`Container::view`] yields a rank-(N-1)
//! [`ContainerView`] that aliases the parent buffer:
//!
//! ```text
//! Container { shape: [2, 3], data: [a b c d e f] }
//!   view(0) -> ContainerView { shape: [3], data: [a b c] }
//!   view(1) -> ContainerView { shape: [3], data: [d e f] }
//! ```
//!
//! Views borrow the owner, so they cannot outlive it.

use std::ops::{Index, IndexMut};

use crate::error::{GridError, Result};
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides, linear_to_cartesian};

/// A dense N-dimensional container in row-major order.
///
/// # Invariants
/// - `data.len() == shape.iter().product()`.
/// - `strides == compute_strides(&shape)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T: Scalar> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Immutable rank-(N-1) (or full) view aliasing another container's buffer.
#[derive(Debug, Clone, Copy)]
pub struct ContainerView<'a, T: Scalar> {
    data: &'a [T],
    shape: &'a [usize],
    strides: &'a [usize],
}

/// Mutable view aliasing another container's buffer.
#[derive(Debug)]
pub struct ContainerViewMut<'a, T: Scalar> {
    data: &'a mut [T],
    shape: &'a [usize],
    strides: &'a [usize],
}

fn checked_linear(indices: &[usize], shape: &[usize], strides: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(GridError::WrongNumberOfIndices {
            expected: shape.len(),
            actual: indices.len(),
        });
    }
    for (&idx, &dim) in indices.iter().zip(shape.iter()) {
        if idx >= dim {
            return Err(GridError::IndexOutOfBounds {
                index: idx,
                dim_size: dim,
            });
        }
    }
    Ok(cartesian_to_linear(indices, strides))
}

fn leading_block(i: usize, shape: &[usize], strides: &[usize]) -> Result<(usize, usize)> {
    if shape.is_empty() {
        return Err(GridError::RankMismatch {
            expected: 1,
            actual: 0,
        });
    }
    if i >= shape[0] {
        return Err(GridError::IndexOutOfBounds {
            index: i,
            dim_size: shape[0],
        });
    }
    let start = i * strides[0];
    Ok((start, start + strides[0]))
}

impl<T: Scalar> Container<T> {
    /// Create a new container with the given shape, zero-initialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use gftools::Container;
    ///
    /// let c: Container<f64> = Container::zeros(&[2, 3, 4]);
    /// assert_eq!(c.shape(), &[2, 3, 4]);
    /// assert_eq!(c.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        let len: usize = shape.iter().product();
        Self {
            data: vec![T::zero(); len],
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Create a container from row-major data and shape.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ShapeMismatch` if the data length doesn't match the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use gftools::Container;
    ///
    /// let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(c.get(&[0, 1]).unwrap(), &2.0);
    /// assert_eq!(c.get(&[1, 0]).unwrap(), &4.0);
    /// ```
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        })
    }

    /// Create a container by evaluating `f` at every multi-index.
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let len: usize = shape.iter().product();
        let data = (0..len)
            .map(|k| f(&linear_to_cartesian(k, shape)))
            .collect();
        Self {
            data,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Get the shape of the container.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the rank (number of dimensions).
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Get total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Get underlying data as slice.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get underlying data as mutable slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the container and return the flat buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get element by linear index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    /// Get element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns error if indices are out of bounds or of the wrong count.
    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        let k = checked_linear(indices, &self.shape, &self.strides)?;
        Ok(&self.data[k])
    }

    /// Get mutable element by cartesian indices.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let k = checked_linear(indices, &self.shape, &self.strides)?;
        Ok(&mut self.data[k])
    }

    /// Set element by cartesian indices.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Fill all elements with a value.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Borrow the whole container as a view.
    pub fn as_view(&self) -> ContainerView<'_, T> {
        ContainerView {
            data: &self.data,
            shape: &self.shape,
            strides: &self.strides,
        }
    }

    /// Borrow the whole container as a mutable view.
    pub fn as_view_mut(&mut self) -> ContainerViewMut<'_, T> {
        ContainerViewMut {
            data: &mut self.data,
            shape: &self.shape,
            strides: &self.strides,
        }
    }

    /// Rank-(N-1) view at leading index `i`. No data is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use gftools::Container;
    ///
    /// let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let row = c.view(1).unwrap();
    /// assert_eq!(row.shape(), &[3]);
    /// assert_eq!(row.data(), &[4.0, 5.0, 6.0]);
    /// ```
    pub fn view(&self, i: usize) -> Result<ContainerView<'_, T>> {
        self.as_view().into_view(i)
    }

    /// Mutable rank-(N-1) view at leading index `i`.
    pub fn view_mut(&mut self, i: usize) -> Result<ContainerViewMut<'_, T>> {
        self.as_view_mut().into_view_mut(i)
    }
}

impl<'a, T: Scalar> ContainerView<'a, T> {
    /// Shape of the viewed block.
    #[inline]
    pub fn shape(&self) -> &'a [usize] {
        self.shape
    }

    /// Rank of the viewed block.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of viewed elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Viewed data in row-major order.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn get(&self, indices: &[usize]) -> Result<&'a T> {
        let k = checked_linear(indices, self.shape, self.strides)?;
        Ok(&self.data[k])
    }

    /// Consume the view and narrow it to leading index `i`.
    pub fn into_view(self, i: usize) -> Result<ContainerView<'a, T>> {
        let (start, end) = leading_block(i, self.shape, self.strides)?;
        Ok(ContainerView {
            data: &self.data[start..end],
            shape: &self.shape[1..],
            strides: &self.strides[1..],
        })
    }

    /// Rank-(N-1) view at leading index `i`.
    pub fn view(&self, i: usize) -> Result<ContainerView<'a, T>> {
        self.into_view(i)
    }

    /// Copy the viewed block into an owning container.
    pub fn to_container(&self) -> Container<T> {
        Container {
            data: self.data.to_vec(),
            shape: self.shape.to_vec(),
            strides: self.strides.to_vec(),
        }
    }
}

impl<'a, T: Scalar> ContainerViewMut<'a, T> {
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        let k = checked_linear(indices, self.shape, self.strides)?;
        Ok(&self.data[k])
    }

    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        let k = checked_linear(indices, self.shape, self.strides)?;
        self.data[k] = value;
        Ok(())
    }

    /// Fill the viewed block with a value; writes through to the owner.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Consume the view and narrow it to leading index `i`.
    pub fn into_view_mut(self, i: usize) -> Result<ContainerViewMut<'a, T>> {
        let ContainerViewMut {
            data,
            shape,
            strides,
        } = self;
        let (start, end) = leading_block(i, shape, strides)?;
        Ok(ContainerViewMut {
            data: &mut data[start..end],
            shape: &shape[1..],
            strides: &strides[1..],
        })
    }

    /// Reborrowed rank-(N-1) view at leading index `i`.
    pub fn view_mut(&mut self, i: usize) -> Result<ContainerViewMut<'_, T>> {
        let (start, end) = leading_block(i, self.shape, self.strides)?;
        Ok(ContainerViewMut {
            data: &mut self.data[start..end],
            shape: &self.shape[1..],
            strides: &self.strides[1..],
        })
    }
}

impl<T: Scalar, const N: usize> Index<[usize; N]> for Container<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        match self.get(&indices) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Scalar, const N: usize> IndexMut<[usize; N]> for Container<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        match self.get_mut(&indices) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    fn test_zeros_generic<T: Scalar>() {
        let c: Container<T> = Container::zeros(&[2, 3]);
        assert_eq!(c.shape(), &[2, 3]);
        assert_eq!(c.rank(), 2);
        assert_eq!(c.len(), 6);
        assert_eq!(c.strides(), &[3, 1]);
        for i in 0..6 {
            assert_eq!(*c.get_linear(i).unwrap(), T::zero());
        }
    }

    #[test]
    fn test_zeros_f64() {
        test_zeros_generic::<f64>();
    }

    #[test]
    fn test_zeros_c64() {
        test_zeros_generic::<c64>();
    }

    #[test]
    fn test_from_vec_row_major() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(c.get(&[0, 0]).unwrap(), &1.0);
        assert_eq!(c.get(&[0, 2]).unwrap(), &3.0);
        assert_eq!(c.get(&[1, 0]).unwrap(), &4.0);
        assert_eq!(c[[1, 2]], 6.0);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let result = Container::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[2, 3]);
        assert!(matches!(result, Err(GridError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let c: Container<f64> = Container::zeros(&[2, 3]);
        assert!(matches!(
            c.get(&[2, 0]),
            Err(GridError::IndexOutOfBounds { index: 2, dim_size: 2 })
        ));
        assert!(matches!(
            c.get(&[0]),
            Err(GridError::WrongNumberOfIndices { expected: 2, actual: 1 })
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_out_of_bounds() {
        let c: Container<f64> = Container::zeros(&[2, 3]);
        let _ = c[[0, 3]];
    }

    #[test]
    fn test_from_fn() {
        let c = Container::from_fn(&[2, 3], |idx| (idx[0] * 10 + idx[1]) as f64);
        assert_eq!(c.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_view_aliases_parent() {
        let c = Container::from_fn(&[2, 3, 4], |idx| (idx[0] * 100 + idx[1] * 10 + idx[2]) as f64);
        let v = c.view(1).unwrap();
        assert_eq!(v.shape(), &[3, 4]);
        assert_eq!(*v.get(&[2, 3]).unwrap(), 123.0);
        assert_eq!(v.data().as_ptr(), c.data()[12..].as_ptr());

        let vv = v.view(2).unwrap();
        assert_eq!(vv.shape(), &[4]);
        assert_eq!(vv.data(), &[120.0, 121.0, 122.0, 123.0]);
    }

    #[test]
    fn test_view_mut_writes_through() {
        let mut c: Container<f64> = Container::zeros(&[2, 2]);
        {
            let mut row = c.view_mut(1).unwrap();
            row.set(&[0], 5.0).unwrap();
            row.data_mut()[1] = 6.0;
        }
        assert_eq!(c.data(), &[0.0, 0.0, 5.0, 6.0]);

        c.view_mut(0).unwrap().fill(1.0);
        assert_eq!(c.data(), &[1.0, 1.0, 5.0, 6.0]);
    }

    #[test]
    fn test_nested_view_mut() {
        let mut c: Container<f64> = Container::zeros(&[2, 2, 2]);
        let mut outer = c.view_mut(1).unwrap();
        outer.view_mut(0).unwrap().set(&[1], 7.0).unwrap();
        assert_eq!(c[[1, 0, 1]], 7.0);
    }

    #[test]
    fn test_view_out_of_bounds() {
        let c: Container<f64> = Container::zeros(&[2, 3]);
        assert!(c.view(2).is_err());
        let row = c.view(0).unwrap();
        let scalar = row.view(0).unwrap();
        assert_eq!(scalar.rank(), 0);
        assert!(matches!(
            scalar.view(0),
            Err(GridError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_view_to_owned() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let row = c.view(1).unwrap().to_container();
        assert_eq!(row.shape(), &[2]);
        assert_eq!(row.data(), &[3.0, 4.0]);
    }

    #[test]
    fn test_fill_and_set() {
        let mut c: Container<f64> = Container::zeros(&[2, 3]);
        c.fill(5.0);
        c.set(&[1, 2], 42.0).unwrap();
        c[[0, 0]] = -1.0;
        assert_eq!(c.data(), &[-1.0, 5.0, 5.0, 5.0, 5.0, 42.0]);
    }
}
