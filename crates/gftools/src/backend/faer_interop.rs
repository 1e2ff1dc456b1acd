//! Zero-copy conversion between containers and faer matrices.
//!
//! Containers are row-major, so a rank-2 container is viewed as a faer
//! matrix with unit column stride. Rank-1 containers are viewed as column
//! vectors (or `n x 1` matrices). Diagonal matrices are copied.

use faer::diag::Diag;
use faer::{Col, ColRef, MatMut, MatRef};

use crate::container::Container;
use crate::error::{GridError, Result};
use crate::scalar::Scalar;

fn matrix_dims<T: Scalar>(c: &Container<T>) -> Result<(usize, usize)> {
    match c.shape() {
        [n] => Ok((*n, 1)),
        [rows, cols] => Ok((*rows, *cols)),
        shape => Err(GridError::RankMismatch {
            expected: 2,
            actual: shape.len(),
        }),
    }
}

impl<T: Scalar> Container<T> {
    /// View a rank-1 or rank-2 container as a faer matrix (zero-copy).
    ///
    /// # Errors
    ///
    /// Returns `GridError::RankMismatch` for rank 0 or rank > 2.
    ///
    /// # Example
    ///
    /// ```
    /// use gftools::Container;
    ///
    /// let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let m = c.as_matrix().unwrap();
    /// assert_eq!((m.nrows(), m.ncols()), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn as_matrix(&self) -> Result<MatRef<'_, T>> {
        let (rows, cols) = matrix_dims(self)?;
        Ok(MatRef::from_row_major_slice(self.data(), rows, cols))
    }

    /// View a rank-1 or rank-2 container as a mutable faer matrix (zero-copy).
    pub fn as_matrix_mut(&mut self) -> Result<MatMut<'_, T>> {
        let (rows, cols) = matrix_dims(self)?;
        Ok(MatMut::from_row_major_slice_mut(self.data_mut(), rows, cols))
    }

    /// View the flat buffer of a rank-1 or rank-2 container as a column vector.
    pub fn as_vector(&self) -> Result<ColRef<'_, T>> {
        matrix_dims(self)?;
        Ok(ColRef::from_slice(self.data()))
    }

    /// Copy into a faer diagonal matrix.
    ///
    /// A rank-1 container supplies the diagonal directly; a rank-2 container
    /// contributes its main diagonal.
    pub fn as_diagonal_matrix(&self) -> Result<Diag<T>> {
        match self.shape() {
            [n] => Ok(Col::from_fn(*n, |i| self.data()[i]).into_diagonal()),
            [rows, cols] => {
                let n = (*rows).min(*cols);
                let stride = *cols;
                Ok(Col::from_fn(n, |i| self.data()[i * stride + i]).into_diagonal())
            }
            shape => Err(GridError::RankMismatch {
                expected: 2,
                actual: shape.len(),
            }),
        }
    }

    /// Create a rank-2 container from a faer matrix (copies data).
    ///
    /// # Example
    ///
    /// ```
    /// use faer::Mat;
    /// use gftools::Container;
    ///
    /// let m = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    /// let c = Container::from_matrix(m.as_ref());
    /// assert_eq!(c.shape(), &[2, 3]);
    /// assert_eq!(c.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn from_matrix(mat: MatRef<'_, T>) -> Self {
        let (rows, cols) = (mat.nrows(), mat.ncols());
        Container::from_fn(&[rows, cols], |idx| mat[(idx[0], idx[1])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;
    use approx::assert_relative_eq;
    use faer::Mat;

    #[test]
    fn test_as_matrix_row_major() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let m = c.as_matrix().unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_relative_eq!(m[(0, 0)], 1.0);
        assert_relative_eq!(m[(0, 2)], 3.0);
        assert_relative_eq!(m[(1, 0)], 4.0);
        assert_relative_eq!(m[(1, 2)], 6.0);
    }

    #[test]
    fn test_as_matrix_zero_copy() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let m = c.as_matrix().unwrap();
        assert_eq!(
            c.data().as_ptr(),
            m.as_ptr(),
            "faer matrix should share memory with the container"
        );
    }

    #[test]
    fn test_as_matrix_mut_writes_through() {
        let mut c: Container<f64> = Container::zeros(&[2, 3]);
        {
            let mut m = c.as_matrix_mut().unwrap();
            m[(0, 1)] = 1.0;
            m[(1, 2)] = 5.0;
        }
        assert_eq!(c[[0, 1]], 1.0);
        assert_eq!(c[[1, 2]], 5.0);
    }

    #[test]
    fn test_rank_one_as_column() {
        let c = Container::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let m = c.as_matrix().unwrap();
        assert_eq!((m.nrows(), m.ncols()), (3, 1));
        let v = c.as_vector().unwrap();
        assert_eq!(v.nrows(), 3);
        assert_relative_eq!(v[2], 3.0);
    }

    #[test]
    fn test_rank_three_rejected() {
        let c: Container<f64> = Container::zeros(&[2, 2, 2]);
        assert!(matches!(
            c.as_matrix(),
            Err(GridError::RankMismatch { expected: 2, actual: 3 })
        ));
        assert!(c.as_vector().is_err());
        assert!(c.as_diagonal_matrix().is_err());
    }

    #[test]
    fn test_as_diagonal_matrix() {
        let v = Container::from_vec(vec![c64::new(1.0, 1.0), c64::new(2.0, 0.0)], &[2]).unwrap();
        let d = v.as_diagonal_matrix().unwrap();
        assert_eq!(d.column_vector()[0], c64::new(1.0, 1.0));
        assert_eq!(d.column_vector()[1], c64::new(2.0, 0.0));

        let m = Container::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let d = m.as_diagonal_matrix().unwrap();
        assert_eq!(d.column_vector().nrows(), 2);
        assert_relative_eq!(d.column_vector()[0], 1.0);
        assert_relative_eq!(d.column_vector()[1], 5.0);
    }

    #[test]
    fn test_from_matrix_roundtrip() {
        let mat = Mat::from_fn(3, 2, |i, j| (10 * i + j) as f64);
        let c = Container::from_matrix(mat.as_ref());
        assert_eq!(c.shape(), &[3, 2]);
        let back = c.as_matrix().unwrap();
        for i in 0..3 {
            for j in 0..2 {
                assert_relative_eq!(back[(i, j)], mat[(i, j)]);
            }
        }
    }
}
