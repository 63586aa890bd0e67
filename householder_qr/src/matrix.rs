//! Owned dense complex matrix.
//!
//! Storage is column-major (same as nalgebra and Julia), so a matrix column is
//! one contiguous slice. The Householder update touches whole columns at a
//! time and relies on this layout.

use std::ops::{Index, IndexMut};

use nalgebra::DMatrix;

use crate::error::QrError;
use crate::scalar::{BigComplex, Complex64, ComplexScalar, ExtendedPrecision};

/// Dense `rows x cols` matrix of complex scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> ComplexMatrix<T> {
    /// Build a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    /// Wrap a column-major buffer.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, QrError> {
        if data.len() != rows * cols {
            return Err(QrError::InvalidMatrixData {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from a row-major buffer, reordering into column-major storage.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, QrError>
    where
        T: Clone,
    {
        if data.len() != rows * cols {
            return Err(QrError::InvalidMatrixData {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self::from_fn(rows, cols, |i, j| data[i * cols + j].clone()))
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(col * self.rows + row)
        } else {
            None
        }
    }

    /// Column `col` as a contiguous slice.
    pub fn col(&self, col: usize) -> &[T] {
        let start = col * self.rows;
        &self.data[start..start + self.rows]
    }

    /// The whole column-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> ComplexMatrix<U> {
        ComplexMatrix {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> Index<(usize, usize)> for ComplexMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[col * self.rows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for ComplexMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[col * self.rows + row]
    }
}

impl<T: ComplexScalar> ComplexMatrix<T> {
    /// Round every entry to double precision.
    pub fn to_complex64(&self) -> ComplexMatrix<Complex64> {
        self.map(|z| z.to_complex64())
    }

    /// Every entry multiplied by a real factor.
    pub fn scaled(&self, factor: &T::Real) -> Self {
        self.map(|z| z.scale(factor))
    }

    /// True when every entry strictly below the diagonal is exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        (0..self.cols).all(|j| self.col(j).iter().skip(j + 1).all(ComplexScalar::is_zero))
    }
}

impl ComplexMatrix<Complex64> {
    /// Widen every entry to the given extended precision.
    pub fn to_extended(&self, precision: &ExtendedPrecision) -> ComplexMatrix<BigComplex> {
        self.map(|z| precision.complex(*z))
    }

    /// Copy into an nalgebra matrix.
    pub fn to_dmatrix(&self) -> DMatrix<Complex64> {
        DMatrix::from_column_slice(self.rows, self.cols, &self.data)
    }

    /// Squared Frobenius norm of `self - other`: the sum over all entries of
    /// the squared real difference plus the squared imaginary difference.
    pub fn frobenius_diff_sqr(&self, other: &Self) -> Result<f64, QrError> {
        if self.shape() != other.shape() {
            return Err(QrError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| {
                let dr = a.re - b.re;
                let di = a.im - b.im;
                dr * dr + di * di
            })
            .sum())
    }
}

impl From<&DMatrix<Complex64>> for ComplexMatrix<Complex64> {
    fn from(mat: &DMatrix<Complex64>) -> Self {
        // nalgebra stores data in column-major order, same as ours
        Self {
            data: mat.as_slice().to_vec(),
            rows: mat.nrows(),
            cols: mat.ncols(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_from_row_major_reorders_into_columns() {
        let m = ComplexMatrix::from_row_major(2, 3, (0..6).map(|v| c(v as f64, 0.0)).collect())
            .unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 2)], c(2.0, 0.0));
        assert_eq!(m[(1, 0)], c(3.0, 0.0));
        assert_eq!(m.col(1), &[c(1.0, 0.0), c(4.0, 0.0)]);
    }

    #[test]
    fn test_from_column_major_rejects_wrong_length() {
        let err = ComplexMatrix::from_column_major(2, 2, vec![c(0.0, 0.0); 3]).unwrap_err();
        assert_eq!(err, QrError::InvalidMatrixData { expected: 4, got: 3 });
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let m = ComplexMatrix::from_fn(2, 2, |_, _| c(1.0, 1.0));
        assert!(m.get(2, 0).is_none());
        assert!(m.get(0, 2).is_none());
        assert_eq!(m.get(1, 1), Some(&c(1.0, 1.0)));
    }

    #[test]
    fn test_is_upper_triangular() {
        let mut m = ComplexMatrix::from_fn(3, 3, |i, j| {
            if i > j {
                c(0.0, 0.0)
            } else {
                c(1.0, -1.0)
            }
        });
        assert!(m.is_upper_triangular());
        m[(2, 0)] = c(0.0, 1e-300);
        assert!(!m.is_upper_triangular());
        m[(2, 0)] = c(f64::MIN_POSITIVE / 4.0, 0.0);
        assert!(!m.is_upper_triangular());
    }

    #[test]
    fn test_frobenius_diff_sqr_sums_both_parts() {
        let a = ComplexMatrix::from_fn(2, 2, |_, _| c(1.0, 1.0));
        let mut b = a.clone();
        b[(0, 1)] = c(2.0, 3.0); // contributes 1 + 4
        b[(1, 0)] = c(1.0, 0.0); // contributes 1
        let d = a.frobenius_diff_sqr(&b).unwrap();
        assert!((d - 6.0).abs() < 1e-15);
        assert_eq!(a.frobenius_diff_sqr(&a), Ok(0.0));
    }

    #[test]
    fn test_frobenius_diff_sqr_rejects_shape_mismatch() {
        let a = ComplexMatrix::from_fn(2, 2, |_, _| c(0.0, 0.0));
        let b = ComplexMatrix::from_fn(3, 2, |_, _| c(0.0, 0.0));
        assert_eq!(
            a.frobenius_diff_sqr(&b),
            Err(QrError::DimensionMismatch {
                left: (2, 2),
                right: (3, 2)
            })
        );
    }

    #[test]
    fn test_dmatrix_conversion_preserves_layout() {
        let m = ComplexMatrix::from_fn(3, 2, |i, j| c(i as f64, j as f64));
        let d = m.to_dmatrix();
        assert_eq!(d[(2, 1)], c(2.0, 1.0));
        assert_eq!(ComplexMatrix::from(&d), m);
    }

    #[test]
    fn test_extended_round_trip_is_exact() {
        let m = ComplexMatrix::from_fn(2, 2, |i, j| c(0.1 * i as f64, -0.3 * j as f64));
        let wide = m.to_extended(&ExtendedPrecision::default());
        assert_eq!(wide.to_complex64(), m);
    }
}
