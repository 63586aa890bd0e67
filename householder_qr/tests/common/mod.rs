//! Shared helpers for integration tests
// Not every test target uses every helper.
#![allow(dead_code)]

use householder_qr::{Complex64, ComplexMatrix};
use nalgebra::DMatrix;

/// `AᴴA` computed by nalgebra.
pub fn gram(a: &ComplexMatrix<Complex64>) -> DMatrix<Complex64> {
    let m = a.to_dmatrix();
    m.adjoint() * &m
}

/// Largest entry-wise modulus of `a - b`.
pub fn max_abs_diff(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>) -> f64 {
    assert_eq!(a.shape(), b.shape(), "shape mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Panic unless `a` and `b` agree entry-wise to within `tol`.
pub fn assert_close(a: &ComplexMatrix<Complex64>, b: &ComplexMatrix<Complex64>, tol: f64) {
    let diff = max_abs_diff(&a.to_dmatrix(), &b.to_dmatrix());
    assert!(diff <= tol, "matrices differ by {} (tolerance {})", diff, tol);
}

/// Build a matrix from row-major `(re, im)` pairs.
pub fn matrix(rows: usize, cols: usize, entries: &[(f64, f64)]) -> ComplexMatrix<Complex64> {
    let data = entries.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
    ComplexMatrix::from_row_major(rows, cols, data).unwrap()
}
