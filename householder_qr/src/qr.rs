//! Householder QR factorization, generic over the scalar backend.
//!
//! The engine copies its input, reduces the copy in place column by column and
//! keeps the combined representation; only the upper-triangular factor `R` is
//! exposed. `Q` is never formed.
//!
//! ```
//! use householder_qr::{fixed_test_matrix, HouseholderQr};
//!
//! let a = fixed_test_matrix();
//! let qr = HouseholderQr::new(&a).unwrap();
//! let r = qr.r();
//! assert_eq!(r.shape(), (4, 4));
//! assert!(r.is_upper_triangular());
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::QrError;
use crate::householder::{Degeneracy, Reflector, REFLECTION_BETA};
use crate::matrix::ComplexMatrix;
use crate::scalar::{ComplexScalar, RealScalar};

/// How the trailing-column update of a single step is scheduled.
///
/// Columns are independent for a fixed step, so both settings produce
/// bit-identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Update the trailing columns on the rayon thread pool.
    Rayon,
}

/// A step whose reflector could not be built the regular way. Absorbed and
/// recorded; the factorization always runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SingularColumn {
    /// Zero-based elimination step, equal to the column index.
    pub step: usize,
    pub kind: SingularKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularKind {
    /// The leading entry of the column slice is exactly zero. Its phase is
    /// taken as `+1` and the leading entry becomes `‖x‖`, so the reflection
    /// still reduces the column. This deliberately departs from leaving the
    /// entry unscaled, which would only negate the slice.
    ZeroLeadingEntry,
    /// The whole column slice is exactly zero, or its norm underflows; the
    /// reflection is skipped.
    ZeroColumn,
}

impl From<Degeneracy> for SingularKind {
    fn from(d: Degeneracy) -> Self {
        match d {
            Degeneracy::ZeroLeadingEntry => Self::ZeroLeadingEntry,
            Degeneracy::ZeroColumn => Self::ZeroColumn,
        }
    }
}

/// Number of reflections needed for an `rows x cols` input. A square
/// matrix's last column is a 1x1 trailing block and needs none.
pub fn reflection_count(rows: usize, cols: usize) -> usize {
    if rows == cols {
        cols.saturating_sub(1)
    } else {
        cols
    }
}

/// Completed Householder QR factorization of an owned working copy.
#[derive(Debug, Clone)]
pub struct HouseholderQr<T> {
    qr: ComplexMatrix<T>,
    steps: usize,
    singular: Vec<SingularColumn>,
}

impl<T: ComplexScalar> HouseholderQr<T> {
    /// Factorize a copy of `a`. The input is left untouched.
    pub fn new(a: &ComplexMatrix<T>) -> Result<Self, QrError> {
        Self::with_parallelism(a, Parallelism::Sequential)
    }

    pub fn with_parallelism(a: &ComplexMatrix<T>, par: Parallelism) -> Result<Self, QrError> {
        let mut qr = Self::unreduced(a)?;
        qr.factorize(par);
        Ok(qr)
    }

    /// Validated working copy of `a` with no step applied yet.
    fn unreduced(a: &ComplexMatrix<T>) -> Result<Self, QrError> {
        let (rows, cols) = a.shape();
        QrError::check_dimensions(rows, cols)?;
        Ok(Self {
            qr: a.clone(),
            steps: reflection_count(rows, cols),
            singular: Vec::new(),
        })
    }

    /// β in the precision context of the working matrix.
    fn beta(&self) -> T::Real {
        self.qr[(0, 0)].abs2().from_f64_like(REFLECTION_BETA)
    }

    fn factorize(&mut self, par: Parallelism) {
        let (m, n) = self.qr.shape();
        log::debug!(
            "householder qr: {}x{} matrix, {} reflections, {:?}",
            m,
            n,
            self.steps,
            par
        );

        let beta = self.beta();
        for k in 0..self.steps {
            self.reduce_column(k, par, &beta);
        }
    }

    /// Step `k`: build the reflector from rows `k..m` of column `k` and apply
    /// it to columns `k..n`. Returns the reflector used, if any.
    fn reduce_column(
        &mut self,
        k: usize,
        par: Parallelism,
        beta: &T::Real,
    ) -> Option<Reflector<T>> {
        let m = self.qr.nrows();
        let x = self.qr.col(k)[k..].to_vec();
        let (reflector, degeneracy) = Reflector::from_column(x);

        if let Some(d) = degeneracy {
            log::warn!(
                "householder qr: column {} is degenerate ({:?}), {}",
                k,
                d,
                match d {
                    Degeneracy::ZeroLeadingEntry => "leading phase taken as +1",
                    Degeneracy::ZeroColumn => "reflection skipped",
                }
            );
            self.singular.push(SingularColumn {
                step: k,
                kind: d.into(),
            });
        }

        let reflector = reflector?;

        // columns k..n, each restricted to rows k..m
        let trailing = &mut self.qr.as_mut_slice()[k * m..];
        match par {
            Parallelism::Sequential => {
                for column in trailing.chunks_mut(m) {
                    reflector.apply(&mut column[k..], beta);
                }
            }
            Parallelism::Rayon => {
                trailing
                    .par_chunks_mut(m)
                    .for_each(|column| reflector.apply(&mut column[k..], beta));
            }
        }
        Some(reflector)
    }

    /// The upper-triangular factor as a fresh `cols x cols` matrix.
    ///
    /// Entries above and on the diagonal come from the reduced working
    /// matrix; entries below it are exact zeros.
    pub fn r(&self) -> ComplexMatrix<T> {
        let n = self.qr.ncols();
        ComplexMatrix::from_fn(n, n, |i, j| {
            let v = &self.qr[(i, j)];
            if i > j {
                v.zero_like()
            } else {
                v.clone()
            }
        })
    }

    /// The reduced working matrix. Below the diagonal it holds leftover
    /// rounding noise, not a usable representation of `Q`.
    pub fn factors(&self) -> &ComplexMatrix<T> {
        &self.qr
    }

    /// Reflections performed (or skipped) during factorization.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Degenerate steps that were absorbed.
    pub fn singular_columns(&self) -> &[SingularColumn] {
        &self.singular
    }
}

/// Factorize `a` and return only `R`.
pub fn householder_r<T: ComplexScalar>(
    a: &ComplexMatrix<T>,
) -> Result<ComplexMatrix<T>, QrError> {
    HouseholderQr::new(a).map(|qr| qr.r())
}
