//! Householder QR factorization of dense complex matrices.
//!
//! One generic engine ([`HouseholderQr`]) runs over any [`ComplexScalar`]:
//! machine doubles ([`Complex64`]) for speed and `astro-float` numbers
//! ([`BigComplex`]) as a high-precision reference. [`compare_engines`] runs
//! both on the same input and reports their timings and the squared
//! Frobenius distance between the two `R` factors.

// Library code reports through `log`; only the CLI binary prints.
#![deny(clippy::print_stderr)]

pub mod compare;
pub mod config;
pub mod error;
pub mod generator;
pub mod householder;
pub mod matrix;
pub mod qr;
pub mod scalar;

pub use compare::{compare_engines, CompareOptions, ComparisonReport, EngineTiming};
pub use config::BenchConfig;
pub use error::{ConfigError, QrError};
pub use generator::{fixed_test_matrix, random_matrix, MatrixSource};
pub use matrix::ComplexMatrix;
pub use qr::{householder_r, HouseholderQr, Parallelism, SingularColumn, SingularKind};
pub use scalar::{
    BigComplex, BigReal, Complex64, ComplexScalar, ExtendedPrecision, RealScalar,
    DEFAULT_PRECISION_DIGITS,
};
