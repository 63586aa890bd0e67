//! Error types for factorization, comparison, and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the factorization engines and the comparison layer.
///
/// All of these are raised before any arithmetic is performed. Numerical
/// degeneracies met during the factorization itself are not errors; see
/// [`crate::qr::SingularColumn`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// The input is not tall or square, or has no columns.
    #[error("invalid dimensions {rows}x{cols}: expected rows >= cols >= 1")]
    InvalidDimension { rows: usize, cols: usize },

    /// Two matrices that must share a shape do not.
    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Extended precision needs at least one significant digit.
    #[error("invalid precision: {0} significant digits (must be at least 1)")]
    InvalidPrecision(u32),

    /// A flat buffer does not hold rows * cols elements.
    #[error("invalid matrix data: expected {expected} elements, got {got}")]
    InvalidMatrixData { expected: usize, got: usize },
}

impl QrError {
    /// Shorthand for the dimension check every engine performs up front.
    pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), Self> {
        if cols == 0 || rows < cols {
            return Err(Self::InvalidDimension { rows, cols });
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a [`crate::config::BenchConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] QrError),
}
