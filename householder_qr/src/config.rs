//! Benchmark configuration loaded from TOML.
//!
//! Every key is optional; missing keys take the defaults of the reference
//! run (a 192x120 random matrix against a 100-digit oracle).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compare::CompareOptions;
use crate::error::{ConfigError, QrError};
use crate::generator::MatrixSource;
use crate::matrix::ComplexMatrix;
use crate::qr::Parallelism;
use crate::scalar::{Complex64, ExtendedPrecision, DEFAULT_PRECISION_DIGITS};

pub const DEFAULT_ROWS: usize = 192;
pub const DEFAULT_COLS: usize = 120;

/// Benchmark settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub rows: usize,
    pub cols: usize,
    /// Significant decimal digits of the extended-precision oracle.
    pub precision_digits: u32,
    pub seed: u64,
    pub source: MatrixSource,
    /// Run both engines at the same time.
    pub concurrent: bool,
    pub parallelism: Parallelism,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            precision_digits: DEFAULT_PRECISION_DIGITS,
            seed: 0,
            source: MatrixSource::Auto,
            concurrent: true,
            parallelism: Parallelism::Sequential,
        }
    }
}

impl BenchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading benchmark config from {}", path.display());
        Self::from_toml_str(&src)
    }

    /// Reject shapes the engines cannot factorize and zero-digit precisions.
    pub fn validate(&self) -> Result<(), QrError> {
        QrError::check_dimensions(self.rows, self.cols)?;
        ExtendedPrecision::new(self.precision_digits)?;
        Ok(())
    }

    pub fn compare_options(&self) -> Result<CompareOptions, QrError> {
        Ok(CompareOptions {
            precision: ExtendedPrecision::new(self.precision_digits)?,
            concurrent: self.concurrent,
            parallelism: self.parallelism,
        })
    }

    /// The input matrix this configuration describes.
    pub fn matrix(&self) -> ComplexMatrix<Complex64> {
        self.source.generate(self.rows, self.cols, self.seed)
    }
}
