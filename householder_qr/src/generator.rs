//! Test-matrix sources for the benchmark.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::matrix::ComplexMatrix;
use crate::scalar::Complex64;

/// Denominator that maps the integer draws into [-1, 1).
pub const RANDOM_SCALE: f64 = 32768.0;

const RANDOM_MIN: i32 = -32767;
const RANDOM_MAX: i32 = 32767;

const FIXED_REAL: [[f64; 4]; 4] = [
    [1.0, 2.0, 3.0, -3.0],
    [2.0, 3.0, 2.0, -6.0],
    [1.0, 2.0, 3.0, 1.0],
    [3.0, 4.0, 4.0, 2.0],
];

const FIXED_IMAG: [[f64; 4]; 4] = [
    [2.0, -3.0, 4.0, 1.0],
    [-3.0, 1.0, -2.0, -7.0],
    [-1.0, -4.0, 2.0, 2.0],
    [-1.0, 3.0, -2.0, 4.0],
];

/// Largest dimension the fixed pattern covers.
pub const FIXED_PATTERN_SIZE: usize = 4;

/// The reproducible 4x4 test matrix.
pub fn fixed_test_matrix() -> ComplexMatrix<Complex64> {
    fixed_block(FIXED_PATTERN_SIZE, FIXED_PATTERN_SIZE)
}

/// Leading `rows x cols` block of the fixed pattern (both at most 4).
fn fixed_block(rows: usize, cols: usize) -> ComplexMatrix<Complex64> {
    ComplexMatrix::from_fn(rows, cols, |i, j| {
        Complex64::new(FIXED_REAL[i][j], FIXED_IMAG[i][j])
    })
}

/// Entries drawn uniformly from the integers in [-32767, 32767) and divided
/// by 32768, independently for the real and imaginary parts.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> ComplexMatrix<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    ComplexMatrix::from_fn(rows, cols, |_, _| {
        let re = rng.gen_range(RANDOM_MIN..RANDOM_MAX) as f64 / RANDOM_SCALE;
        let im = rng.gen_range(RANDOM_MIN..RANDOM_MAX) as f64 / RANDOM_SCALE;
        Complex64::new(re, im)
    })
}

/// Where the benchmark input comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixSource {
    /// Fixed pattern when both dimensions are below 5, random otherwise.
    #[default]
    Auto,
    /// Leading block of the fixed pattern.
    Fixed,
    Random,
}

impl MatrixSource {
    /// Generate a `rows x cols` matrix.
    ///
    /// `Fixed` falls back to random entries when the requested shape does not
    /// fit inside the 4x4 pattern.
    pub fn generate(self, rows: usize, cols: usize, seed: u64) -> ComplexMatrix<Complex64> {
        let fits = rows <= FIXED_PATTERN_SIZE && cols <= FIXED_PATTERN_SIZE;
        match self {
            Self::Auto | Self::Fixed if fits => fixed_block(rows, cols),
            Self::Fixed => {
                log::warn!(
                    "fixed pattern is {0}x{0}, generating random {1}x{2} matrix instead",
                    FIXED_PATTERN_SIZE,
                    rows,
                    cols
                );
                random_matrix(rows, cols, seed)
            }
            Self::Auto | Self::Random => random_matrix(rows, cols, seed),
        }
    }
}
