//! Runs both engines on one input and reports how far apart they land.
//!
//! The double-precision engine is timed against the extended-precision
//! oracle; the difference between the two `R` factors is the squared
//! Frobenius norm, with no normalization by size.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::QrError;
use crate::matrix::ComplexMatrix;
use crate::qr::{HouseholderQr, Parallelism, SingularColumn};
use crate::scalar::{Complex64, ComplexScalar, ExtendedPrecision};

/// Tolerance under which the two engines are considered to agree.
pub const AGREEMENT_TOLERANCE: f64 = 1e-6;

/// How the comparison is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    pub precision: ExtendedPrecision,
    /// Run the two engines on separate rayon workers.
    pub concurrent: bool,
    /// Scheduling of each engine's trailing-column update.
    pub parallelism: Parallelism,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            precision: ExtendedPrecision::default(),
            concurrent: true,
            parallelism: Parallelism::Sequential,
        }
    }
}

/// `R` and timing from one engine.
#[derive(Debug, Clone)]
pub struct EngineRun<T> {
    pub r: ComplexMatrix<T>,
    pub elapsed: Duration,
    pub singular_columns: Vec<SingularColumn>,
}

/// Factorize `a` and time the factorization plus `R` extraction.
pub fn timed_factorization<T: ComplexScalar>(
    a: &ComplexMatrix<T>,
    par: Parallelism,
) -> Result<EngineRun<T>, QrError> {
    let start = Instant::now();
    let qr = HouseholderQr::with_parallelism(a, par)?;
    let r = qr.r();
    let elapsed = start.elapsed();
    Ok(EngineRun {
        r,
        elapsed,
        singular_columns: qr.singular_columns().to_vec(),
    })
}

/// Timing summary for one engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineTiming {
    #[serde(rename = "elapsed_ms")]
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub singular_columns: Vec<SingularColumn>,
}

impl EngineTiming {
    pub fn millis(&self) -> f64 {
        duration_millis(&self.elapsed)
    }
}

fn duration_millis(d: &Duration) -> f64 {
    d.as_nanos() as f64 / 1e6
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(duration_millis(d))
}

impl<T> From<&EngineRun<T>> for EngineTiming {
    fn from(run: &EngineRun<T>) -> Self {
        Self {
            elapsed: run.elapsed,
            singular_columns: run.singular_columns.clone(),
        }
    }
}

/// Outcome of running both engines on the same input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub rows: usize,
    pub cols: usize,
    pub precision_digits: u32,
    pub native: EngineTiming,
    pub extended: EngineTiming,
    /// `Σ |R_native - R_extended|²` over all entries.
    pub diff_norm_sqr: f64,
}

impl ComparisonReport {
    /// True when the squared difference is below [`AGREEMENT_TOLERANCE`].
    pub fn agrees(&self) -> bool {
        self.diff_norm_sqr < AGREEMENT_TOLERANCE
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Matrix size is {}x{} complex elements.",
            self.rows, self.cols
        )?;
        writeln!(
            f,
            "{:.3} milliseconds using extended precision ({} digits).",
            self.extended.millis(),
            self.precision_digits
        )?;
        writeln!(
            f,
            "{:.3} milliseconds using double precision.",
            self.native.millis()
        )?;
        write!(
            f,
            "norm of difference from double precision version is {:e}",
            self.diff_norm_sqr
        )?;
        let singular = self.native.singular_columns.len() + self.extended.singular_columns.len();
        if singular > 0 {
            write!(f, "\n{} degenerate column(s) were absorbed.", singular)?;
        }
        Ok(())
    }
}

/// Factorize `a` with both engines and compare the results.
///
/// Dimensions are validated before anything is converted or timed. The
/// conversion to extended precision is excluded from its timing.
pub fn compare_engines(
    a: &ComplexMatrix<Complex64>,
    options: &CompareOptions,
) -> Result<ComparisonReport, QrError> {
    let (rows, cols) = a.shape();
    QrError::check_dimensions(rows, cols)?;

    let wide = a.to_extended(&options.precision);
    let par = options.parallelism;

    let (native, extended) = if options.concurrent {
        rayon::join(
            || timed_factorization(a, par),
            || timed_factorization(&wide, par),
        )
    } else {
        (timed_factorization(a, par), timed_factorization(&wide, par))
    };
    let native = native?;
    let extended = extended?;

    log::info!(
        "{}x{}: double precision {:?}, extended precision ({} digits) {:?}",
        rows,
        cols,
        native.elapsed,
        options.precision.digits(),
        extended.elapsed
    );

    let diff_norm_sqr = native.r.frobenius_diff_sqr(&extended.r.to_complex64())?;

    Ok(ComparisonReport {
        rows,
        cols,
        precision_digits: options.precision.digits(),
        native: EngineTiming::from(&native),
        extended: EngineTiming::from(&extended),
        diff_norm_sqr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixed_test_matrix;
    use crate::qr::SingularKind;

    fn sample_report() -> ComparisonReport {
        ComparisonReport {
            rows: 4,
            cols: 4,
            precision_digits: 100,
            native: EngineTiming {
                elapsed: Duration::from_micros(250),
                singular_columns: Vec::new(),
            },
            extended: EngineTiming {
                elapsed: Duration::from_millis(12),
                singular_columns: Vec::new(),
            },
            diff_norm_sqr: 1.5e-30,
        }
    }

    #[test]
    fn test_fixed_matrix_engines_agree() {
        let report = compare_engines(&fixed_test_matrix(), &CompareOptions::default()).unwrap();
        assert!(report.agrees(), "diff = {}", report.diff_norm_sqr);
        assert!(report.diff_norm_sqr >= 0.0);
        assert_eq!((report.rows, report.cols), (4, 4));
    }

    #[test]
    fn test_sequential_and_concurrent_give_same_difference() {
        let a = crate::generator::random_matrix(12, 8, 5);
        let concurrent = compare_engines(&a, &CompareOptions::default()).unwrap();
        let sequential = compare_engines(
            &a,
            &CompareOptions {
                concurrent: false,
                ..CompareOptions::default()
            },
        ).unwrap();
        assert_eq!(concurrent.diff_norm_sqr, sequential.diff_norm_sqr);
    }

    #[test]
    fn test_invalid_dimensions_fail_before_running() {
        let a = ComplexMatrix::from_fn(2, 3, |_, _| Complex64::new(1.0, 0.0));
        assert_eq!(
            compare_engines(&a, &CompareOptions::default()),
            Err(QrError::InvalidDimension { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_report_display() {
        insta::assert_snapshot!(sample_report().to_string(), @r"
        Matrix size is 4x4 complex elements.
        12.000 milliseconds using extended precision (100 digits).
        0.250 milliseconds using double precision.
        norm of difference from double precision version is 1.5e-30
        ");
    }

    #[test]
    fn test_report_display_mentions_degenerate_columns() {
        let mut report = sample_report();
        report.native.singular_columns.push(SingularColumn {
            step: 0,
            kind: SingularKind::ZeroLeadingEntry,
        });
        assert!(report
            .to_string()
            .ends_with("1 degenerate column(s) were absorbed."));
    }

    #[test]
    fn test_report_serializes_millis() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["native"]["elapsed_ms"], 0.25);
        assert_eq!(json["extended"]["elapsed_ms"], 12.0);
        assert_eq!(json["precision_digits"], 100);
    }
}
