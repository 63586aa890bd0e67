//! Arbitrary-precision backend over `astro_float::BigFloat`.
//!
//! Every value stores the bit precision it was created with and every
//! operation rounds to that precision (round half to even), so a whole
//! factorization runs at the precision chosen once in [`ExtendedPrecision`].

use std::fmt;

use astro_float::{BigFloat, RoundingMode};

use super::{Complex64, ComplexScalar, RealScalar};
use crate::error::QrError;

/// Significant decimal digits used when no precision is configured.
pub const DEFAULT_PRECISION_DIGITS: u32 = 100;

const ROUNDING: RoundingMode = RoundingMode::ToEven;

/// Working precision for the extended backend, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedPrecision {
    digits: u32,
    bits: usize,
}

impl ExtendedPrecision {
    /// Precision able to hold `digits` significant decimal digits.
    pub fn new(digits: u32) -> Result<Self, QrError> {
        if digits == 0 {
            return Err(QrError::InvalidPrecision(digits));
        }
        Ok(Self {
            digits,
            bits: digits_to_bits(digits),
        })
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Mantissa length in bits requested from astro-float.
    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn real(&self, value: f64) -> BigReal {
        BigReal {
            value: BigFloat::from_f64(value, self.bits),
            precision: self.bits,
        }
    }

    /// Widen a double-precision complex value; exact once `bits >= 53`.
    pub fn complex(&self, value: Complex64) -> BigComplex {
        BigComplex {
            re: BigFloat::from_f64(value.re, self.bits),
            im: BigFloat::from_f64(value.im, self.bits),
            precision: self.bits,
        }
    }
}

impl Default for ExtendedPrecision {
    fn default() -> Self {
        Self {
            digits: DEFAULT_PRECISION_DIGITS,
            bits: digits_to_bits(DEFAULT_PRECISION_DIGITS),
        }
    }
}

/// ceil(digits * log2(10)), with log2(10) rounded up to 3.3220.
fn digits_to_bits(digits: u32) -> usize {
    (digits as usize * 33_220).div_ceil(10_000)
}

fn big_to_f64(value: &BigFloat) -> f64 {
    if value.is_zero() {
        return 0.0;
    }
    value.to_string().parse::<f64>().unwrap_or(f64::NAN)
}

/// Real number at a fixed bit precision.
#[derive(Clone)]
pub struct BigReal {
    value: BigFloat,
    precision: usize,
}

impl BigReal {
    fn wrap(&self, value: BigFloat) -> Self {
        Self {
            value,
            precision: self.precision,
        }
    }
}

impl fmt::Debug for BigReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigReal({})", self.value)
    }
}

impl RealScalar for BigReal {
    fn from_f64_like(&self, value: f64) -> Self {
        self.wrap(BigFloat::from_f64(value, self.precision))
    }

    fn add(&self, rhs: &Self) -> Self {
        self.wrap(self.value.add(&rhs.value, self.precision, ROUNDING))
    }

    fn mul(&self, rhs: &Self) -> Self {
        self.wrap(self.value.mul(&rhs.value, self.precision, ROUNDING))
    }

    fn div(&self, rhs: &Self) -> Self {
        self.wrap(self.value.div(&rhs.value, self.precision, ROUNDING))
    }

    fn sqrt(&self) -> Self {
        self.wrap(self.value.sqrt(self.precision, ROUNDING))
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn to_f64(&self) -> f64 {
        big_to_f64(&self.value)
    }
}

/// Complex number whose parts are `BigFloat`s at a shared bit precision.
#[derive(Clone)]
pub struct BigComplex {
    re: BigFloat,
    im: BigFloat,
    precision: usize,
}

impl BigComplex {
    pub fn re(&self) -> &BigFloat {
        &self.re
    }

    pub fn im(&self) -> &BigFloat {
        &self.im
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    fn from_parts(&self, re: BigFloat, im: BigFloat) -> Self {
        Self {
            re,
            im,
            precision: self.precision,
        }
    }
}

impl fmt::Debug for BigComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigComplex({} + {}i)", self.re, self.im)
    }
}

impl PartialEq for BigComplex {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.re.cmp(&other.re), Some(0)) && matches!(self.im.cmp(&other.im), Some(0))
    }
}

impl ComplexScalar for BigComplex {
    type Real = BigReal;

    fn zero_like(&self) -> Self {
        self.from_parts(
            BigFloat::from_f64(0.0, self.precision),
            BigFloat::from_f64(0.0, self.precision),
        )
    }

    fn from_real_like(&self, re: &BigReal) -> Self {
        self.from_parts(re.value.clone(), BigFloat::from_f64(0.0, self.precision))
    }

    fn add(&self, rhs: &Self) -> Self {
        let p = self.precision;
        self.from_parts(
            self.re.add(&rhs.re, p, ROUNDING),
            self.im.add(&rhs.im, p, ROUNDING),
        )
    }

    fn sub(&self, rhs: &Self) -> Self {
        let p = self.precision;
        self.from_parts(
            self.re.sub(&rhs.re, p, ROUNDING),
            self.im.sub(&rhs.im, p, ROUNDING),
        )
    }

    fn mul(&self, rhs: &Self) -> Self {
        let p = self.precision;
        let ac = self.re.mul(&rhs.re, p, ROUNDING);
        let bd = self.im.mul(&rhs.im, p, ROUNDING);
        let ad = self.re.mul(&rhs.im, p, ROUNDING);
        let bc = self.im.mul(&rhs.re, p, ROUNDING);
        self.from_parts(ac.sub(&bd, p, ROUNDING), ad.add(&bc, p, ROUNDING))
    }

    fn conj(&self) -> Self {
        self.from_parts(self.re.clone(), -self.im.clone())
    }

    fn scale(&self, factor: &BigReal) -> Self {
        let p = self.precision;
        self.from_parts(
            self.re.mul(&factor.value, p, ROUNDING),
            self.im.mul(&factor.value, p, ROUNDING),
        )
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    fn abs2(&self) -> BigReal {
        let p = self.precision;
        let re2 = self.re.mul(&self.re, p, ROUNDING);
        let im2 = self.im.mul(&self.im, p, ROUNDING);
        BigReal {
            value: re2.add(&im2, p, ROUNDING),
            precision: p,
        }
    }

    fn add_assign(&mut self, rhs: &Self) {
        let p = self.precision;
        self.re = self.re.add(&rhs.re, p, ROUNDING);
        self.im = self.im.add(&rhs.im, p, ROUNDING);
    }

    fn sub_assign(&mut self, rhs: &Self) {
        let p = self.precision;
        self.re = self.re.sub(&rhs.re, p, ROUNDING);
        self.im = self.im.sub(&rhs.im, p, ROUNDING);
    }

    fn to_complex64(&self) -> Complex64 {
        Complex64::new(big_to_f64(&self.re), big_to_f64(&self.im))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prec() -> ExtendedPrecision {
        ExtendedPrecision::default()
    }

    // ── ExtendedPrecision ─────────────────────────────────────────────────────

    #[test]
    fn test_default_precision_is_100_digits() {
        let p = prec();
        assert_eq!(p.digits(), DEFAULT_PRECISION_DIGITS);
        // 100 * log2(10) = 332.19...
        assert_eq!(p.bits(), 333);
    }

    #[test]
    fn test_digits_to_bits_rounds_up() {
        assert_eq!(digits_to_bits(1), 4);
        assert_eq!(digits_to_bits(16), 54);
        assert_eq!(digits_to_bits(50), 167);
    }

    #[test]
    fn test_zero_digits_is_rejected() {
        assert_eq!(
            ExtendedPrecision::new(0),
            Err(QrError::InvalidPrecision(0))
        );
    }

    // ── BigComplex arithmetic ─────────────────────────────────────────────────

    #[test]
    fn test_big_complex_round_trips_doubles_exactly() {
        let p = prec();
        let c = Complex64::new(0.123456789, -3.5);
        assert_eq!(p.complex(c).to_complex64(), c);
    }

    #[test]
    fn test_big_complex_mul_matches_double() {
        // (1 + 2i)(3 + 4i) = -5 + 10i
        let p = prec();
        let a = p.complex(Complex64::new(1.0, 2.0));
        let b = p.complex(Complex64::new(3.0, 4.0));
        assert_eq!(a.mul(&b).to_complex64(), Complex64::new(-5.0, 10.0));
    }

    #[test]
    fn test_big_complex_conj_negates_imaginary() {
        let p = prec();
        let a = p.complex(Complex64::new(1.5, -2.5));
        assert_eq!(a.conj().to_complex64(), Complex64::new(1.5, 2.5));
    }

    #[test]
    fn test_big_complex_magnitude() {
        let p = prec();
        let a = p.complex(Complex64::new(3.0, 4.0));
        assert!((a.magnitude().to_f64() - 5.0).abs() < 1e-15);
    }

    #[test]
    fn test_big_complex_accumulators() {
        let p = prec();
        let mut acc = p.complex(Complex64::new(1.0, 1.0));
        acc.add_assign(&p.complex(Complex64::new(0.5, -2.0)));
        assert_eq!(acc.to_complex64(), Complex64::new(1.5, -1.0));
        acc.sub_assign(&p.complex(Complex64::new(1.5, -1.0)));
        assert!(acc.abs2().is_zero());
    }

    #[test]
    fn test_big_complex_zero_like_keeps_precision() {
        let p = ExtendedPrecision::new(40).unwrap();
        let a = p.complex(Complex64::new(7.0, 8.0));
        let z = a.zero_like();
        assert_eq!(z.precision(), a.precision());
        assert!(z.abs2().is_zero());
        assert_eq!(z, p.complex(Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_big_real_sqrt_is_more_precise_than_double() {
        // sqrt(2)^2 - 2 vanishes far below double epsilon.
        let p = prec();
        let two = p.real(2.0);
        let root = two.sqrt();
        let err = root.mul(&root).add(&p.real(-2.0));
        assert!(err.to_f64().abs() < 1e-90, "residual {}", err.to_f64());
    }
}
