//! Machine-double backend over `nalgebra::Complex<f64>`.

use nalgebra::Complex;
use num_traits::Zero;

use super::{ComplexScalar, RealScalar};

/// Double-precision complex number, shared with nalgebra so matrices convert
/// to `DMatrix` without copying element by element.
pub type Complex64 = Complex<f64>;

impl RealScalar for f64 {
    #[inline]
    fn from_f64_like(&self, value: f64) -> Self {
        value
    }

    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    #[inline]
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div(&self, rhs: &Self) -> Self {
        self / rhs
    }

    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }
}

impl ComplexScalar for Complex64 {
    type Real = f64;

    #[inline]
    fn zero_like(&self) -> Self {
        Complex::zero()
    }

    #[inline]
    fn from_real_like(&self, re: &f64) -> Self {
        Complex::new(*re, 0.0)
    }

    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }

    #[inline]
    fn sub(&self, rhs: &Self) -> Self {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }

    #[inline]
    fn mul(&self, rhs: &Self) -> Self {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }

    #[inline]
    fn conj(&self) -> Self {
        Complex::new(self.re, -self.im)
    }

    #[inline]
    fn scale(&self, factor: &f64) -> Self {
        Complex::new(self.re * factor, self.im * factor)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// `hypot` keeps tiny entries from underflowing to a zero magnitude.
    #[inline]
    fn magnitude(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn abs2(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }

    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }

    #[inline]
    fn to_complex64(&self) -> Complex64 {
        *self
    }
}
