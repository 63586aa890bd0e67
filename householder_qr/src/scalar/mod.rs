//! Scalar capability sets the factorization is generic over.
//!
//! The engine in [`crate::qr`] only ever talks to its elements through
//! [`ComplexScalar`] and [`RealScalar`], so the machine-double backend and the
//! arbitrary-precision backend share one implementation of the algorithm.
//!
//! Values carry whatever context they need (the extended backend stores its
//! bit precision in every number), which is why constants are built with
//! `*_like` constructors from an existing value instead of associated
//! functions.

mod extended;
mod native;

use std::fmt::Debug;

pub use extended::{BigComplex, BigReal, ExtendedPrecision, DEFAULT_PRECISION_DIGITS};
pub use native::Complex64;

/// Real field used for norms, magnitudes and scaling factors.
pub trait RealScalar: Clone + Debug + Send + Sync {
    /// A real constant with the same precision context as `self`.
    fn from_f64_like(&self, value: f64) -> Self;

    fn add(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn div(&self, rhs: &Self) -> Self;
    fn sqrt(&self) -> Self;

    /// Exact comparison against zero, not a tolerance check.
    fn is_zero(&self) -> bool;

    /// Round to the nearest machine double.
    fn to_f64(&self) -> f64;
}

/// Complex field over a [`RealScalar`].
pub trait ComplexScalar: Clone + Debug + Send + Sync {
    type Real: RealScalar;

    /// The zero value in the same precision context as `self`.
    fn zero_like(&self) -> Self;

    /// `re + 0i` in the same precision context as `self`.
    fn from_real_like(&self, re: &Self::Real) -> Self;

    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn conj(&self) -> Self;

    /// Multiply both parts by a real factor.
    fn scale(&self, factor: &Self::Real) -> Self;

    /// Both parts exactly zero. Never derived from `abs2`, which can
    /// underflow for nonzero values.
    fn is_zero(&self) -> bool;

    /// `re² + im²`, the real part of `self * conj(self)`.
    fn abs2(&self) -> Self::Real;

    /// `sqrt(re² + im²)`.
    fn magnitude(&self) -> Self::Real {
        self.abs2().sqrt()
    }

    /// `self += rhs` without building an intermediate value where the
    /// backend allows it.
    fn add_assign(&mut self, rhs: &Self);

    /// `self -= rhs`.
    fn sub_assign(&mut self, rhs: &Self);

    /// Round both parts to machine doubles.
    fn to_complex64(&self) -> Complex64;
}

/// Squared Euclidean norm `Σ |x_i|²` of a complex vector.
///
/// Returns `None` for an empty slice, which has no precision context to
/// build a zero from.
pub fn norm_sqr<T: ComplexScalar>(x: &[T]) -> Option<T::Real> {
    let (first, rest) = x.split_first()?;
    Some(rest.iter().fold(first.abs2(), |acc, v| acc.add(&v.abs2())))
}

/// Euclidean norm under the Hermitian inner product, `sqrt(Σ x_i·conj(x_i))`.
pub fn norm<T: ComplexScalar>(x: &[T]) -> Option<T::Real> {
    norm_sqr(x).map(|s| s.sqrt())
}

/// Hermitian inner product `Σ a_i·conj(b_i)`; the second operand is the
/// conjugated one.
pub fn dot_conj<T: ComplexScalar>(a: &[T], b: &[T]) -> Option<T> {
    let mut iter = a.iter().zip(b);
    let (a0, b0) = iter.next()?;
    let mut acc = a0.mul(&b0.conj());
    for (ai, bi) in iter {
        acc.add_assign(&ai.mul(&bi.conj()));
    }
    Some(acc)
}
