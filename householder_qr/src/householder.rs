//! Householder reflector construction and application.
//!
//! A reflector is `H = I - β w wᴴ` with `‖w‖ = 1` and `β = 2`. It is built
//! from a column slice `x` so that `H x` is a multiple of the first standard
//! basis vector, following the complex convention of Ford and Lang
//! ("Householder vector for complex data"): the leading entry becomes
//! `x₀ (1 + ‖x‖ / |x₀|)`, which keeps the phase of `x₀` and avoids
//! cancellation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use crate::scalar::{dot_conj, norm, ComplexScalar, RealScalar};

/// Reflections are always full, un-damped Householder reflections.
pub const REFLECTION_BETA: f64 = 2.0;

/// Why a reflector could not be built the regular way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// `x₀` is exactly zero: its phase is undefined, so the leading entry is
    /// set to `‖x‖` (phase taken as `+1`) and the reflection maps `x` onto
    /// `-‖x‖ e₀`.
    ZeroLeadingEntry,
    /// The whole slice is zero, or its squared norm underflows. There is
    /// nothing to reflect and no way to normalize; the step is skipped.
    ZeroColumn,
}

/// Unit Householder vector for one elimination step.
#[derive(Debug, Clone)]
pub struct Reflector<T> {
    w: Vec<T>,
    w_conj: Vec<T>,
}

impl<T: ComplexScalar> Reflector<T> {
    /// Build the unit Householder vector from the column slice `x`.
    ///
    /// Returns the reflector (absent for [`Degeneracy::ZeroColumn`]) and the
    /// degeneracy met, if any.
    pub fn from_column(mut x: Vec<T>) -> (Option<Self>, Option<Degeneracy>) {
        if x.iter().all(ComplexScalar::is_zero) {
            return (None, Some(Degeneracy::ZeroColumn));
        }
        // a nonzero slice whose squared norm underflows cannot be normalized either
        let Some(xnorm) = norm(&x).filter(|n| !n.is_zero()) else {
            return (None, Some(Degeneracy::ZeroColumn));
        };

        let degeneracy = if x[0].is_zero() {
            x[0] = x[0].from_real_like(&xnorm);
            Some(Degeneracy::ZeroLeadingEntry)
        } else {
            let x0mag = x[0].magnitude();
            let factor = xnorm.from_f64_like(1.0).add(&xnorm.div(&x0mag));
            x[0] = x[0].scale(&factor);
            None
        };

        // xnorm > 0, so the updated vector has a nonzero norm as well
        let inv_norm = match norm(&x) {
            Some(n) => n.from_f64_like(1.0).div(&n),
            None => return (None, Some(Degeneracy::ZeroColumn)),
        };
        for v in &mut x {
            *v = v.scale(&inv_norm);
        }

        let w_conj = x.iter().map(ComplexScalar::conj).collect();
        (Some(Self { w: x, w_conj }), degeneracy)
    }

    /// The unit vector `w`.
    pub fn vector(&self) -> &[T] {
        &self.w
    }

    pub fn len(&self) -> usize {
        self.w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    /// Apply `I - β w wᴴ` to one column segment of the same length as `w`:
    /// `s = Σ a_i·conj(w_i)`, `alpha = β s`, `a_i -= alpha·w_i`.
    pub fn apply(&self, column: &mut [T], beta: &T::Real) {
        debug_assert_eq!(column.len(), self.w.len());
        let mut s = match column.first() {
            Some(first) => first.zero_like(),
            None => return,
        };
        for (a, wc) in column.iter().zip(&self.w_conj) {
            s.add_assign(&a.mul(wc));
        }
        let alpha = s.scale(beta);
        for (a, w) in column.iter_mut().zip(&self.w) {
            a.sub_assign(&alpha.mul(w));
        }
    }

    /// `wᴴ w`, which is 1 up to rounding.
    pub fn self_inner(&self) -> Option<T> {
        dot_conj(&self.w, &self.w)
    }
}
