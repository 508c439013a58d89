//! Rational transfer functions `H(s) = N(s) / D(s)`.
//!
//! Block-diagram algebra (series and feedback) works on the raw
//! polynomials and never cancels common factors. Cancellation is an explicit,
//! separate step (`cancel_origin`).

use std::fmt;

use hl_core::ensure_all_finite;
use nalgebra::Complex;
use serde::Serialize;

use crate::error::{LtiError, LtiResult};
use crate::polynomial::Polynomial;

/// SISO transfer function in numerator/denominator polynomial form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferFunction {
    num: Polynomial,
    den: Polynomial,
}

impl TransferFunction {
    /// Create a transfer function.
    ///
    /// # Errors
    ///
    /// - `LtiError::ZeroDenominator` if `den` is the zero polynomial
    /// - `LtiError::Core` if any coefficient is NaN or infinite
    pub fn new(num: impl Into<Polynomial>, den: impl Into<Polynomial>) -> LtiResult<Self> {
        let num = num.into();
        let den = den.into();
        ensure_all_finite(num.coeffs(), "numerator coefficient")?;
        ensure_all_finite(den.coeffs(), "denominator coefficient")?;
        if den.is_zero() {
            return Err(LtiError::ZeroDenominator);
        }
        Ok(Self { num, den })
    }

    /// Static gain `k`.
    pub fn gain(k: f64) -> LtiResult<Self> {
        Self::new(Polynomial::constant(k), Polynomial::one())
    }

    /// Unity pass-through block.
    pub fn identity() -> Self {
        Self {
            num: Polynomial::one(),
            den: Polynomial::one(),
        }
    }

    pub fn num(&self) -> &Polynomial {
        &self.num
    }

    pub fn den(&self) -> &Polynomial {
        &self.den
    }

    /// System order (denominator degree).
    pub fn order(&self) -> usize {
        self.den.degree()
    }

    /// True when numerator degree does not exceed denominator degree.
    pub fn is_proper(&self) -> bool {
        self.num.is_zero() || self.num.degree() <= self.den.degree()
    }

    /// Series connection `self * other`.
    pub fn series(&self, other: &Self) -> LtiResult<Self> {
        Self::new(&self.num * &other.num, &self.den * &other.den)
    }

    /// Negative feedback through `sensor`: `G / (1 + G H)`.
    pub fn feedback(&self, sensor: &Self) -> LtiResult<Self> {
        let num = &self.num * &sensor.den;
        let den = &(&self.den * &sensor.den) + &(&self.num * &sensor.num);
        Self::new(num, den)
    }

    /// Unity negative feedback: for `N / D` returns `N / (D + N)`.
    pub fn unity_feedback(&self) -> LtiResult<Self> {
        self.feedback(&Self::identity())
    }

    /// Evaluate at a complex frequency.
    pub fn eval(&self, s: Complex<f64>) -> Complex<f64> {
        self.num.eval_complex(s) / self.den.eval_complex(s)
    }

    /// Steady-state gain `H(0)` after origin cancellation.
    ///
    /// `None` when a pole remains at the origin.
    pub fn dc_gain(&self) -> Option<f64> {
        let reduced = self.cancel_origin();
        let d0 = reduced.den.constant_term();
        if d0 == 0.0 {
            return None;
        }
        Some(reduced.num.constant_term() / d0)
    }

    pub fn poles(&self) -> Vec<Complex<f64>> {
        self.den.roots()
    }

    pub fn zeros(&self) -> Vec<Complex<f64>> {
        if self.num.is_zero() {
            return Vec::new();
        }
        self.num.roots()
    }

    /// Remove common factors of `s` shared by numerator and denominator.
    ///
    /// Only exact zero trailing coefficients are treated as roots at the origin.
    pub fn cancel_origin(&self) -> Self {
        if self.num.is_zero() {
            return self.clone();
        }
        let k = self
            .num
            .origin_multiplicity()
            .min(self.den.origin_multiplicity());
        if k == 0 {
            return self.clone();
        }
        Self {
            num: self.num.deflate_origin(k),
            den: self.den.deflate_origin(k),
        }
    }

    /// Same transfer function with a monic denominator.
    pub fn normalized(&self) -> Self {
        let lead = self.den.leading();
        Self {
            num: self.num.scale(1.0 / lead),
            den: self.den.scale(1.0 / lead),
        }
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_denominator() {
        assert_eq!(
            TransferFunction::new([1.0], [0.0, 0.0]).unwrap_err(),
            LtiError::ZeroDenominator
        );
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        let err = TransferFunction::new([f64::NAN], [1.0, 1.0]).unwrap_err();
        assert!(matches!(err, LtiError::Core(_)));
        assert!(TransferFunction::new([1.0], [1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn series_multiplies_blocks() {
        let a = TransferFunction::new([1.0], [1.0, 1.0]).unwrap();
        let b = TransferFunction::new([2.0], [1.0, 3.0]).unwrap();
        let ab = a.series(&b).unwrap();
        assert_eq!(ab.num().coeffs(), &[2.0]);
        assert_eq!(ab.den().coeffs(), &[1.0, 4.0, 3.0]);
    }

    #[test]
    fn feedback_through_dynamic_sensor() {
        // 1/s with sensor 2/(s+1) -> (s+1) / (s^2 + s + 2)
        let g = TransferFunction::new([1.0], [1.0, 0.0]).unwrap();
        let h = TransferFunction::new([2.0], [1.0, 1.0]).unwrap();
        let cl = g.feedback(&h).unwrap();
        assert_eq!(cl.num().coeffs(), &[1.0, 1.0]);
        assert_eq!(cl.den().coeffs(), &[1.0, 1.0, 2.0]);
    }

    #[test]
    fn unity_feedback_keeps_degree() {
        // K / (s (s + 1)) in unity feedback -> K / (s^2 + s + K)
        let ol = TransferFunction::new([4.0], [1.0, 1.0, 0.0]).unwrap();
        let cl = ol.unity_feedback().unwrap();
        assert_eq!(cl.num().coeffs(), &[4.0]);
        assert_eq!(cl.den().coeffs(), &[1.0, 1.0, 4.0]);
        assert_eq!(cl.order(), 2);
    }

    #[test]
    fn unity_feedback_matches_general_feedback() {
        let g = TransferFunction::new([2.0, 1.0], [1.0, 3.0, 2.0]).unwrap();
        let unity = g.unity_feedback().unwrap();
        let general = g.feedback(&TransferFunction::identity()).unwrap();
        assert_eq!(unity, general);
    }

    #[test]
    fn unity_feedback_can_degenerate() {
        // N = -D makes 1 + G vanish identically
        let g = TransferFunction::new([-1.0, -2.0], [1.0, 2.0]).unwrap();
        assert_eq!(g.unity_feedback().unwrap_err(), LtiError::ZeroDenominator);
    }

    #[test]
    fn dc_gain_with_and_without_integrator() {
        let g = TransferFunction::new([3.0], [1.0, 2.0]).unwrap();
        assert_eq!(g.dc_gain(), Some(1.5));

        let integ = TransferFunction::new([1.0], [1.0, 0.0]).unwrap();
        assert_eq!(integ.dc_gain(), None);

        // s / (s (s + 4)) reduces to 1 / (s + 4)
        let cancelled = TransferFunction::new([1.0, 0.0], [1.0, 4.0, 0.0]).unwrap();
        assert_eq!(cancelled.dc_gain(), Some(0.25));
    }

    #[test]
    fn cancel_origin_strips_shared_factor_only() {
        let tf = TransferFunction::new([5.0, 0.0], [1.0, 2.0, 0.0, 0.0]).unwrap();
        let reduced = tf.cancel_origin();
        assert_eq!(reduced.num().coeffs(), &[5.0]);
        assert_eq!(reduced.den().coeffs(), &[1.0, 2.0, 0.0]);

        let untouched = TransferFunction::new([1.0, 1.0], [1.0, 0.0]).unwrap();
        assert_eq!(untouched.cancel_origin(), untouched);
    }

    #[test]
    fn eval_on_imaginary_axis() {
        // 1/(s+1) at s = j: (1 - j)/2
        let g = TransferFunction::new([1.0], [1.0, 1.0]).unwrap();
        let h = g.eval(Complex::new(0.0, 1.0));
        assert!((h.re - 0.5).abs() < 1e-12);
        assert!((h.im + 0.5).abs() < 1e-12);
    }

    #[test]
    fn normalized_is_monic() {
        let g = TransferFunction::new([2.0], [4.0, 8.0]).unwrap().normalized();
        assert_eq!(g.den().coeffs(), &[1.0, 2.0]);
        assert_eq!(g.num().coeffs(), &[0.5]);
    }

    #[test]
    fn properness() {
        assert!(TransferFunction::new([1.0, 0.0], [1.0, 1.0]).unwrap().is_proper());
        assert!(!TransferFunction::new([1.0, 0.0, 0.0], [1.0, 1.0]).unwrap().is_proper());
    }

    #[test]
    fn display_shows_both_polynomials() {
        let g = TransferFunction::new([2.0], [1.0, 3.0]).unwrap();
        assert_eq!(g.to_string(), "(2) / (s + 3)");
    }
}
