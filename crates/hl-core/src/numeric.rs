//! Finite-value guards for coefficients, gains and tolerances.

use crate::HlError;

/// Floating point type used throughout hydroloop
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HlError::NonFinite { what, value: v })
    }
}

/// Check every entry of a slice, reporting the first non-finite one.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), HlError> {
    values
        .iter()
        .try_for_each(|&v| ensure_finite(v, what).map(|_| ()))
}

/// Strictly positive and finite.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HlError> {
    match ensure_finite(v, what)? {
        v if v > 0.0 => Ok(v),
        _ => Err(HlError::InvalidArg { what }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "gain").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("gain"));
        assert_eq!(ensure_finite(2.5, "gain"), Ok(2.5));
    }

    #[test]
    fn ensure_all_finite_reports_first_offender() {
        assert!(ensure_all_finite(&[1.0, 2.0], "coeffs").is_ok());
        assert!(ensure_all_finite(&[], "coeffs").is_ok());
        let err = ensure_all_finite(&[1.0, Real::INFINITY, Real::NAN], "coeffs").unwrap_err();
        assert_eq!(
            err,
            HlError::NonFinite {
                what: "coeffs",
                value: Real::INFINITY
            }
        );
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.001, "tol").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "tol"),
            Err(HlError::InvalidArg { what: "tol" })
        ));
        assert!(matches!(
            ensure_positive(-1.0, "tol"),
            Err(HlError::InvalidArg { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::NAN, "tol"),
            Err(HlError::NonFinite { .. })
        ));
    }
}
