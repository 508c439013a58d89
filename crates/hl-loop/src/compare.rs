//! Step-characteristic agreement between two transfer functions.
//!
//! Each of the eight `StepInfo` fields is compared on its own; the result is
//! a match only when every `|a - b| < tolerance`. The comparison is evaluated
//! as a plain float test, so a NaN or `inf - inf` difference never matches
//! and two non-settling systems are reported as a mismatch.
//!
//! A flat response, one whose step amplitude is below `1e-12` (for example a
//! zero-gain loop), has NaN timing fields. It therefore never matches, not
//! even against itself.

use hl_core::ensure_positive;
use hl_lti::{StepInfo, StepOptions, StepResponse, TransferFunction, step};
use serde::Serialize;
use tracing::debug;

use crate::error::{LoopError, LoopResult};

/// Default tolerance on every step characteristic.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Outcome of comparing two step responses.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub is_match: bool,
    pub left: StepInfo,
    pub right: StepInfo,
    pub tolerance: f64,
}

impl Comparison {
    /// Compare two sets of characteristics.
    pub fn from_info(left: StepInfo, right: StepInfo, tolerance: f64) -> Self {
        let is_match = left
            .as_array()
            .iter()
            .zip(right.as_array())
            .all(|(a, b)| within(*a, b, tolerance));
        Self {
            is_match,
            left,
            right,
            tolerance,
        }
    }

    /// Names of the characteristics that differ by `tolerance` or more.
    pub fn mismatches(&self) -> Vec<&'static str> {
        StepInfo::FIELD_NAMES
            .iter()
            .zip(self.left.as_array().iter().zip(self.right.as_array()))
            .filter(|(_, (a, b))| !within(**a, *b, self.tolerance))
            .map(|(name, _)| *name)
            .collect()
    }
}

fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// A comparison together with the simulated responses behind it.
#[derive(Debug, Clone)]
pub struct ResponseComparison {
    pub comparison: Comparison,
    pub left: StepResponse,
    pub right: StepResponse,
}

/// Compare the step characteristics of `t1` and `t2` with default options.
///
/// # Errors
///
/// - `LoopError::InvalidArg` if `tolerance` is not positive and finite
/// - `LoopError::Lti` if either transfer function cannot be simulated
pub fn matches(
    t1: &TransferFunction,
    t2: &TransferFunction,
    tolerance: f64,
) -> LoopResult<Comparison> {
    matches_with(t1, t2, tolerance, &StepOptions::default())
}

pub fn matches_with(
    t1: &TransferFunction,
    t2: &TransferFunction,
    tolerance: f64,
    opts: &StepOptions,
) -> LoopResult<Comparison> {
    Ok(compare_responses(t1, t2, tolerance, opts)?.comparison)
}

/// Simulate both transfer functions and compare their characteristics.
pub fn compare_responses(
    t1: &TransferFunction,
    t2: &TransferFunction,
    tolerance: f64,
    opts: &StepOptions,
) -> LoopResult<ResponseComparison> {
    ensure_positive(tolerance, "tolerance").map_err(|_| LoopError::InvalidArg {
        what: "tolerance must be positive and finite",
    })?;

    let left = step(t1, opts)?;
    let right = step(t2, opts)?;
    let comparison = Comparison::from_info(left.info(), right.info(), tolerance);

    if !comparison.is_match {
        for name in comparison.mismatches() {
            debug!(metric = name, tolerance, "step characteristic mismatch");
        }
    }

    Ok(ResponseComparison {
        comparison,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_order(tau: f64) -> TransferFunction {
        TransferFunction::new([1.0], [tau, 1.0]).unwrap()
    }

    #[test]
    fn identical_systems_match() {
        let g = first_order(1.0);
        let cmp = matches(&g, &g, DEFAULT_TOLERANCE).unwrap();
        assert!(cmp.is_match);
        assert!(cmp.mismatches().is_empty());
    }

    #[test]
    fn scaled_realization_matches() {
        let a = first_order(1.0);
        let b = TransferFunction::new([3.0], [3.0, 3.0]).unwrap();
        assert!(matches(&a, &b, DEFAULT_TOLERANCE).unwrap().is_match);
    }

    #[test]
    fn different_time_constants_mismatch() {
        let cmp = matches(&first_order(1.0), &first_order(2.0), DEFAULT_TOLERANCE).unwrap();
        assert!(!cmp.is_match);
        let names = cmp.mismatches();
        assert!(names.contains(&"RiseTime"));
        assert!(names.contains(&"SettlingTime"));
        assert!(!names.contains(&"Overshoot"));
    }

    #[test]
    fn loose_tolerance_accepts_small_difference() {
        let a = first_order(1.0);
        let b = first_order(1.0001);
        assert!(matches(&a, &b, 0.1).unwrap().is_match);
    }

    #[test]
    fn non_settling_never_matches() {
        let unstable = TransferFunction::new([1.0], [1.0, -1.0]).unwrap();
        let opts = StepOptions {
            max_horizon: 5.0,
            ..Default::default()
        };
        let cmp = matches_with(&unstable, &unstable, DEFAULT_TOLERANCE, &opts).unwrap();
        assert!(!cmp.is_match);
        assert_eq!(cmp.mismatches().len(), 8);
    }

    #[test]
    fn zero_gain_systems_never_match() {
        let flat = TransferFunction::new([0.0], [1.0, 1.0]).unwrap();
        let cmp = matches(&flat, &flat, DEFAULT_TOLERANCE).unwrap();
        assert!(!cmp.is_match);
        assert!(cmp.left.rise_time.is_nan());
        let names = cmp.mismatches();
        assert!(names.contains(&"RiseTime"));
        assert!(names.contains(&"SettlingTime"));
        // Peak is defined (zero) for a flat response
        assert!(!names.contains(&"Peak"));
    }

    #[test]
    fn invalid_tolerance_rejected() {
        let g = first_order(1.0);
        for tol in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                matches(&g, &g, tol),
                Err(LoopError::InvalidArg { .. })
            ));
        }
    }

    #[test]
    fn responses_are_returned() {
        let a = first_order(1.0);
        let b = first_order(0.5);
        let rc = compare_responses(&a, &b, DEFAULT_TOLERANCE, &StepOptions::default()).unwrap();
        assert!(!rc.left.is_empty());
        assert!(!rc.right.is_empty());
        assert!(!rc.comparison.is_match);
    }
}
