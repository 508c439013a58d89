//! Frequency response (Bode) data.

use nalgebra::Complex;
use serde::Serialize;

use crate::error::{LtiError, LtiResult};
use crate::transfer_function::TransferFunction;

/// One Bode sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodePoint {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Gain in decibels
    pub magnitude_db: f64,
    /// Phase in degrees, unwrapped along the frequency grid
    pub phase_deg: f64,
}

/// `n` logarithmically spaced points from `10^lo_exp` to `10^hi_exp`.
pub fn logspace(lo_exp: f64, hi_exp: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![10f64.powf(lo_exp)],
        _ => {
            let step = (hi_exp - lo_exp) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(lo_exp + step * i as f64))
                .collect()
        }
    }
}

/// Evaluate `tf(jω)` on a frequency grid.
///
/// # Errors
///
/// Returns `LtiError::InvalidArg` if any frequency is negative or non-finite.
pub fn bode(tf: &TransferFunction, omegas: &[f64]) -> LtiResult<Vec<BodePoint>> {
    if omegas.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
        return Err(LtiError::InvalidArg {
            what: "frequencies must be finite and non-negative",
        });
    }

    let mut out = Vec::with_capacity(omegas.len());
    let mut prev_phase: Option<f64> = None;
    for &omega in omegas {
        let h = tf.eval(Complex::new(0.0, omega));
        let magnitude_db = 20.0 * h.norm().log10();
        let mut phase_deg = h.arg().to_degrees();
        if let Some(prev) = prev_phase {
            while phase_deg - prev > 180.0 {
                phase_deg -= 360.0;
            }
            while phase_deg - prev < -180.0 {
                phase_deg += 360.0;
            }
        }
        if phase_deg.is_finite() {
            prev_phase = Some(phase_deg);
        }
        out.push(BodePoint {
            omega,
            magnitude_db,
            phase_deg,
        });
    }
    Ok(out)
}
