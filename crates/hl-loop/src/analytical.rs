//! Closed loop from hand-expanded coefficients.
//!
//! Independent of the block algebra in `builder`: the closed-loop polynomial
//! is written out directly, with the controller integrator already cancelled.
//!
//! With `p2 = J L`, `p1 = b L + J R`, `p0 = b R`:
//!
//! ```text
//!           Kt Rf (Kd s² + Kp s + Ki)
//! T(s) = ─────────────────────────────────────
//!         a4 s⁴ + a3 s³ + a2 s² + a1 s + a0
//!
//! a4 = Kf p2 A Rf
//! a3 = Kf (p2 + p1 A Rf)
//! a2 = Kf (p1 + p0 A Rf) + Kt Rf Kd
//! a1 = Kf p0 + Kt Rf Kp
//! a0 = Kt Rf Ki
//! ```

use hl_lti::TransferFunction;
use tracing::debug;

use crate::error::LoopResult;
use crate::gains::ControllerGains;
use crate::plant::PlantConstants;

/// Analytical closed loop with the default plant constants.
pub fn build_analytical(gains: &ControllerGains) -> LoopResult<TransferFunction> {
    build_analytical_with_plant(&PlantConstants::default(), gains)
}

/// Analytical closed loop for `gains` around `plant`.
///
/// With PID active the result is always fourth order, matching the block
/// builder; Ki = 0 simply gives `a0 = 0`. Without PID the loop is
/// `P G / (1 + P G)`.
pub fn build_analytical_with_plant(
    plant: &PlantConstants,
    gains: &ControllerGains,
) -> LoopResult<TransferFunction> {
    plant.validate()?;
    gains.validate()?;

    let [p2, p1, p0] = plant.motor_coefficients();
    let (kt, a, rf, kf) = (plant.kt(), plant.a(), plant.rf(), plant.kf());
    let ktrf = kt * rf;

    // Open-loop denominator without controller, scaled by Kf
    let d3 = kf * p2 * a * rf;
    let d2 = kf * (p2 + p1 * a * rf);
    let d1 = kf * (p1 + p0 * a * rf);
    let d0 = kf * p0;

    let tf = if !gains.has_pid {
        TransferFunction::new([ktrf], [d3, d2, d1, d0 + ktrf])?
    } else {
        let (kp, ki, kd) = (gains.kp, gains.ki, gains.kd);
        let a4 = d3;
        let a3 = d2;
        let a2 = d1 + ktrf * kd;
        let a1 = d0 + ktrf * kp;
        let a0 = ktrf * ki;
        TransferFunction::new([ktrf * kd, ktrf * kp, ktrf * ki], [a4, a3, a2, a1, a0])?
    };

    debug!(has_pid = gains.has_pid, order = tf.order(), "analytical closed loop");
    Ok(tf)
}
