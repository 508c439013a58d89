//! Block-diagram construction of the reservoir loop.
//!
//! The open loop is the series product `C · P · G` and the closed loop is its
//! unity-feedback reduction. No pole-zero cancellation happens here, so the
//! closed-loop denominator degree is the sum of the block denominator degrees.

use hl_lti::{Polynomial, TransferFunction};
use tracing::debug;

use crate::error::{LoopError, LoopResult};
use crate::gains::ControllerGains;
use crate::plant::PlantConstants;

/// Open and closed loop of one controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTransferFunctions {
    pub closed_loop: TransferFunction,
    pub open_loop: TransferFunction,
}

/// Controller `C(s) = (Kd s² + Kp s + Ki) / s`, or unity when bypassed.
pub fn controller_block(gains: &ControllerGains) -> LoopResult<TransferFunction> {
    gains.validate()?;
    if !gains.has_pid {
        return Ok(TransferFunction::identity());
    }
    Ok(TransferFunction::new(
        [gains.kd, gains.kp, gains.ki],
        Polynomial::s(),
    )?)
}

/// Motor `P(s) = Kt / (J L s² + (b L + J R) s + b R)`.
pub fn motor_block(plant: &PlantConstants) -> LoopResult<TransferFunction> {
    Ok(TransferFunction::new([plant.kt()], plant.motor_coefficients())?)
}

/// Reservoir with level sensor `G(s) = (Rf / Kf) / (A Rf s + 1)`.
pub fn sensor_block(plant: &PlantConstants) -> LoopResult<TransferFunction> {
    Ok(TransferFunction::new(
        [plant.rf() / plant.kf()],
        [plant.a() * plant.rf(), 1.0],
    )?)
}

/// Build the loop with the default plant constants.
pub fn build(gains: &ControllerGains) -> LoopResult<LoopTransferFunctions> {
    build_with_plant(&PlantConstants::default(), gains)
}

/// Build open and closed loop for `gains` around `plant`.
///
/// # Errors
///
/// - `LoopError::DegeneratePlant` for constants that collapse a block
/// - `LoopError::InvalidGains` for non-finite gains
pub fn build_with_plant(
    plant: &PlantConstants,
    gains: &ControllerGains,
) -> LoopResult<LoopTransferFunctions> {
    plant.validate()?;

    let controller = controller_block(gains)?;
    let motor = motor_block(plant)?;
    let sensor = sensor_block(plant)?;

    let open_loop = controller.series(&motor)?.series(&sensor)?;
    let closed_loop = open_loop.unity_feedback()?;

    let expected_order = controller.order() + motor.order() + sensor.order();
    if closed_loop.order() != expected_order {
        return Err(LoopError::DegeneratePlant {
            what: "closed-loop denominator lost degree",
        });
    }

    debug!(
        has_pid = gains.has_pid,
        kp = gains.kp,
        ki = gains.ki,
        kd = gains.kd,
        order = closed_loop.order(),
        "built reservoir loop"
    );

    Ok(LoopTransferFunctions {
        closed_loop,
        open_loop,
    })
}
