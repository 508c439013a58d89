//! Unit-step response simulation.
//!
//! The transfer function is reduced (shared roots at the origin removed),
//! realized in state space and integrated with fixed-step RK4. Horizon and
//! step size are derived from the pole locations; the horizon is always
//! capped so unstable systems terminate.

use nalgebra::DVector;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LtiError, LtiResult};
use crate::integrator::{Dynamics, Integrator, RK4, ensure_finite_state};
use crate::state_space::StateSpace;
use crate::step_info::StepInfo;
use crate::transfer_function::TransferFunction;

/// Poles with real part at or above `-STABILITY_MARGIN` count as non-settling.
pub const STABILITY_MARGIN: f64 = 1e-9;

/// Largest `|p| * dt` allowed for the fastest pole.
const MAX_POLE_STEP: f64 = 0.05;

/// Horizon used for static gains (no dynamics).
const STATIC_HORIZON: f64 = 1.0;

/// Options for step response simulation.
#[derive(Clone, Debug)]
pub struct StepOptions {
    /// Target number of samples over the horizon
    pub samples: usize,
    /// Horizon = settle_factor / (slowest pole decay rate)
    pub settle_factor: f64,
    /// Maximum simulated time (seconds)
    pub max_horizon: f64,
    /// Maximum number of integration steps (safety limit)
    pub max_steps: usize,
    /// Fixed horizon override (seconds)
    pub t_final: Option<f64>,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            samples: 20_000,
            settle_factor: 12.0,
            max_horizon: 200.0,
            max_steps: 1_000_000,
            t_final: None,
        }
    }
}

impl StepOptions {
    fn validate(&self) -> LtiResult<()> {
        if self.samples == 0 {
            return Err(LtiError::InvalidArg {
                what: "samples must be positive",
            });
        }
        if !(self.settle_factor > 0.0 && self.settle_factor.is_finite()) {
            return Err(LtiError::InvalidArg {
                what: "settle_factor must be positive and finite",
            });
        }
        if !(self.max_horizon > 0.0 && self.max_horizon.is_finite()) {
            return Err(LtiError::InvalidArg {
                what: "max_horizon must be positive and finite",
            });
        }
        if self.max_steps == 0 {
            return Err(LtiError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if let Some(t) = self.t_final {
            if !(t > 0.0 && t.is_finite()) {
                return Err(LtiError::InvalidArg {
                    what: "t_final must be positive and finite",
                });
            }
        }
        Ok(())
    }
}

/// Sampled unit-step response.
#[derive(Clone, Debug, Serialize)]
pub struct StepResponse {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Output samples
    pub y: Vec<f64>,
    /// Analytical steady-state value (DC gain), if the system settles
    pub final_value: Option<f64>,
    /// All poles strictly in the left half plane
    pub stable: bool,
    /// Horizon was limited by `max_horizon` rather than the pole estimate
    pub horizon_capped: bool,
}

impl StepResponse {
    /// Last simulated output sample.
    pub fn last_value(&self) -> f64 {
        self.y.last().copied().unwrap_or(f64::NAN)
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Standard step characteristics of this response.
    pub fn info(&self) -> StepInfo {
        StepInfo::from_response(self)
    }
}

/// State-space model driven by a constant input.
struct ConstantInput<'a> {
    ss: &'a StateSpace,
    u: f64,
}

impl Dynamics for ConstantInput<'_> {
    fn order(&self) -> usize {
        self.ss.order()
    }

    fn derivative(&self, _t: f64, x: &DVector<f64>) -> LtiResult<DVector<f64>> {
        ensure_finite_state(self.ss.derivative(x, self.u), "state derivative")
    }
}

/// Simulate the unit-step response of `tf`.
///
/// # Errors
///
/// - `LtiError::InvalidArg` for invalid options
/// - `LtiError::Improper` if the reduced transfer function is improper
///
/// Unstable or marginal systems are not errors: they are simulated up to
/// `max_horizon` (stopping early if the output overflows) and reported with
/// `stable == false` and no final value.
pub fn step(tf: &TransferFunction, opts: &StepOptions) -> LtiResult<StepResponse> {
    opts.validate()?;

    let reduced = tf.cancel_origin();
    let ss = StateSpace::from_transfer_function(&reduced)?;

    let poles = reduced.poles();
    let stable = poles.iter().all(|p| p.re < -STABILITY_MARGIN);
    let final_value = if stable { reduced.dc_gain() } else { None };

    let (horizon, horizon_capped) = match opts.t_final {
        Some(t) => (t, false),
        None if poles.is_empty() => (STATIC_HORIZON, false),
        None if stable => {
            let slowest = poles.iter().map(|p| -p.re).fold(f64::INFINITY, f64::min);
            let estimate = opts.settle_factor / slowest;
            if estimate > opts.max_horizon {
                (opts.max_horizon, true)
            } else {
                (estimate, false)
            }
        }
        None => (opts.max_horizon, true),
    };

    let fastest = poles.iter().map(|p| p.norm()).fold(0.0, f64::max);
    let mut dt = horizon / opts.samples as f64;
    if fastest > 0.0 {
        dt = dt.min(MAX_POLE_STEP / fastest);
    }
    // Round-off guard so an exact multiple does not gain an extra step
    let mut n_steps = (horizon / dt - 1e-9).ceil().max(1.0) as usize;
    if n_steps > opts.max_steps {
        warn!(
            n_steps,
            max_steps = opts.max_steps,
            "step budget exceeded, coarsening time step"
        );
        n_steps = opts.max_steps;
    }
    dt = horizon / n_steps as f64;

    debug!(
        order = ss.order(),
        stable,
        horizon,
        dt,
        n_steps,
        "simulating step response"
    );

    let input = ConstantInput { ss: &ss, u: 1.0 };
    let mut x = DVector::zeros(input.order());

    let mut t_record = Vec::with_capacity(n_steps + 1);
    let mut y_record = Vec::with_capacity(n_steps + 1);
    t_record.push(0.0);
    y_record.push(ss.output(&x, input.u));

    for i in 0..n_steps {
        let t = i as f64 * dt;
        x = match RK4.advance(&input, t, &x, dt) {
            Ok(next) => next,
            Err(LtiError::Simulation { what }) => {
                debug!(t, what = %what, "step response diverged, stopping early");
                break;
            }
            Err(e) => return Err(e),
        };
        let y = ss.output(&x, input.u);
        t_record.push((i + 1) as f64 * dt);
        y_record.push(y);
        if !y.is_finite() {
            debug!(t = t + dt, "step response output overflowed, stopping early");
            break;
        }
    }

    if horizon_capped && stable {
        warn!(horizon, "step response horizon capped before settling estimate");
    }

    Ok(StepResponse {
        t: t_record,
        y: y_record,
        final_value,
        stable,
        horizon_capped,
    })
}
