//! Fixed-step integration of linear dynamics over a vector state.

use nalgebra::DVector;

use crate::error::{LtiError, LtiResult};

/// Continuous-time system `dx/dt = f(t, x)`.
pub trait Dynamics {
    /// Number of states.
    fn order(&self) -> usize;

    /// State derivative at `(t, x)`.
    ///
    /// Implementations return `LtiError::Simulation` when the derivative
    /// cannot be represented (overflow).
    fn derivative(&self, t: f64, x: &DVector<f64>) -> LtiResult<DVector<f64>>;
}

/// One step of a fixed-step scheme.
pub trait Integrator {
    fn advance<D: Dynamics>(
        &self,
        sys: &D,
        t: f64,
        x: &DVector<f64>,
        h: f64,
    ) -> LtiResult<DVector<f64>>;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn advance<D: Dynamics>(
        &self,
        sys: &D,
        t: f64,
        x: &DVector<f64>,
        h: f64,
    ) -> LtiResult<DVector<f64>> {
        let half = 0.5 * h;
        let k1 = sys.derivative(t, x)?;
        let k2 = sys.derivative(t + half, &(x + &k1 * half))?;
        let k3 = sys.derivative(t + half, &(x + &k2 * half))?;
        let k4 = sys.derivative(t + h, &(x + &k3 * h))?;

        Ok(x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
    }
}

/// Fail with `LtiError::Simulation` if any component is NaN or infinite.
pub fn ensure_finite_state(x: DVector<f64>, what: &str) -> LtiResult<DVector<f64>> {
    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(LtiError::Simulation {
            what: format!("{what} is not finite"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x
    struct Decay;

    impl Dynamics for Decay {
        fn order(&self) -> usize {
            1
        }

        fn derivative(&self, _t: f64, x: &DVector<f64>) -> LtiResult<DVector<f64>> {
            Ok(-x)
        }
    }

    /// x'' = -x as a first-order pair
    struct Oscillator;

    impl Dynamics for Oscillator {
        fn order(&self) -> usize {
            2
        }

        fn derivative(&self, _t: f64, x: &DVector<f64>) -> LtiResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[1], -x[0]]))
        }
    }

    struct Overflowing;

    impl Dynamics for Overflowing {
        fn order(&self) -> usize {
            1
        }

        fn derivative(&self, _t: f64, x: &DVector<f64>) -> LtiResult<DVector<f64>> {
            ensure_finite_state(x * f64::MAX * 10.0, "derivative")
        }
    }

    #[test]
    fn rk4_exponential_decay() {
        let mut x = DVector::from_element(Decay.order(), 1.0);
        let h = 0.01;
        for i in 0..100 {
            x = RK4.advance(&Decay, i as f64 * h, &x, h).unwrap();
        }
        assert!((x[0] - (-1.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn rk4_oscillator_keeps_phase() {
        let mut x = DVector::from_vec(vec![1.0, 0.0]);
        let h = 0.001;
        let n = 1000;
        for i in 0..n {
            x = RK4.advance(&Oscillator, i as f64 * h, &x, h).unwrap();
        }
        assert!((x[0] - 1.0_f64.cos()).abs() < 1e-10);
        assert!((x[1] + 1.0_f64.sin()).abs() < 1e-10);
    }

    #[test]
    fn overflow_is_a_simulation_error() {
        let x = DVector::from_element(1, 1.0);
        let err = RK4.advance(&Overflowing, 0.0, &x, 0.1).unwrap_err();
        assert!(matches!(err, LtiError::Simulation { .. }));
    }
}
