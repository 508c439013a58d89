//! PID controller gains.

use hl_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{LoopError, LoopResult};

/// Controller gains plus the flag that enables the PID block.
///
/// With `has_pid == false` the controller is a unity pass-through and the
/// gains have no effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub has_pid: bool,
}

impl ControllerGains {
    pub fn new(kp: f64, ki: f64, kd: f64, has_pid: bool) -> LoopResult<Self> {
        let gains = Self {
            kp,
            ki,
            kd,
            has_pid,
        };
        gains.validate()?;
        Ok(gains)
    }

    /// Active PID controller.
    pub fn pid(kp: f64, ki: f64, kd: f64) -> LoopResult<Self> {
        Self::new(kp, ki, kd, true)
    }

    /// Controller bypassed (unity gain).
    pub fn bypass() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            has_pid: false,
        }
    }

    pub fn validate(&self) -> LoopResult<()> {
        let checks = [
            (self.kp, "Kp must be finite"),
            (self.ki, "Ki must be finite"),
            (self.kd, "Kd must be finite"),
        ];
        for (v, what) in checks {
            ensure_finite(v, what).map_err(|_| LoopError::InvalidGains { what })?;
        }
        Ok(())
    }
}
