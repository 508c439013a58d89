//! Step-response characteristics.
//!
//! Computes rise time, settling time, settling min/max, overshoot,
//! undershoot, peak and peak time from a sampled step response.
//!
//! Conventions, with `y0 = y(0)`, `yf` the final value and `amp = yf - y0`:
//! - Rise time: 10% → 90% of `amp`, linearly interpolated
//! - Settling time: first sample after the last excursion outside ±2% of `|amp|`
//! - Overshoot / undershoot: percent of `|amp|`
//!
//! Non-settling systems get `INFINITY` for times and peak, `NAN` for the rest.

use serde::Serialize;

use crate::response::StepResponse;

/// Lower rise-time threshold (fraction of step amplitude).
pub const RISE_LOW: f64 = 0.1;
/// Upper rise-time threshold (fraction of step amplitude).
pub const RISE_HIGH: f64 = 0.9;
/// Settling band (fraction of step amplitude).
pub const SETTLING_BAND: f64 = 0.02;

/// Below this amplitude the step is treated as flat.
const MIN_AMPLITUDE: f64 = 1e-12;

/// Standard step-response characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepInfo {
    /// 10% → 90% rise time (seconds)
    pub rise_time: f64,
    /// Time to stay within the ±2% band (seconds)
    pub settling_time: f64,
    /// Minimum output once the response has risen
    pub settling_min: f64,
    /// Maximum output once the response has risen
    pub settling_max: f64,
    /// Percent overshoot past the final value
    pub overshoot: f64,
    /// Percent undershoot against the step direction
    pub undershoot: f64,
    /// Peak absolute output
    pub peak: f64,
    /// Time of the peak (seconds)
    pub peak_time: f64,
}

impl StepInfo {
    pub const FIELD_NAMES: [&'static str; 8] = [
        "RiseTime",
        "SettlingTime",
        "SettlingMin",
        "SettlingMax",
        "Overshoot",
        "Undershoot",
        "Peak",
        "PeakTime",
    ];

    /// Fields in fixed order, matching `FIELD_NAMES`.
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.rise_time,
            self.settling_time,
            self.settling_min,
            self.settling_max,
            self.overshoot,
            self.undershoot,
            self.peak,
            self.peak_time,
        ]
    }

    /// Characteristics of a response that never settles.
    pub fn non_settling() -> Self {
        Self {
            rise_time: f64::INFINITY,
            settling_time: f64::INFINITY,
            settling_min: f64::NAN,
            settling_max: f64::NAN,
            overshoot: f64::NAN,
            undershoot: f64::NAN,
            peak: f64::INFINITY,
            peak_time: f64::INFINITY,
        }
    }

    pub fn from_response(resp: &StepResponse) -> Self {
        Self::from_samples(&resp.t, &resp.y, resp.final_value)
    }

    /// Compute characteristics from samples and the steady-state value.
    ///
    /// `final_value == None` marks a non-settling response.
    pub fn from_samples(t: &[f64], y: &[f64], final_value: Option<f64>) -> Self {
        let n = t.len().min(y.len());
        let Some(yf) = final_value else {
            return Self::non_settling();
        };
        if n == 0 {
            return Self::non_settling();
        }
        let (t, y) = (&t[..n], &y[..n]);

        let (peak_idx, peak) = y
            .iter()
            .map(|v| v.abs())
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            });
        let peak_time = t[peak_idx];

        let y0 = y[0];
        let amp = yf - y0;
        if amp.abs() < MIN_AMPLITUDE {
            return Self {
                rise_time: f64::NAN,
                settling_time: f64::NAN,
                settling_min: f64::NAN,
                settling_max: f64::NAN,
                overshoot: f64::NAN,
                undershoot: f64::NAN,
                peak,
                peak_time,
            };
        }

        // Normalized progress: 0 at start, 1 at final value
        let z: Vec<f64> = y.iter().map(|v| (v - y0) / amp).collect();

        let t_low = first_crossing(t, &z, RISE_LOW);
        let t_high = first_crossing(t, &z, RISE_HIGH);
        let rise_time = match (t_low, t_high) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => f64::INFINITY,
        };

        let settling_time = match z.iter().rposition(|v| (v - 1.0).abs() > SETTLING_BAND) {
            None => t[0],
            Some(i) if i + 1 < n => t[i + 1],
            Some(_) => f64::INFINITY,
        };

        let (settling_min, settling_max) = match z.iter().position(|&v| v >= RISE_HIGH) {
            Some(i) => y[i..].iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            }),
            None => (f64::NAN, f64::NAN),
        };

        let z_max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let z_min = z.iter().copied().fold(f64::INFINITY, f64::min);
        let overshoot = 100.0 * (z_max - 1.0).max(0.0);
        let undershoot = 100.0 * (-z_min).max(0.0);

        Self {
            rise_time,
            settling_time,
            settling_min,
            settling_max,
            overshoot,
            undershoot,
            peak,
            peak_time,
        }
    }
}

/// First time the normalized response reaches `level`, linearly interpolated.
fn first_crossing(t: &[f64], z: &[f64], level: f64) -> Option<f64> {
    let i = z.iter().position(|&v| v >= level)?;
    if i == 0 {
        return Some(t[0]);
    }
    let (t0, z0) = (t[i - 1], z[i - 1]);
    let (t1, z1) = (t[i], z[i]);
    let dz = z1 - z0;
    if dz.abs() < f64::EPSILON {
        return Some(t1);
    }
    Some(t0 + (level - z0) / dz * (t1 - t0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_then_hold() -> (Vec<f64>, Vec<f64>) {
        // 0 → 1 linearly over [0, 1], then flat
        let t: Vec<f64> = (0..=200).map(|i| i as f64 / 100.0).collect();
        let y = t.iter().map(|&x| x.min(1.0)).collect();
        (t, y)
    }

    #[test]
    fn rise_time_of_linear_ramp() {
        let (t, y) = ramp_then_hold();
        let info = StepInfo::from_samples(&t, &y, Some(1.0));
        assert!((info.rise_time - 0.8).abs() < 1e-9);
        assert_eq!(info.overshoot, 0.0);
        assert_eq!(info.undershoot, 0.0);
        assert_eq!(info.peak, 1.0);
        assert!((info.peak_time - 1.0).abs() < 1e-9);
        assert!((info.settling_min - 0.9).abs() < 1e-9);
        assert_eq!(info.settling_max, 1.0);
    }

    #[test]
    fn settling_time_after_last_excursion() {
        let t = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = vec![0.0, 0.8, 1.05, 1.03, 1.01, 1.002, 1.0];
        let info = StepInfo::from_samples(&t, &y, Some(1.0));
        // Last sample outside ±2% is t=3 (1.03) → settled from t=4
        assert_eq!(info.settling_time, 4.0);
        assert!((info.overshoot - 5.0).abs() < 1e-9);
        assert_eq!(info.peak, 1.05);
        assert_eq!(info.peak_time, 2.0);
    }

    #[test]
    fn unsettled_at_horizon_is_infinite() {
        let t = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 0.5, 0.7];
        let info = StepInfo::from_samples(&t, &y, Some(1.0));
        assert_eq!(info.settling_time, f64::INFINITY);
        assert_eq!(info.rise_time, f64::INFINITY);
        assert!(info.settling_min.is_nan());
    }

    #[test]
    fn undershoot_for_non_minimum_phase_shape() {
        let t = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = vec![0.0, -0.2, 0.5, 1.0, 1.0];
        let info = StepInfo::from_samples(&t, &y, Some(1.0));
        assert!((info.undershoot - 20.0).abs() < 1e-9);
    }

    #[test]
    fn negative_step_direction() {
        let t = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![0.0, -0.5, -1.1, -1.0];
        let info = StepInfo::from_samples(&t, &y, Some(-1.0));
        assert!((info.overshoot - 10.0).abs() < 1e-9);
        assert_eq!(info.peak, 1.1);
        assert_eq!(info.settling_time, 3.0);
    }

    #[test]
    fn non_settling_uses_sentinels() {
        let info = StepInfo::from_samples(&[0.0, 1.0], &[0.0, 5.0], None);
        assert_eq!(info.rise_time, f64::INFINITY);
        assert_eq!(info.settling_time, f64::INFINITY);
        assert!(info.overshoot.is_nan());
        assert_eq!(info.peak, f64::INFINITY);
    }

    #[test]
    fn flat_response_has_undefined_timing() {
        let info = StepInfo::from_samples(&[0.0, 1.0], &[0.0, 0.0], Some(0.0));
        assert!(info.rise_time.is_nan());
        assert!(info.settling_time.is_nan());
        assert_eq!(info.peak, 0.0);
    }

    #[test]
    fn field_order_is_fixed() {
        let (t, y) = ramp_then_hold();
        let info = StepInfo::from_samples(&t, &y, Some(1.0));
        let arr = info.as_array();
        assert_eq!(arr[0], info.rise_time);
        assert_eq!(arr[4], info.overshoot);
        assert_eq!(arr[7], info.peak_time);
        assert_eq!(StepInfo::FIELD_NAMES[7], "PeakTime");
    }
}
