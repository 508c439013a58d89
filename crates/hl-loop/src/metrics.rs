//! Per-configuration step metrics for the step info table.

use hl_lti::{StepOptions, StepResponse, TransferFunction, step};
use serde::Serialize;

use crate::error::LoopResult;

/// One table row, in fixed field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepMetricsRow {
    pub rise_time: f64,
    pub settling_time: f64,
    pub overshoot: f64,
    /// Last simulated output sample
    pub steady_state_value: f64,
    /// `|1 - steady_state_value|`
    pub steady_state_error: f64,
}

impl StepMetricsRow {
    pub const FIELD_NAMES: [&'static str; 5] = [
        "RiseTime",
        "SettlingTime",
        "Overshoot",
        "SteadyStateValue",
        "SteadyStateError",
    ];

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.rise_time,
            self.settling_time,
            self.overshoot,
            self.steady_state_value,
            self.steady_state_error,
        ]
    }

    /// Row for an already simulated response.
    pub fn from_response(resp: &StepResponse) -> Self {
        let info = resp.info();
        let steady_state_value = resp.last_value();
        Self {
            rise_time: info.rise_time,
            settling_time: info.settling_time,
            overshoot: info.overshoot,
            steady_state_value,
            steady_state_error: (1.0 - steady_state_value).abs(),
        }
    }
}

/// Simulate `tf` with default options and extract its row.
pub fn extract_metrics(tf: &TransferFunction) -> LoopResult<StepMetricsRow> {
    extract_metrics_with(tf, &StepOptions::default())
}

pub fn extract_metrics_with(
    tf: &TransferFunction,
    opts: &StepOptions,
) -> LoopResult<StepMetricsRow> {
    let resp = step(tf, opts)?;
    Ok(StepMetricsRow::from_response(&resp))
}
