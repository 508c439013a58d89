//! Standard controller scenarios and their tabulation.

use hl_lti::StepOptions;
use serde::Serialize;
use tracing::{debug, info};

use crate::analytical::build_analytical_with_plant;
use crate::builder::build_with_plant;
use crate::compare::{Comparison, matches_with};
use crate::error::LoopResult;
use crate::gains::ControllerGains;
use crate::metrics::extract_metrics_with;
use crate::plant::PlantConstants;
use crate::table::StepInfoTable;

/// A labelled gain configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub label: String,
    pub gains: ControllerGains,
}

impl Scenario {
    pub fn new(label: impl Into<String>, gains: ControllerGains) -> Self {
        Self {
            label: label.into(),
            gains,
        }
    }
}

fn pid(label: &str, kp: f64, ki: f64, kd: f64) -> Scenario {
    Scenario::new(
        label,
        ControllerGains {
            kp,
            ki,
            kd,
            has_pid: true,
        },
    )
}

/// The seven reference configurations, in table order.
pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("No controller", ControllerGains::bypass()),
        pid("P (Kp=5)", 5.0, 0.0, 0.0),
        pid("P (Kp=10)", 10.0, 0.0, 0.0),
        pid("PI (Kp=10, Ki=10)", 10.0, 10.0, 0.0),
        pid("PD (Kp=10, Kd=5)", 10.0, 0.0, 5.0),
        pid("PID (Kp=12, Ki=15, Kd=3)", 12.0, 15.0, 3.0),
        pid("PID (Kp=9, Ki=15, Kd=2)", 9.0, 15.0, 2.0),
    ]
}

/// Builder-versus-analytical outcome for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCheck {
    pub label: String,
    pub comparison: Comparison,
}

/// Step metrics of each scenario's block-built closed loop.
pub fn tabulate(
    plant: &PlantConstants,
    scenarios: &[Scenario],
    opts: &StepOptions,
) -> LoopResult<StepInfoTable> {
    let mut table = StepInfoTable::new();
    for scenario in scenarios {
        let loops = build_with_plant(plant, &scenario.gains)?;
        let row = extract_metrics_with(&loops.closed_loop, opts)?;
        debug!(label = %scenario.label, rise_time = row.rise_time, "tabulated scenario");
        table.push(scenario.label.clone(), row);
    }
    Ok(table)
}

/// Compare both builders on every scenario.
pub fn cross_check(
    plant: &PlantConstants,
    scenarios: &[Scenario],
    tolerance: f64,
    opts: &StepOptions,
) -> LoopResult<Vec<ScenarioCheck>> {
    let mut checks = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let built = build_with_plant(plant, &scenario.gains)?;
        let analytical = build_analytical_with_plant(plant, &scenario.gains)?;
        let comparison = matches_with(&built.closed_loop, &analytical, tolerance, opts)?;
        checks.push(ScenarioCheck {
            label: scenario.label.clone(),
            comparison,
        });
    }
    let matched = checks.iter().filter(|c| c.comparison.is_match).count();
    info!(matched, total = checks.len(), "cross-checked builders");
    Ok(checks)
}
