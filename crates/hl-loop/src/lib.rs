//! Reservoir level loop: transfer-function construction and verification.
//!
//! The loop is a motor-driven pump (plant) filling a reservoir whose level is
//! read by a sensor, optionally closed through a PID controller:
//!
//! ```text
//! r ──(+)── C(s) ── P(s) ── G(s) ──┬── y
//!      -│                          │
//!       └──────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `builder`: composes C, P, G and closes the loop with polynomial algebra
//! - `analytical`: the same closed loop from hand-expanded coefficients
//! - `compare`: step-characteristic agreement between two transfer functions
//! - `metrics`: per-configuration step metrics for tabulation
//! - `scenario`: the standard gain scenarios and table assembly

pub mod analytical;
pub mod builder;
pub mod compare;
pub mod error;
pub mod gains;
pub mod metrics;
pub mod plant;
pub mod scenario;
pub mod table;

pub use analytical::{build_analytical, build_analytical_with_plant};
pub use builder::{LoopTransferFunctions, build, build_with_plant};
pub use compare::{Comparison, DEFAULT_TOLERANCE, ResponseComparison, compare_responses, matches};
pub use error::{LoopError, LoopResult};
pub use gains::ControllerGains;
pub use metrics::{StepMetricsRow, extract_metrics};
pub use plant::{PlantConstants, load_plant};
pub use scenario::{Scenario, ScenarioCheck, cross_check, standard_scenarios, tabulate};
pub use table::{StepInfoEntry, StepInfoTable};
