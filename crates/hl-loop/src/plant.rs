//! Physical constants of the pump motor and reservoir.
//!
//! Loaded from YAML when a plant file is given, otherwise the defaults below
//! are shared by both loop builders.

use std::path::Path;

use hl_core::{Area, Inductance, Inertia, Resistance, henry, kgm2, m2, ohm};
use serde::{Deserialize, Serialize};

use crate::error::{LoopError, LoopResult};

/// Motor, reservoir and sensor constants.
///
/// YAML fields are plain SI numbers; any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConstants {
    /// Rotor moment of inertia J (kg·m²)
    pub inertia: Inertia,
    /// Viscous friction b (N·m·s)
    pub friction: f64,
    /// Motor torque constant Kt (N·m/A)
    pub torque_constant: f64,
    /// Armature resistance R
    pub resistance: Resistance,
    /// Armature inductance L
    pub inductance: Inductance,
    /// Reservoir cross-section A
    pub area: Area,
    /// Outflow resistance Rf (s/m²)
    pub outflow_resistance: f64,
    /// Level sensor gain Kf
    pub sensor_gain: f64,
}

impl Default for PlantConstants {
    fn default() -> Self {
        Self {
            inertia: kgm2(0.01),
            friction: 0.1,
            torque_constant: 0.01,
            resistance: ohm(1.0),
            inductance: henry(0.5),
            area: m2(1.0),
            outflow_resistance: 2.0,
            sensor_gain: 0.5,
        }
    }
}

impl PlantConstants {
    pub fn j(&self) -> f64 {
        self.inertia.value
    }

    pub fn b(&self) -> f64 {
        self.friction
    }

    pub fn kt(&self) -> f64 {
        self.torque_constant
    }

    pub fn r(&self) -> f64 {
        self.resistance.value
    }

    pub fn l(&self) -> f64 {
        self.inductance.value
    }

    pub fn a(&self) -> f64 {
        self.area.value
    }

    pub fn rf(&self) -> f64 {
        self.outflow_resistance
    }

    pub fn kf(&self) -> f64 {
        self.sensor_gain
    }

    /// Motor denominator coefficients `[J·L, b·L + J·R, b·R]`.
    pub fn motor_coefficients(&self) -> [f64; 3] {
        let (j, b, r, l) = (self.j(), self.b(), self.r(), self.l());
        [j * l, b * l + j * r, b * r]
    }

    /// Reject parameterizations that would leave a block without dynamics or
    /// make a coefficient non-finite.
    pub fn validate(&self) -> LoopResult<()> {
        let fields = [
            (self.j(), "inertia J is not finite"),
            (self.b(), "friction b is not finite"),
            (self.kt(), "torque constant Kt is not finite"),
            (self.r(), "resistance R is not finite"),
            (self.l(), "inductance L is not finite"),
            (self.a(), "area A is not finite"),
            (self.rf(), "outflow resistance Rf is not finite"),
            (self.kf(), "sensor gain Kf is not finite"),
        ];
        if let Some(&(_, what)) = fields.iter().find(|(v, _)| !v.is_finite()) {
            return Err(LoopError::DegeneratePlant { what });
        }

        if self.j() * self.l() == 0.0 {
            return Err(LoopError::DegeneratePlant {
                what: "J·L must be non-zero",
            });
        }
        if self.a() * self.rf() == 0.0 {
            return Err(LoopError::DegeneratePlant {
                what: "A·Rf must be non-zero",
            });
        }
        if self.kf() == 0.0 {
            return Err(LoopError::DegeneratePlant {
                what: "sensor gain Kf must be non-zero",
            });
        }
        Ok(())
    }

    /// Parse and validate a YAML plant document.
    pub fn from_yaml_str(content: &str) -> LoopResult<Self> {
        let plant: Self = serde_yaml::from_str(content)
            .map_err(|e| LoopError::Config(format!("Failed to parse plant YAML: {}", e)))?;
        plant.validate()?;
        Ok(plant)
    }
}

/// Load plant constants from a YAML file.
pub fn load_plant(path: &Path) -> LoopResult<PlantConstants> {
    let content = std::fs::read_to_string(path).map_err(|e| LoopError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    PlantConstants::from_yaml_str(&content)
}
