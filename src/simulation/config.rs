// src/simulation/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{
    DEFAULT_MAX_ACCELERATION_M_S2, DEFAULT_MAX_VELOCITY_M_S, DEFAULT_PID_RELIEF,
    DEFAULT_ROBOT_LENGTH_M, DEFAULT_ROBOT_MASS_KG, DEFAULT_ROBOT_POWER, DEFAULT_ROBOT_WHEELS,
    DEFAULT_SIM_LENGTH_S, DEFAULT_TIME_STEP_S,
};

/// Parameters of a simulation run. Every field has a default so a TOML file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub mass: f64,
    pub length: f64,
    pub num_wheels: u32,
    pub power: f64,
    pub max_acceleration: f64,
    pub max_velocity: f64,
    pub time_step: f64,
    pub duration: f64,
    pub controller: Option<PidConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mass: DEFAULT_ROBOT_MASS_KG,
            length: DEFAULT_ROBOT_LENGTH_M,
            num_wheels: DEFAULT_ROBOT_WHEELS,
            power: DEFAULT_ROBOT_POWER,
            max_acceleration: DEFAULT_MAX_ACCELERATION_M_S2,
            max_velocity: DEFAULT_MAX_VELOCITY_M_S,
            time_step: DEFAULT_TIME_STEP_S,
            duration: DEFAULT_SIM_LENGTH_S,
            controller: None,
        }
    }
}

/// Gains and limits for the balancing loop. When present, the controller
/// drives the robot power from the station angle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub setpoint: f64,
    pub relief: f64,
    /// `[upper, lower]` bounds on the error integral.
    pub integral_limits: Option<[f64; 2]>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            p: 0.0,
            i: 0.0,
            d: 0.0,
            setpoint: 0.0,
            relief: DEFAULT_PID_RELIEF,
            integral_limits: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid simulation config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("In {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.num_wheels, 4);
        assert!(config.controller.is_none());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = SimulationConfig::from_toml_str(
            r#"
            mass = 50.0
            duration = 2.5

            [controller]
            p = 0.8
            d = 0.05
            integral_limits = [1.0, -1.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.mass, 50.0);
        assert_eq!(config.duration, 2.5);
        assert_eq!(config.length, DEFAULT_ROBOT_LENGTH_M);

        let pid = config.controller.unwrap();
        assert_eq!(pid.p, 0.8);
        assert_eq!(pid.i, 0.0);
        assert_eq!(pid.relief, DEFAULT_PID_RELIEF);
        assert_eq!(pid.integral_limits, Some([1.0, -1.0]));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SimulationConfig::from_toml_str("wheels = 3").is_err());
    }
}

// src/simulation/config.rs
