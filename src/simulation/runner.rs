// src/simulation/runner.rs

use anyhow::{ensure, Result};
use tracing::{debug, info};

use crate::constants::MAX_SIMULATION_STEPS;
use crate::data_input::log_data::TelemetryRow;
use crate::simulation::config::SimulationConfig;
use crate::simulation::pid_controller::PidController;
use crate::simulation::robot::Robot;

fn build_controller(config: &SimulationConfig) -> Result<Option<PidController>> {
    let Some(pid_config) = &config.controller else {
        return Ok(None);
    };
    let mut pid = PidController::new(pid_config.p, pid_config.i, pid_config.d, config.time_step)?;
    pid.set_setpoint(pid_config.setpoint);
    pid.set_relief(pid_config.relief)?;
    if let Some([upper, lower]) = pid_config.integral_limits {
        pid.set_integral_limits(upper, lower)?;
    }
    Ok(Some(pid))
}

/// Runs the robot for `duration` seconds and returns the recorded
/// `(time, position, angle)` rows, newest first.
///
/// Time is derived from the step index so it does not drift; the run covers
/// `t = 0, dt, ..., floor(duration/dt)*dt`.
pub fn run_simulation(config: &SimulationConfig) -> Result<Vec<TelemetryRow>> {
    ensure!(
        config.time_step.is_finite() && config.time_step > 0.0,
        "Time step must be positive and finite, got {}",
        config.time_step
    );
    ensure!(
        config.duration.is_finite() && config.duration >= 0.0,
        "Duration must be finite and not negative, got {}",
        config.duration
    );
    let step_count = (config.duration / config.time_step + 1e-9).floor();
    ensure!(
        step_count < MAX_SIMULATION_STEPS as f64,
        "Simulation of {} s at {} s steps exceeds {} steps",
        config.duration,
        config.time_step,
        MAX_SIMULATION_STEPS
    );
    let last_step = step_count as usize;

    let mut robot = Robot::new(config.mass, config.length, config.num_wheels)?;
    robot.set_max_acceleration(config.max_acceleration);
    robot.set_max_velocity(config.max_velocity);
    robot.set_power(config.power)?;

    let mut controller = build_controller(config)?;
    if let Some(pid) = &controller {
        let (p, i, d) = pid.gains();
        info!("Balancing with PID gains p={p} i={i} d={d}");
    }

    let mut rows = Vec::with_capacity(last_step + 1);
    let mut balanced_reported = false;

    for step in 0..=last_step {
        let time = config.time_step * step as f64;

        if let Some(pid) = controller.as_mut() {
            let output = pid.calculate(robot.angle()).clamp(-1.0, 1.0);
            robot.set_power(output)?;
            if !balanced_reported && pid.at_setpoint() {
                info!("Station within relief of setpoint at t = {time:.2} s");
                balanced_reported = true;
            }
        }

        robot.advance_time(config.time_step);
        rows.push(TelemetryRow {
            time,
            position: robot.position(),
            angle: robot.angle(),
        });
    }
    debug!("Final robot state:\n{robot}");

    rows.reverse();
    info!("Simulated {} steps over {:.2} s.", rows.len(), config.duration);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHARGE_STATION_MAX_ANGLE_RAD;
    use crate::simulation::config::PidConfig;

    #[test]
    fn default_run_covers_ten_seconds_newest_first() {
        let rows = run_simulation(&SimulationConfig::default()).unwrap();
        assert_eq!(rows.len(), 1001);
        assert_eq!(rows.last().unwrap().time, 0.0);
        assert!((rows[0].time - 10.0).abs() < 1e-9);
        assert!(rows.windows(2).all(|w| w[0].time > w[1].time));
    }

    #[test]
    fn angle_never_exceeds_station_limit() {
        let rows = run_simulation(&SimulationConfig::default()).unwrap();
        assert!(rows.iter().all(|r| r.angle.abs() <= CHARGE_STATION_MAX_ANGLE_RAD));
    }

    #[test]
    fn robot_drives_forward_with_positive_power() {
        let rows = run_simulation(&SimulationConfig::default()).unwrap();
        assert!(rows[0].position > rows.last().unwrap().position);
    }

    #[test]
    fn controller_keeps_power_in_range() {
        let config = SimulationConfig {
            duration: 1.0,
            controller: Some(PidConfig { p: 50.0, ..PidConfig::default() }),
            ..SimulationConfig::default()
        };
        let rows = run_simulation(&config).unwrap();
        assert_eq!(rows.len(), 101);
    }

    #[test]
    fn invalid_controller_config_is_an_error() {
        let config = SimulationConfig {
            controller: Some(PidConfig { p: -1.0, ..PidConfig::default() }),
            ..SimulationConfig::default()
        };
        assert!(run_simulation(&config).is_err());
    }

    #[test]
    fn non_finite_duration_is_an_error() {
        let config = SimulationConfig { duration: f64::INFINITY, ..SimulationConfig::default() };
        assert!(run_simulation(&config).is_err());
        let config = SimulationConfig { duration: f64::NAN, ..SimulationConfig::default() };
        assert!(run_simulation(&config).is_err());
    }

    #[test]
    fn oversized_run_is_an_error() {
        let config = SimulationConfig { duration: 1.0e12, ..SimulationConfig::default() };
        let err = run_simulation(&config).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn zero_time_step_is_an_error() {
        let config = SimulationConfig { time_step: 0.0, ..SimulationConfig::default() };
        assert!(run_simulation(&config).is_err());
    }
}

// src/simulation/runner.rs
