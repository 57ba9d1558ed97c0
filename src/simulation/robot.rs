// src/simulation/robot.rs

use anyhow::{ensure, Result};
use std::fmt;

use crate::constants::{
    CHARGE_STATION_LENGTH_M, CHARGE_STATION_MAX_ANGLE_RAD, DEFAULT_MAX_ACCELERATION_M_S2,
    DEFAULT_MAX_VELOCITY_M_S, GRAVITY_M_S2, VELOCITY_RELIEF_M_S,
};

/// Planar robot driving across a pivoting charge station.
///
/// Assumptions:
///  - 2D robot
///  - Uniform weight distribution
///  - Infinite traction
///  - Infinite jerk
///
/// SI units throughout, angles in radians.
#[derive(Debug, Clone)]
pub struct Robot {
    mass: f64,
    length: f64,
    num_wheels: u32,

    max_acceleration: f64,
    max_velocity: f64,

    state: RobotState,
}

/// Motion state of the robot and the station it sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    pub power: f64,            // simulated motor controller output in [-1, 1]
    pub angle: f64,            // station tilt relative to the floor
    pub angular_velocity: f64,
    pub torque: f64,
    pub position: f64,         // left end of the station to the leftmost wheel
    pub velocity: f64,
    pub acceleration: f64,
}

impl Default for RobotState {
    fn default() -> Self {
        Self {
            power: 0.0,
            angle: CHARGE_STATION_MAX_ANGLE_RAD, // station starts resting on its left side
            angular_velocity: 0.0,
            torque: 0.0,
            position: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
        }
    }
}

impl Robot {
    pub fn new(mass: f64, length: f64, num_wheels: u32) -> Result<Self> {
        ensure!(mass > 0.0, "Robot mass must be positive, got {mass}");
        ensure!(length > 0.0, "Robot length must be positive, got {length}");
        ensure!(num_wheels > 0, "Robot needs at least one wheel");
        Ok(Self {
            mass,
            length,
            num_wheels,
            max_acceleration: DEFAULT_MAX_ACCELERATION_M_S2,
            max_velocity: DEFAULT_MAX_VELOCITY_M_S,
            state: RobotState::default(),
        })
    }

    pub fn set_max_acceleration(&mut self, max_acceleration: f64) {
        self.max_acceleration = max_acceleration;
    }

    pub fn set_max_velocity(&mut self, max_velocity: f64) {
        self.max_velocity = max_velocity;
    }

    /// Sets the motor controller output. Range of [-1, 1] is enforced.
    pub fn set_power(&mut self, power: f64) -> Result<()> {
        ensure!(
            (-1.0..=1.0).contains(&power),
            "Power must be between -1.0 and 1.0, got {power}"
        );
        self.state.power = power;
        Ok(())
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Advances the simulation by `time_step` seconds with Euler's method.
    pub fn advance_time(&mut self, time_step: f64) {
        self.update_torque();
        let s = &mut self.state;
        s.angular_velocity += s.torque * time_step;
        s.angle += s.angular_velocity * time_step + 0.5 * s.torque * time_step.powi(2);
        // The station rests on the floor at its angle limit.
        if s.angle.abs() > CHARGE_STATION_MAX_ANGLE_RAD {
            s.angular_velocity = 0.0;
            s.angle = CHARGE_STATION_MAX_ANGLE_RAD.copysign(s.angle);
        }

        self.update_acceleration();
        let s = &mut self.state;
        s.velocity += s.acceleration * time_step;
        s.position += s.velocity * time_step + 0.5 * s.acceleration * time_step.powi(2);
    }

    /// Torque the wheels exert on the station about its pivot.
    fn update_torque(&mut self) {
        let half_station = CHARGE_STATION_LENGTH_M / 2.0;
        let position = self.state.position;

        // leftmost wheel, then the rest from the second leftmost
        let lever_sum: f64 = (half_station - position)
            + (1..=self.num_wheels)
                .rev()
                .map(|i| half_station - position - self.length / f64::from(i))
                .sum::<f64>();

        let wheel_force =
            self.mass * GRAVITY_M_S2 * self.state.angle.cos() / f64::from(self.num_wheels);
        self.state.torque = lever_sum * wheel_force;
    }

    /// Bang-bang drive towards `power * max_velocity`.
    fn update_acceleration(&mut self) {
        let target = self.state.power * self.max_velocity;
        self.state.acceleration = if self.state.velocity < target - VELOCITY_RELIEF_M_S {
            self.max_acceleration
        } else if self.state.velocity > target + VELOCITY_RELIEF_M_S {
            -self.max_acceleration
        } else {
            0.0
        };
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        writeln!(f, "Power:            {}", s.power)?;
        writeln!(f, "Angle:            {}", s.angle)?;
        writeln!(f, "Angular velocity: {}", s.angular_velocity)?;
        writeln!(f, "Torque:           {}", s.torque)?;
        writeln!(f, "Position:         {}", s.position)?;
        writeln!(f, "Velocity:         {}", s.velocity)?;
        writeln!(f, "Acceleration:     {}", s.acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_construction() {
        assert!(Robot::new(0.0, 0.5, 4).is_err());
        assert!(Robot::new(45.0, -0.5, 4).is_err());
        assert!(Robot::new(45.0, 0.5, 0).is_err());
    }

    #[test]
    fn power_outside_unit_range_is_rejected() {
        let mut bot = Robot::new(45.0, 0.5, 4).unwrap();
        assert!(bot.set_power(1.5).is_err());
        assert!(bot.set_power(-1.01).is_err());
        assert!(bot.set_power(-1.0).is_ok());
        assert_eq!(bot.state().power, -1.0);
    }

    #[test]
    fn station_stays_on_the_floor_with_robot_on_left() {
        // Robot sits left of the pivot: positive torque pushes the angle past the limit.
        let mut bot = Robot::new(45.0, 0.5, 4).unwrap();
        bot.advance_time(0.01);
        assert!(bot.state().torque > 0.0);
        assert_eq!(bot.angle(), CHARGE_STATION_MAX_ANGLE_RAD);
        assert_eq!(bot.state().angular_velocity, 0.0);
    }

    #[test]
    fn accelerates_towards_target_speed() {
        let mut bot = Robot::new(45.0, 0.5, 4).unwrap();
        bot.set_power(0.5).unwrap();
        bot.advance_time(0.1);
        assert_eq!(bot.state().acceleration, DEFAULT_MAX_ACCELERATION_M_S2);
        assert!((bot.velocity() - 0.3).abs() < 1e-12);
        // v*dt + 0.5*a*dt^2 with the updated velocity
        assert!((bot.position() - (0.03 + 0.015)).abs() < 1e-12);
    }

    #[test]
    fn holds_speed_inside_relief_band() {
        let mut bot = Robot::new(45.0, 0.5, 4).unwrap();
        bot.set_power(0.004).unwrap(); // target 0.04 m/s, inside the 0.05 band around 0
        bot.advance_time(0.01);
        assert_eq!(bot.state().acceleration, 0.0);
        assert_eq!(bot.position(), 0.0);
    }

    #[test]
    fn brakes_when_faster_than_target() {
        let mut bot = Robot::new(45.0, 0.5, 4).unwrap();
        bot.set_power(1.0).unwrap();
        for _ in 0..10 {
            bot.advance_time(0.1);
        }
        bot.set_power(0.0).unwrap();
        bot.advance_time(0.1);
        assert_eq!(bot.state().acceleration, -DEFAULT_MAX_ACCELERATION_M_S2);
    }

    #[test]
    fn display_lists_state() {
        let bot = Robot::new(45.0, 0.5, 4).unwrap();
        let text = bot.to_string();
        assert!(text.contains("Angle:"));
        assert!(text.contains("Acceleration:"));
    }
}

// src/simulation/robot.rs
