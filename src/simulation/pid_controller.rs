// src/simulation/pid_controller.rs

use anyhow::{ensure, Result};

use crate::constants::DEFAULT_PID_RELIEF;

/// Discrete PID loop modelled after the WPILib controller of the same name.
///
/// Gains are positive semidefinite and the period is positive. The error
/// integral can be capped to fight integrator windup; it is unbounded until
/// limits are set.
#[derive(Debug, Clone)]
pub struct PidController {
    p_gain: f64,
    i_gain: f64,
    d_gain: f64,
    period: f64, // seconds

    setpoint: f64,
    relief: f64,

    error: f64,
    last_error: f64,
    cumulative_error: f64,

    max_integral: f64,
    min_integral: f64,
}

impl Default for PidController {
    fn default() -> Self {
        Self {
            p_gain: 0.0,
            i_gain: 0.0,
            d_gain: 0.0,
            period: 0.01,
            setpoint: 0.0,
            relief: DEFAULT_PID_RELIEF,
            error: 0.0,
            last_error: 0.0,
            cumulative_error: 0.0,
            max_integral: f64::INFINITY,
            min_integral: f64::NEG_INFINITY,
        }
    }
}

impl PidController {
    pub fn new(p: f64, i: f64, d: f64, period: f64) -> Result<Self> {
        let mut controller = Self::default();
        controller.set_pid(p, i, d)?;
        controller.set_period(period)?;
        Ok(controller)
    }

    /// Returns the next output for the current measurement.
    pub fn calculate(&mut self, measurement: f64) -> f64 {
        self.last_error = self.error;
        self.error = measurement - self.setpoint;
        // Riemann sum, clamped to the integral limits.
        self.cumulative_error = (self.cumulative_error + self.error * self.period)
            .clamp(self.min_integral, self.max_integral);

        self.p_gain * self.error
            + self.i_gain * self.cumulative_error
            + self.d_gain * (self.error - self.last_error) / self.period
    }

    /// Clears the error history.
    pub fn reset(&mut self) {
        self.cumulative_error = 0.0;
        self.last_error = 0.0;
    }

    /// True when the last error is within `relief` of the setpoint.
    pub fn at_setpoint(&self) -> bool {
        self.error.abs() <= self.relief
    }

    pub fn set_p(&mut self, p: f64) -> Result<()> {
        ensure!(p >= 0.0, "The proportional gain must be positive semidefinite, got {p}");
        self.p_gain = p;
        Ok(())
    }

    pub fn set_i(&mut self, i: f64) -> Result<()> {
        ensure!(i >= 0.0, "The integral gain must be positive semidefinite, got {i}");
        self.i_gain = i;
        Ok(())
    }

    pub fn set_d(&mut self, d: f64) -> Result<()> {
        ensure!(d >= 0.0, "The derivative gain must be positive semidefinite, got {d}");
        self.d_gain = d;
        Ok(())
    }

    pub fn set_pid(&mut self, p: f64, i: f64, d: f64) -> Result<()> {
        self.set_p(p)?;
        self.set_i(i)?;
        self.set_d(d)
    }

    pub fn set_period(&mut self, period: f64) -> Result<()> {
        ensure!(period > 0.0, "The period must be positive, got {period}");
        self.period = period;
        Ok(())
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    pub fn set_relief(&mut self, relief: f64) -> Result<()> {
        ensure!(relief > 0.0, "The relief must be positive, got {relief}");
        self.relief = relief;
        Ok(())
    }

    pub fn set_integral_limits(&mut self, upper: f64, lower: f64) -> Result<()> {
        ensure!(
            upper > lower,
            "The upper integral limit must be greater than the lower limit, got {upper} and {lower}"
        );
        self.max_integral = upper;
        self.min_integral = lower;
        Ok(())
    }

    pub fn gains(&self) -> (f64, f64, f64) {
        (self.p_gain, self.i_gain, self.d_gain)
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn cumulative_error(&self) -> f64 {
        self.cumulative_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only() {
        let mut pid = PidController::new(2.0, 0.0, 0.0, 0.01).unwrap();
        pid.set_setpoint(1.0);
        assert!((pid.calculate(1.5) - 1.0).abs() < 1e-12);
        assert!((pid.calculate(0.5) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn integral_accumulates_and_clamps() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 0.5).unwrap();
        pid.set_integral_limits(0.6, -0.6).unwrap();
        assert!((pid.calculate(1.0) - 0.5).abs() < 1e-12);
        // 0.5 + 0.5 would be 1.0, capped at 0.6
        assert!((pid.calculate(1.0) - 0.6).abs() < 1e-12);
        assert!((pid.cumulative_error() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn derivative_uses_error_change_over_period() {
        let mut pid = PidController::new(0.0, 0.0, 1.0, 0.1).unwrap();
        assert!((pid.calculate(0.2) - 2.0).abs() < 1e-9);
        assert!(pid.calculate(0.2).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 1.0).unwrap();
        pid.calculate(3.0);
        pid.reset();
        assert_eq!(pid.cumulative_error(), 0.0);
        assert!((pid.calculate(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn at_setpoint_respects_relief() {
        let mut pid = PidController::new(1.0, 0.0, 0.0, 0.01).unwrap();
        pid.set_relief(0.1).unwrap();
        pid.calculate(0.05);
        assert!(pid.at_setpoint());
        pid.calculate(0.2);
        assert!(!pid.at_setpoint());
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(PidController::new(-1.0, 0.0, 0.0, 0.01).is_err());
        assert!(PidController::new(0.0, -0.1, 0.0, 0.01).is_err());
        assert!(PidController::new(0.0, 0.0, -2.0, 0.01).is_err());
        assert!(PidController::new(1.0, 0.0, 0.0, 0.0).is_err());

        let mut pid = PidController::default();
        assert!(pid.set_relief(0.0).is_err());
        assert!(pid.set_integral_limits(-1.0, 1.0).is_err());
        assert!(pid.set_integral_limits(1.0, 1.0).is_err());
    }
}

// src/simulation/pid_controller.rs
