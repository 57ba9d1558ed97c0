// src/animation/scene.rs

use crate::constants::{
    CHARGE_STATION_HALF_LENGTH_M, CHARGE_STATION_PIVOT_HEIGHT_M, ROBOT_HEIGHT_RATIO,
};
use crate::data_input::log_data::TelemetryLog;
use crate::types::TracePoints;

/// Row shown at `frame`. Frames run backward through the file: the last row
/// is frame 0.
pub fn row_for_frame(row_count: usize, frame: usize) -> Option<usize> {
    row_count.checked_sub(1)?.checked_sub(frame)
}

/// Number of frames that can be drawn from `row_count` rows.
pub fn frame_count(row_count: usize, requested: usize) -> usize {
    requested.min(row_count)
}

/// Robot rectangle, anchored at its lower-left corner and rotated about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotRect {
    pub anchor: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub angle_rad: f64,
}

impl RobotRect {
    /// Rotation for display, in degrees.
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad.to_degrees()
    }

    /// Corners in drawing order: anchor, along the base, far top, top above anchor.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (x, y) = self.anchor;
        let (sin, cos) = self.angle_rad.sin_cos();
        let base = (self.width * cos, self.width * sin);
        let side = (-self.height * sin, self.height * cos);
        [
            (x, y),
            (x + base.0, y + base.1),
            (x + base.0 + side.0, y + base.1 + side.1),
            (x + side.0, y + side.1),
        ]
    }
}

/// Everything drawn in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene {
    pub charge_station: Vec<(f64, f64)>,
    pub robot: RobotRect,
    pub clock_label: String,
    pub angle_label: String,
    pub angle_trace: TracePoints,
    pub target_trace: TracePoints,
}

impl FrameScene {
    /// State every frame starts from before its update is applied.
    pub fn blank(robot_length: f64) -> Self {
        Self {
            charge_station: Vec::new(),
            robot: RobotRect {
                anchor: (0.0, 0.0),
                width: robot_length,
                height: ROBOT_HEIGHT_RATIO * robot_length,
                angle_rad: 0.0,
            },
            clock_label: String::new(),
            angle_label: String::new(),
            angle_trace: Vec::new(),
            target_trace: Vec::new(),
        }
    }

    /// Scene for `frame`, or `None` if the log has no row for it.
    pub fn compute(log: &TelemetryLog, frame: usize, robot_length: f64) -> Option<Self> {
        let index = row_for_frame(log.len(), frame)?;
        let row = log.row(index)?;
        let (sin, cos) = row.angle.sin_cos();
        let half = CHARGE_STATION_HALF_LENGTH_M;
        let pivot = CHARGE_STATION_PIVOT_HEIGHT_M;

        let mut scene = Self::blank(robot_length);

        // base, pivot, then the beam from its left end to its right end
        scene.charge_station = vec![
            (0.0, 0.0),
            (0.0, pivot),
            (-half * cos, pivot - half * sin),
            (half * cos, pivot + half * sin),
        ];

        let along_beam = half - row.position;
        scene.robot.anchor = (-along_beam * cos, pivot - along_beam * sin);
        scene.robot.angle_rad = row.angle;

        scene.clock_label = format!("Time [s]: {:.2}", row.time);
        scene.angle_label = format!("Angle [deg]: {:.2}", row.angle.to_degrees());

        // The rows already played are the last `frame` rows of the file.
        let played = &log.rows()[log.len() - frame..];
        scene.angle_trace = played.iter().rev().map(|r| (r.time, r.angle)).collect();
        scene.target_trace = played.iter().rev().map(|r| (r.time, 0.0)).collect();

        Some(scene)
    }
}


// src/animation/scene.rs
