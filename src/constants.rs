// src/constants.rs

use plotters::style::colors::{BLACK, RED};
use plotters::style::RGBColor;

// --- Charge station geometry ---
pub const CHARGE_STATION_LENGTH_M: f64 = 1.93; // as per game manual
pub const CHARGE_STATION_HALF_LENGTH_M: f64 = 0.965;
pub const CHARGE_STATION_PIVOT_HEIGHT_M: f64 = 0.23;
pub const CHARGE_STATION_MAX_ANGLE_RAD: f64 = 0.234;

pub const GRAVITY_M_S2: f64 = 9.81;

// --- Robot defaults ---
pub const DEFAULT_ROBOT_MASS_KG: f64 = 45.0;
pub const DEFAULT_ROBOT_LENGTH_M: f64 = 0.5;
pub const DEFAULT_ROBOT_WHEELS: u32 = 4;
pub const DEFAULT_ROBOT_POWER: f64 = 0.02;
pub const DEFAULT_MAX_ACCELERATION_M_S2: f64 = 3.0; // applies to braking and forward motion
pub const DEFAULT_MAX_VELOCITY_M_S: f64 = 10.0;
pub const VELOCITY_RELIEF_M_S: f64 = 0.05; // keeps the drive from hunting around the target speed

// --- Simulation defaults ---
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;
pub const DEFAULT_SIM_LENGTH_S: f64 = 10.0;
pub const MAX_SIMULATION_STEPS: usize = 10_000_000;
pub const DEFAULT_OUTPUT_CSV: &str = "data/test.csv";

// --- PID defaults ---
pub const DEFAULT_PID_RELIEF: f64 = 0.05;

// --- Animation ---
pub const DEFAULT_ANIMATION_FRAMES: usize = 1000;
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 10;
pub const ROBOT_HEIGHT_RATIO: f64 = 0.618; // golden ratio for height

pub const SCENE_X_MIN: f64 = -1.1;
pub const SCENE_X_MAX: f64 = 1.1;
pub const SCENE_Y_MIN: f64 = 0.0;
pub const SCENE_Y_MAX: f64 = 2.2;

pub const CLOCK_LABEL_POS: (f64, f64) = (-0.75, 1.75);
pub const ANGLE_LABEL_POS: (f64, f64) = (0.25, 1.75);

// Padding applied to a trace axis whose data range is empty.
pub const DEGENERATE_RANGE_PADDING: f64 = 0.5;

// Plot dimensions.
pub const TWO_PANEL_WIDTH: u32 = 800;
pub const TWO_PANEL_HEIGHT: u32 = 1000;
pub const SINGLE_PANEL_WIDTH: u32 = 800;
pub const SINGLE_PANEL_HEIGHT: u32 = 800;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_SCENE_LABEL: i32 = 22;

// --- Plot Color Assignments ---
pub const COLOR_CHARGE_STATION: &RGBColor = &BLACK;
pub const COLOR_ROBOT: &RGBColor = &RED;
pub const COLOR_ANGLE_TRACE: &RGBColor = &RED;
pub const COLOR_TARGET_TRACE: &RGBColor = &BLACK;
pub const COLOR_SCENE_TEXT: &RGBColor = &BLACK;

// Stroke widths for lines
pub const LINE_WIDTH_CHARGE_STATION: u32 = 2;
pub const LINE_WIDTH_PLOT: u32 = 1;

// --- Video export ---
pub const FRAME_FILE_PATTERN: &str = "frame_%06d.png";

// src/constants.rs
