// src/types.rs
// Type aliases shared between the scene and the renderer

use std::ops::Range;

/// (x, y) points of a line trace, in data coordinates.
pub type TracePoints = Vec<(f64, f64)>;

/// Axis limits of a chart: (x range, y range).
pub type ChartRanges = (Range<f64>, Range<f64>);
