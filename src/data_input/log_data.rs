// src/data_input/log_data.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::DEGENERATE_RANGE_PADDING;

/// One sample of the balancing log.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TelemetryRow {
    pub time: f64,     // Timestamp (seconds).
    pub position: f64, // Distance from the left end of the station to the leftmost wheel (meters).
    pub angle: f64,    // Station tilt (radians).
}

/// The whole log, rows kept in file order.
///
/// Logs written by the simulator are newest-first, so the last row is the
/// start of the run. Frame indexing relies on that order.
#[derive(Debug, Default, Clone)]
pub struct TelemetryLog {
    rows: Vec<TelemetryRow>,
}

impl TelemetryLog {
    pub fn new(rows: Vec<TelemetryRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&TelemetryRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[TelemetryRow] {
        &self.rows
    }

    pub fn time_column(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.time).collect()
    }

    pub fn angle_column(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.angle).collect()
    }

    /// (min, max) of the time column, padded when the range is empty.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        column_bounds(&self.time_column())
    }

    /// (min, max) of the angle column, padded when the range is empty.
    pub fn angle_bounds(&self) -> Option<(f64, f64)> {
        column_bounds(&self.angle_column())
    }

    /// Average sample rate in Hz from the positive gaps between rows.
    /// Order-independent: the log may be newest-first.
    pub fn estimated_sample_rate(&self) -> Option<f64> {
        let mut total_delta = 0.0;
        let mut count = 0usize;
        for pair in self.rows.windows(2) {
            let delta = (pair[1].time - pair[0].time).abs();
            if delta > 1e-9 {
                total_delta += delta;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(count as f64 / total_delta)
    }
}

fn column_bounds(column: &Array1<f64>) -> Option<(f64, f64)> {
    let min = *column.min().ok()?;
    let max = *column.max().ok()?;
    if (max - min).abs() < 1e-12 {
        Some((min - DEGENERATE_RANGE_PADDING, max + DEGENERATE_RANGE_PADDING))
    } else {
        Some((min, max))
    }
}


// src/data_input/log_data.rs
