// src/data_input/log_writer.rs

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::data_input::log_data::TelemetryRow;
use crate::data_input::log_parser::{ANGLE_HEADER, POSITION_HEADER, TIME_HEADER};

/// Writes rows as `time,position,angle` in the order given.
/// Parent directories are created when missing.
pub fn write_telemetry_file(output_path: &Path, rows: &[TelemetryRow]) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(output_path).with_context(|| {
        format!(
            "Failed to open {}. Check permissions and that the path exists.",
            output_path.display()
        )
    })?;

    writer.write_record([TIME_HEADER, POSITION_HEADER, ANGLE_HEADER])?;
    for row in rows {
        writer.write_record([row.time.to_string(), row.position.to_string(), row.angle.to_string()])?;
    }
    writer.flush()?;

    info!("Wrote {} rows to '{}'.", rows.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_then_rows() {
        let dir = std::env::temp_dir().join(format!("chargestation_writer_{}", std::process::id()));
        let path = dir.join("nested").join("log.csv");
        let rows = [
            TelemetryRow { time: 0.01, position: 0.5, angle: -0.1 },
            TelemetryRow { time: 0.0, position: 0.0, angle: 0.234 },
        ];
        write_telemetry_file(&path, &rows).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, ["time,position,angle", "0.01,0.5,-0.1", "0,0,0.234"]);
    }
}

// src/data_input/log_writer.rs
