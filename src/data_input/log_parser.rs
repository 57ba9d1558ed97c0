// src/data_input/log_parser.rs

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::data_input::log_data::{TelemetryLog, TelemetryRow};

pub const TIME_HEADER: &str = "time";
pub const POSITION_HEADER: &str = "position";
pub const ANGLE_HEADER: &str = "angle";

/// Column positions of the required fields within a record.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeaderIndices {
    time: usize,
    position: usize,
    angle: usize,
}

fn map_headers(header_record: &StringRecord) -> Result<HeaderIndices> {
    let find = |name: &str| header_record.iter().position(|h| h.trim() == name);

    let target_headers = [TIME_HEADER, POSITION_HEADER, ANGLE_HEADER];
    let (time, position, angle) = (find(TIME_HEADER), find(POSITION_HEADER), find(ANGLE_HEADER));
    let indices = [time, position, angle];

    debug!("Header mapping status:");
    for (name, index) in target_headers.iter().zip(&indices) {
        debug!("  '{}': {}", name, if index.is_some() { "Found" } else { "Not Found" });
    }

    match (time, position, angle) {
        (Some(time), Some(position), Some(angle)) => Ok(HeaderIndices { time, position, angle }),
        _ => {
            let missing: Vec<String> = target_headers
                .iter()
                .zip(&indices)
                .filter(|(_, index)| index.is_none())
                .map(|(name, _)| format!("'{name}'"))
                .collect();
            bail!("Missing required headers: {}", missing.join(", "))
        }
    }
}

fn parse_field(record: &StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a balancing log (`time,position,angle`, any column order).
///
/// Rows with a missing or unparseable required field are skipped with a
/// warning. A file without the required headers or without a single usable
/// row is an error.
pub fn parse_telemetry_file(input_file_path: &Path) -> Result<TelemetryLog> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(input_file_path)
        .with_context(|| format!("Failed to open {}", input_file_path.display()))?;

    let header_record = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers from {}", input_file_path.display()))?
        .clone();
    info!("Headers found in CSV: {:?}", header_record);
    let indices = map_headers(&header_record)
        .with_context(|| format!("Invalid log file {}", input_file_path.display()))?;

    let mut rows: Vec<TelemetryRow> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };

        let fields = (
            parse_field(&record, indices.time),
            parse_field(&record, indices.position),
            parse_field(&record, indices.angle),
        );
        match fields {
            (Some(time), Some(position), Some(angle)) => {
                rows.push(TelemetryRow { time, position, angle });
            }
            _ => warn!("Skipping row {} due to missing or invalid values", row_index + 1),
        }
    }

    if rows.is_empty() {
        bail!("No usable data rows in {}", input_file_path.display());
    }
    info!("Finished reading {} data rows.", rows.len());

    let log = TelemetryLog::new(rows);
    match log.estimated_sample_rate() {
        Some(rate) => info!("Estimated Sample Rate: {:.2} Hz", rate),
        None => warn!("Could not determine sample rate (need >= 2 rows with distinct timestamps)."),
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "chargestation_parser_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_rows_in_file_order() {
        let path = temp_csv("order", "time,position,angle\n0.02,0.3,0.1\n0.01,0.2,0.2\n0,0.1,0.234\n");
        let log = parse_telemetry_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(log.len(), 3);
        assert_eq!(log.row(0).unwrap().time, 0.02);
        assert_eq!(log.row(2).unwrap().angle, 0.234);
    }

    #[test]
    fn accepts_reordered_and_padded_headers() {
        let path = temp_csv("reordered", " angle , extra, time ,position\n0.1,x,1.5,0.4\n");
        let log = parse_telemetry_file(&path).unwrap();
        fs::remove_file(&path).ok();

        let row = log.row(0).unwrap();
        assert_eq!((row.time, row.position, row.angle), (1.5, 0.4, 0.1));
    }

    #[test]
    fn skips_bad_rows() {
        let path = temp_csv("bad_rows", "time,position,angle\n0.01,abc,0.2\n0,0.1,0.234\n0.5,0.1\n");
        let log = parse_telemetry_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(log.len(), 1);
        assert_eq!(log.row(0).unwrap().time, 0.0);
    }

    #[test]
    fn missing_header_is_an_error() {
        let path = temp_csv("missing", "time,angle\n0,0.2\n");
        let err = parse_telemetry_file(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(format!("{err:#}").contains("'position'"));
    }

    #[test]
    fn every_missing_header_is_named() {
        let header = StringRecord::from(vec!["position"]);
        let message = map_headers(&header).unwrap_err().to_string();
        assert_eq!(message, "Missing required headers: 'time', 'angle'");
    }

    #[test]
    fn header_indices_follow_columns() {
        let header = StringRecord::from(vec!["angle", "time", "position"]);
        let indices = map_headers(&header).unwrap();
        assert_eq!(indices, HeaderIndices { time: 1, position: 2, angle: 0 });
    }

    #[test]
    fn file_without_rows_is_an_error() {
        let path = temp_csv("empty", "time,position,angle\n");
        let result = parse_telemetry_file(&path);
        fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn nonexistent_file_is_an_error() {
        let path = std::env::temp_dir().join("chargestation_parser_does_not_exist.csv");
        assert!(parse_telemetry_file(&path).is_err());
    }
}

// src/data_input/log_parser.rs
