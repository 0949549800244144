use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::{info, warn};

use crate::models::waypoint::Waypoint;
use crate::data::poi::Coordinate;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug)]
pub enum DatasetError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    InvalidLine { line: usize, content: String, reason: String },
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::IoError(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::JsonError(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::CsvError(err)
    }
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::IoError(e) => write!(f, "IO error: {}", e),
            DatasetError::JsonError(e) => write!(f, "JSON error: {}", e),
            DatasetError::CsvError(e) => write!(f, "CSV error: {}", e),
            DatasetError::InvalidLine { line, content, reason } => {
                write!(f, "Line {}: '{}' - {}", line, content, reason)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::IoError(e) => Some(e),
            DatasetError::JsonError(e) => Some(e),
            DatasetError::CsvError(e) => Some(e),
            DatasetError::InvalidLine { .. } => None,
        }
    }
}

/// Waypoints read from the canonical dataset plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct ParsedDataset {
    pub waypoints: Vec<Waypoint>,
    pub errors: Vec<DatasetError>,
}

const EXPECTED_FIELDS: usize = 5;

fn parse_enabled(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "enabled")
}

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').map(str::trim).filter(|part| !part.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn parse_fields(fields: &[&str]) -> Result<Waypoint, String> {
    let x = fields[1].parse::<i64>().map_err(|e| format!("invalid x '{}': {}", fields[1], e))?;
    let y = fields[2].parse::<i64>().map_err(|e| format!("invalid y '{}': {}", fields[2], e))?;
    let map = fields[3].parse::<u32>().map_err(|e| format!("invalid map '{}': {}", fields[3], e))?;

    Ok(Waypoint {
        zone_id: fields[0].to_string(),
        coordinate: Coordinate::new(x, y),
        map,
        enabled: parse_enabled(fields[4]),
    })
}

/// Parses the tab-separated dataset text (`zone_id x y map enabled`).
///
/// Comments, blank lines and diff `+` markers are ignored. Lines that do not
/// parse are reported in `errors` and skipped.
pub fn parse_dataset(content: &str) -> ParsedDataset {
    let mut parsed = ParsedDataset::default();

    for (index, original) in content.lines().enumerate() {
        let line_num = index + 1;
        let mut line = original.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix('+') {
            line = stripped.trim();
        }
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() < EXPECTED_FIELDS {
            parsed.errors.push(DatasetError::InvalidLine {
                line: line_num,
                content: original.to_string(),
                reason: format!(
                    "Expected {} parts (zone_id, x, y, map, enabled), got {}",
                    EXPECTED_FIELDS,
                    fields.len()
                ),
            });
            continue;
        }

        match parse_fields(&fields) {
            Ok(waypoint) => parsed.waypoints.push(waypoint),
            Err(reason) => parsed.errors.push(DatasetError::InvalidLine {
                line: line_num,
                content: original.to_string(),
                reason,
            }),
        }
    }

    parsed
}

/// Loads the waypoint set from `.json` (backend shape) or the tab-separated
/// dataset file (any other extension).
pub fn load_dataset(path: impl AsRef<Path>) -> Result<ParsedDataset, DatasetError> {
    let _timing = logging::start_timing("load_dataset",
        OperationCategory::FileIO { subcategory: FileIOType::DatasetLoad });
    let path = path.as_ref();

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let parsed = if is_json {
        let file = File::open(path)?;
        let waypoints: Vec<Waypoint> = serde_json::from_reader(BufReader::new(file))?;
        ParsedDataset { waypoints, errors: Vec::new() }
    } else {
        parse_dataset(&fs::read_to_string(path)?)
    };

    for error in parsed.errors.iter().take(5) {
        warn!("{}", error);
    }
    info!(
        path = %path.display(),
        waypoints = parsed.waypoints.len(),
        skipped = parsed.errors.len(),
        "loaded waypoint dataset"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tabs_spaces_comments_and_diff_markers() {
        let content = "# zone\tx\ty\tmap\tenabled\n\
                       1A-W\t400\t300\t7\ttrue\n\
                       \n\
                       +2B-S   1500  2700  7  false\n\
                       XD3\t3500\t2500\t7\tEnabled\n";
        let parsed = parse_dataset(content);
        assert!(parsed.errors.is_empty());

        let ids: Vec<&str> = parsed.waypoints.iter().map(|wp| wp.zone_id.as_str()).collect();
        assert_eq!(ids, vec!["1A-W", "2B-S", "XD3"]);
        assert_eq!(parsed.waypoints[1].coordinate, Coordinate::new(1500, 2700));
        assert!(!parsed.waypoints[1].enabled);
        assert!(parsed.waypoints[2].enabled);
    }

    #[test]
    fn bad_lines_are_reported_not_fatal() {
        let content = "1A-W\t400\t300\t7\ttrue\nshort line\n3C-E\tabc\t1\t7\ttrue\n";
        let parsed = parse_dataset(content);
        assert_eq!(parsed.waypoints.len(), 1);
        assert_eq!(parsed.errors.len(), 2);

        match &parsed.errors[0] {
            DatasetError::InvalidLine { line, reason, .. } => {
                assert_eq!(*line, 2);
                assert!(reason.contains("got 2"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match &parsed.errors[1] {
            DatasetError::InvalidLine { line, reason, .. } => {
                assert_eq!(*line, 3);
                assert!(reason.starts_with("invalid x"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let parsed = parse_dataset("4D-N\t100\t3000\t7\ttrue\tnote\n");
        assert_eq!(parsed.waypoints.len(), 1);
        assert_eq!(parsed.waypoints[0].map, 7);
    }
}
