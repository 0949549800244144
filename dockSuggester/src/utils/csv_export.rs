use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::core::batch::BatchOutcome;
use crate::data::dataset_loader::DatasetError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

pub const SUGGESTIONS_FILE: &str = "suggestions.csv";

/// One row of `suggestions.csv`.
#[derive(Debug, Serialize)]
pub struct SuggestionRecord {
    pub x: i64,
    pub y: i64,
    pub book_area: String,
    pub rank: usize,
    pub prefix: String,
    pub next_suggested: String,
    pub closest_distance: f64,
    /// Space-separated ids of the nearby waypoints, closest first
    pub nearby: String,
    pub rejection: String,
}

impl SuggestionRecord {
    /// Flattens an outcome into rows; a rejected or empty outcome still gets one row.
    pub fn from_outcome(outcome: &BatchOutcome) -> Vec<SuggestionRecord> {
        let base = |rank: usize| SuggestionRecord {
            x: outcome.candidate.x,
            y: outcome.candidate.y,
            book_area: outcome.book_area.to_string(),
            rank,
            prefix: String::new(),
            next_suggested: String::new(),
            closest_distance: 0.0,
            nearby: String::new(),
            rejection: outcome.rejection.as_ref().map(|r| r.to_string()).unwrap_or_default(),
        };

        if outcome.suggestions.is_empty() {
            return vec![base(0)];
        }

        outcome.suggestions.iter().enumerate()
            .map(|(index, suggestion)| SuggestionRecord {
                prefix: suggestion.prefix.clone(),
                next_suggested: suggestion.next_suggested.clone(),
                closest_distance: suggestion.closest_distance,
                nearby: suggestion.nearby.iter()
                    .map(|nb| nb.waypoint.zone_id.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                ..base(index + 1)
            })
            .collect()
    }
}

/// Writes suggestion results into a timestamped directory under `output_dir`.
pub struct SuggestionExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl SuggestionExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn export_suggestions(&self, outcomes: &[BatchOutcome]) -> Result<PathBuf, DatasetError> {
        let _timing = logging::start_timing("export_suggestions",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join(SUGGESTIONS_FILE);
        let mut writer = csv::Writer::from_path(&path)?;
        let mut rows = 0;
        for outcome in outcomes {
            for record in SuggestionRecord::from_outcome(outcome) {
                writer.serialize(record)?;
                rows += 1;
            }
        }
        writer.flush()?;

        info!(path = %path.display(), rows, "exported suggestions");
        Ok(path)
    }
}
