use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::data::dataset_loader::DatasetError;
use crate::models::suggestion::Suggestion;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Reads the backend's suggestion list and keeps only the pending ones.
pub fn load_pending(path: impl AsRef<Path>) -> Result<Vec<Suggestion>, DatasetError> {
    let _timing = logging::start_timing("load_pending",
        OperationCategory::FileIO { subcategory: FileIOType::SuggestionsLoad });

    let file = File::open(path.as_ref())?;
    let suggestions: Vec<Suggestion> = serde_json::from_reader(BufReader::new(file))?;
    let total = suggestions.len();
    let pending = pending_only(suggestions);

    info!(path = %path.as_ref().display(), total, pending = pending.len(), "loaded suggestions");
    Ok(pending)
}

pub fn pending_only(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.into_iter().filter(Suggestion::is_pending).collect()
}
