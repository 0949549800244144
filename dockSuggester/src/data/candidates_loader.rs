use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

use crate::data::dataset_loader::DatasetError;
use crate::data::poi::Coordinate;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    x: i64,
    y: i64,
}

/// Reads candidate coordinates from CSV with an `x,y` header.
pub fn read_candidates<R: Read>(reader: R) -> Result<Vec<Coordinate>, DatasetError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut candidates = Vec::new();
    for result in rdr.deserialize() {
        let record: CandidateRecord = result?;
        candidates.push(Coordinate::new(record.x, record.y));
    }
    Ok(candidates)
}

pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<Coordinate>, DatasetError> {
    let _timing = logging::start_timing("load_candidates",
        OperationCategory::FileIO { subcategory: FileIOType::Other });
    let file = std::fs::File::open(path.as_ref())?;
    let candidates = read_candidates(file)?;
    info!(path = %path.as_ref().display(), count = candidates.len(), "loaded candidate coordinates");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let data = "x, y\n2750, 2750\n4000,3000\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();
        assert_eq!(candidates, vec![Coordinate::new(2750, 2750), Coordinate::new(4000, 3000)]);
    }

    #[test]
    fn non_numeric_rows_fail() {
        let data = "x,y\nnorth,3000\n";
        assert!(matches!(read_candidates(data.as_bytes()), Err(DatasetError::CsvError(_))));
    }
}
