//! Dataset loading: CSV file → normalized records.

use super::normalize::{normalize_rows, RawRecord};
use super::record::SongRecord;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Structural failures of the raw input. Malformed values inside individual
/// rows are not errors, they are recovered by the normalizer; these variants
/// cover input that is not usable as a row collection at all. The documented
/// recovery for callers is to fall back to the built-in sample dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset as delimited text: {0}")]
    Unreadable(#[from] csv::Error),

    #[error("dataset has no header row")]
    MissingHeader,
}

fn read_raw_rows(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    if headers.is_empty() {
        return Err(DatasetError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_owned()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Reads the CSV at `path` and normalizes every row.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<SongRecord>, DatasetError> {
    let rows = read_raw_rows(path.as_ref())?;
    let records = normalize_rows(&rows);
    info!(
        "Loaded {} songs from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}
