//! Bivariate scatter reducers: one point per song.

use crate::dataset::SongRecord;
use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u64,
    pub label: String,
}

/// Tempo against stream count, one point per song.
pub fn bpm_vs_streams(records: &[SongRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|record| ScatterPoint {
            x: record.bpm as f64,
            y: record.streams,
            label: record.track_name.clone(),
        })
        .collect()
}

/// Duration in minutes against stream count, one point per song.
pub fn duration_vs_streams(records: &[SongRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|record| ScatterPoint {
            x: record.duration_ms as f64 / 60_000.0,
            y: record.streams,
            label: record.track_name.clone(),
        })
        .collect()
}
