//! Fixed-width BPM histogram.

use super::OrderedGroups;
use crate::dataset::SongRecord;
use serde::Serialize;

/// Width of one tempo bin in BPM.
pub const BPM_BIN_WIDTH: u32 = 20;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct BpmBin {
    pub range: String,
    pub total_streams: u64,
    pub song_count: usize,
}

#[derive(Default)]
struct BinAcc {
    total_streams: u64,
    song_count: usize,
}

/// Groups songs into half-open BPM intervals of [`BPM_BIN_WIDTH`], labelled
/// like "120-140", ascending by bin start. Bins with no members are omitted.
pub fn bpm_histogram(records: &[SongRecord]) -> Vec<BpmBin> {
    let mut groups: OrderedGroups<u32, BinAcc> = OrderedGroups::new();
    for record in records {
        let bin_start = record.bpm / BPM_BIN_WIDTH * BPM_BIN_WIDTH;
        let acc = groups.entry(bin_start);
        acc.total_streams += record.streams;
        acc.song_count += 1;
    }

    let mut entries = groups.into_entries();
    entries.sort_by_key(|(bin_start, _)| *bin_start);
    entries
        .into_iter()
        .map(|(bin_start, acc)| BpmBin {
            range: format!("{}-{}", bin_start, bin_start + BPM_BIN_WIDTH),
            total_streams: acc.total_streams,
            song_count: acc.song_count,
        })
        .collect()
}
