//! Aggregation library: one pure reducer per chart.
//!
//! Every reducer takes a (possibly filtered) record slice and returns a flat,
//! serializable sequence. Empty input always produces a well-formed empty or
//! zeroed result, never an error.

mod distribution;
mod histogram;
mod leaderboard;
mod profile;
mod scatter;
mod trends;

pub use distribution::{
    genre_distribution, key_distribution, platform_reach, GenreCount, KeyCount, PlatformCount,
};
pub use histogram::{bpm_histogram, BpmBin, BPM_BIN_WIDTH};
pub use leaderboard::{artist_performance, top_artists, ArtistPerformance, ArtistStreams};
pub use profile::{characteristic_profile, genre_profiles, CharacteristicAvg, GenreProfile};
pub use scatter::{bpm_vs_streams, duration_vs_streams, ScatterPoint};
pub use trends::{
    latest_year, releases_by_year, streams_by_month, streams_by_year, MonthStreams, YearCount,
    YearStreams,
};

use std::collections::HashMap;

/// Bucket label for records whose grouping field is absent.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Accumulator that remembers first-seen key order, so that a later stable
/// descending sort breaks ties by input order.
pub(crate) struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> OrderedGroups<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Default,
{
    pub fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn entry(&mut self, key: K) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, V::default()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}
