//! Ranked, truncated leaderboards keyed by artist.

use super::{OrderedGroups, UNKNOWN_LABEL};
use crate::dataset::SongRecord;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ArtistStreams {
    pub name: String,
    pub streams: f64,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ArtistPerformance {
    pub artist: String,
    pub total_streams: u64,
    pub avg_danceability: f64,
    pub song_count: usize,
}

const PERFORMANCE_TOP_N: usize = 20;

/// Top `count` artists by total streams. A collaboration's streams are
/// apportioned equally across its co-artists, a song by two artists with
/// 100 streams credits 50 to each, so collaborations are never
/// double-counted. Ties keep first-seen order.
pub fn top_artists(records: &[SongRecord], count: usize) -> Vec<ArtistStreams> {
    let mut groups: OrderedGroups<String, f64> = OrderedGroups::new();
    for record in records {
        let artists = record.split_artists();
        if artists.is_empty() {
            *groups.entry(UNKNOWN_LABEL.to_owned()) += record.streams as f64;
            continue;
        }
        let share = record.streams as f64 / artists.len() as f64;
        for artist in artists {
            *groups.entry(artist.to_owned()) += share;
        }
    }

    let mut leaderboard: Vec<ArtistStreams> = groups
        .into_entries()
        .into_iter()
        .map(|(name, streams)| ArtistStreams { name, streams })
        .collect();
    leaderboard.sort_by(|a, b| {
        b.streams
            .partial_cmp(&a.streams)
            .unwrap_or(Ordering::Equal)
    });
    leaderboard.truncate(count);
    leaderboard
}

#[derive(Default)]
struct PerformanceAcc {
    total_streams: u64,
    danceability_sum: f64,
    song_count: usize,
}

/// Per-artist totals with average danceability, top 20 by streams. Grouped on
/// the joined artist credit, so a collaboration ranks as its own entry.
pub fn artist_performance(records: &[SongRecord]) -> Vec<ArtistPerformance> {
    let mut groups: OrderedGroups<String, PerformanceAcc> = OrderedGroups::new();
    for record in records {
        let key = if record.artist_names.is_empty() {
            UNKNOWN_LABEL.to_owned()
        } else {
            record.artist_names.clone()
        };
        let acc = groups.entry(key);
        acc.total_streams += record.streams;
        acc.danceability_sum += record.danceability;
        acc.song_count += 1;
    }

    let mut performance: Vec<ArtistPerformance> = groups
        .into_entries()
        .into_iter()
        .map(|(artist, acc)| ArtistPerformance {
            artist,
            total_streams: acc.total_streams,
            // song_count is at least one for every emitted group
            avg_danceability: acc.danceability_sum / acc.song_count as f64,
            song_count: acc.song_count,
        })
        .collect();
    performance.sort_by(|a, b| b.total_streams.cmp(&a.total_streams));
    performance.truncate(PERFORMANCE_TOP_N);
    performance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    fn song(artists: &str, streams: u64) -> SongRecord {
        let mut record = sample_dataset()[0].clone();
        record.artist_names = artists.to_owned();
        record.streams = streams;
        record
    }

    #[test]
    fn apportions_collaboration_streams_equally() {
        let records = vec![song("A, B", 100)];
        let leaderboard = top_artists(&records, 10);
        assert_eq!(leaderboard.len(), 2);
        assert_eq!(leaderboard[0].streams, 50.0);
        assert_eq!(leaderboard[1].streams, 50.0);
    }

    #[test]
    fn truncates_to_requested_count_sorted_descending() {
        let records = vec![
            song("A", 10),
            song("B", 30),
            song("C", 20),
            song("D", 40),
        ];
        let leaderboard = top_artists(&records, 3);
        assert_eq!(leaderboard.len(), 3);
        let names: Vec<&str> = leaderboard.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "C"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![song("X", 100), song("Y", 100)];
        let leaderboard = top_artists(&records, 2);
        let names: Vec<&str> = leaderboard.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn missing_artist_buckets_under_unknown() {
        let records = vec![song("", 500)];
        let leaderboard = top_artists(&records, 10);
        assert_eq!(leaderboard[0].name, UNKNOWN_LABEL);
        assert_eq!(leaderboard[0].streams, 500.0);
    }

    #[test]
    fn accumulates_shares_for_repeat_artists() {
        let records = vec![song("A, B", 100), song("A", 70)];
        let leaderboard = top_artists(&records, 10);
        assert_eq!(leaderboard[0].name, "A");
        assert_eq!(leaderboard[0].streams, 120.0);
    }

    #[test]
    fn performance_averages_danceability_per_group() {
        let mut first = song("A", 100);
        first.danceability = 80.0;
        let mut second = song("A", 200);
        second.danceability = 60.0;
        let performance = artist_performance(&[first, second]);
        assert_eq!(performance.len(), 1);
        assert_eq!(performance[0].total_streams, 300);
        assert_eq!(performance[0].avg_danceability, 70.0);
        assert_eq!(performance[0].song_count, 2);
    }

    #[test]
    fn empty_input_yields_empty_leaderboards() {
        assert!(top_artists(&[], 10).is_empty());
        assert!(artist_performance(&[]).is_empty());
    }
}
