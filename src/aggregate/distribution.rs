//! Categorical share reducers: genre, musical key and platform presence.

use super::{OrderedGroups, UNKNOWN_LABEL};
use crate::dataset::SongRecord;
use serde::Serialize;

const SHARE_TOP_N: usize = 5;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct PlatformCount {
    pub platform: &'static str,
    pub count: u64,
}

/// Song counts for the five biggest genres, descending. Records without a
/// genre are bucketed under "Unknown" rather than dropped; ties keep
/// first-seen order.
pub fn genre_distribution(records: &[SongRecord]) -> Vec<GenreCount> {
    let mut groups: OrderedGroups<String, usize> = OrderedGroups::new();
    for record in records {
        let genre = record.genre.as_deref().unwrap_or(UNKNOWN_LABEL);
        *groups.entry(genre.to_owned()) += 1;
    }

    let mut counts: Vec<GenreCount> = groups
        .into_entries()
        .into_iter()
        .map(|(genre, count)| GenreCount { genre, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(SHARE_TOP_N);
    counts
}

const KEY_ORDER: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

fn key_position(key: &str) -> usize {
    KEY_ORDER
        .iter()
        .position(|k| *k == key)
        .unwrap_or(KEY_ORDER.len())
}

/// Song counts per musical key, in semitone order C through B with unknown
/// keys last. No truncation, the domain is twelve keys.
pub fn key_distribution(records: &[SongRecord]) -> Vec<KeyCount> {
    let mut groups: OrderedGroups<String, usize> = OrderedGroups::new();
    for record in records {
        let key = record.key.as_deref().unwrap_or(UNKNOWN_LABEL);
        *groups.entry(key.to_owned()) += 1;
    }

    let mut counts: Vec<KeyCount> = groups
        .into_entries()
        .into_iter()
        .map(|(key, count)| KeyCount { key, count })
        .collect();
    counts.sort_by_key(|entry| key_position(&entry.key));
    counts
}

/// Summed playlist/chart appearances per platform, top five descending.
pub fn platform_reach(records: &[SongRecord]) -> Vec<PlatformCount> {
    let mut totals: Vec<PlatformCount> = Vec::new();
    for record in records {
        for (index, (platform, count)) in record.presence.labelled().into_iter().enumerate() {
            match totals.get_mut(index) {
                Some(total) => total.count += count,
                None => totals.push(PlatformCount { platform, count }),
            }
        }
    }
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals.truncate(SHARE_TOP_N);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{sample_dataset, PlatformPresence};

    fn song(genre: Option<&str>, key: Option<&str>) -> SongRecord {
        let mut record = sample_dataset()[0].clone();
        record.genre = genre.map(str::to_owned);
        record.key = key.map(str::to_owned);
        record
    }

    #[test]
    fn counts_genres_descending_with_first_seen_tiebreak() {
        let records = vec![
            song(Some("Pop"), None),
            song(Some("Rock"), None),
            song(Some("Rock"), None),
            song(Some("Jazz"), None),
        ];
        let counts = genre_distribution(&records);
        let genres: Vec<&str> = counts.iter().map(|c| c.genre.as_str()).collect();
        assert_eq!(genres, vec!["Rock", "Pop", "Jazz"]);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn missing_genre_buckets_under_unknown() {
        let records = vec![song(None, None), song(None, None)];
        let counts = genre_distribution(&records);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].genre, UNKNOWN_LABEL);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn truncates_to_top_five_genres() {
        let records: Vec<SongRecord> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|g| song(Some(g), None))
            .collect();
        assert_eq!(genre_distribution(&records).len(), 5);
    }

    #[test]
    fn orders_keys_by_semitone_with_unknown_last() {
        let records = vec![
            song(None, Some("G")),
            song(None, None),
            song(None, Some("C#")),
            song(None, Some("C")),
        ];
        let counts = key_distribution(&records);
        let keys: Vec<&str> = counts.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["C", "C#", "G", UNKNOWN_LABEL]);
    }

    #[test]
    fn sums_platform_presence_and_keeps_top_five() {
        let mut record = sample_dataset()[0].clone();
        record.presence = PlatformPresence {
            spotify_playlists: 100,
            spotify_charts: 10,
            apple_playlists: 50,
            apple_charts: 5,
            deezer_playlists: 20,
            deezer_charts: 2,
            shazam_charts: 1,
        };
        let reach = platform_reach(&[record]);
        assert_eq!(reach.len(), 5);
        assert_eq!(reach[0].platform, "Spotify Playlists");
        assert_eq!(reach[0].count, 100);
        assert_eq!(reach[1].platform, "Apple Playlists");
    }

    #[test]
    fn empty_input_yields_empty_shares() {
        assert!(genre_distribution(&[]).is_empty());
        assert!(key_distribution(&[]).is_empty());
        assert!(platform_reach(&[]).is_empty());
    }
}
