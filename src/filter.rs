//! Filter predicate engine: a [`FilterSpec`] applied over the record
//! collection before any aggregation runs.

use crate::dataset::SongRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel meaning "no genre constraint".
pub const ALL_GENRES: &str = "All Genres";

/// Sentinel meaning "no artist constraint".
pub const ALL_ARTISTS: &str = "All Artists";

fn all_genres() -> String {
    ALL_GENRES.to_owned()
}

fn all_artists() -> String {
    ALL_ARTISTS.to_owned()
}

/// Query strings send unset date bounds as empty strings, treat those as None.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The user-selected constraints. Immutable per filtering pass, replaced
/// wholesale on each interaction; the core only ever reads it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    #[serde(default = "all_genres")]
    pub genre: String,

    #[serde(default = "all_artists")]
    pub artist: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            genre: all_genres(),
            artist: all_artists(),
            start_date: None,
            end_date: None,
        }
    }
}

impl FilterSpec {
    /// Whether `record` satisfies all four predicates.
    ///
    /// Genre and artist match exactly and case-sensitively; a record with no
    /// genre never matches a concrete genre selection. The artist predicate
    /// compares against the full joined credit string, so a collaboration
    /// matches only its exact joined form, not any single co-artist.
    /// Both date bounds are inclusive.
    pub fn matches(&self, record: &SongRecord) -> bool {
        let meets_genre =
            self.genre == ALL_GENRES || record.genre.as_deref() == Some(self.genre.as_str());
        let meets_artist = self.artist == ALL_ARTISTS || record.artist_names == self.artist;
        let meets_start = self
            .start_date
            .map_or(true, |start| record.released >= start);
        let meets_end = self.end_date.map_or(true, |end| record.released <= end);

        meets_genre && meets_artist && meets_start && meets_end
    }
}

/// Returns the records matching `spec`, input order preserved.
pub fn apply(records: &[SongRecord], spec: &FilterSpec) -> Vec<SongRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    fn spec(genre: &str, artist: &str) -> FilterSpec {
        FilterSpec {
            genre: genre.to_owned(),
            artist: artist.to_owned(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn sentinel_spec_is_the_identity_filter() {
        let records = sample_dataset();
        let filtered = apply(&records, &FilterSpec::default());
        assert_eq!(filtered, records);
    }

    #[test]
    fn genre_selection_keeps_only_matching_records() {
        let records = sample_dataset();
        let filtered = apply(&records, &spec("Rock", ALL_ARTISTS));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].genre.as_deref(), Some("Rock"));
    }

    #[test]
    fn null_genre_never_matches_a_concrete_selection() {
        let mut records = sample_dataset();
        records[0].genre = None;
        let filtered = apply(&records, &spec("Pop", ALL_ARTISTS));
        assert!(filtered.is_empty());
    }

    #[test]
    fn artist_match_is_against_the_joined_credit() {
        let mut records = sample_dataset();
        records[0].artist_names = "Artist 1, Artist 2".to_owned();

        // A constituent co-artist does not match on its own.
        let by_constituent = apply(&records, &spec(ALL_GENRES, "Artist 1"));
        assert!(by_constituent.is_empty());

        let by_credit = apply(&records, &spec(ALL_GENRES, "Artist 1, Artist 2"));
        assert_eq!(by_credit.len(), 1);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = sample_dataset();
        let spec = FilterSpec {
            start_date: Some("2020-06-15".parse().unwrap()),
            end_date: Some("2021-01-01".parse().unwrap()),
            ..FilterSpec::default()
        };
        let filtered = apply(&records, &spec);
        let names: Vec<&str> = filtered.iter().map(|r| r.track_name.as_str()).collect();
        assert_eq!(names, vec!["Song 1", "Song 2"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample_dataset();
        let spec = spec("Hip Hop", ALL_ARTISTS);
        let once = apply(&records, &spec);
        let twice = apply(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn deserializes_empty_date_strings_as_unbounded() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"genre":"Rock","artist":"","start_date":"","end_date":""}"#)
                .unwrap();
        assert_eq!(spec.genre, "Rock");
        assert_eq!(spec.start_date, None);
        assert_eq!(spec.end_date, None);
    }
}
