//! Row normalization: untyped CSV rows into [`SongRecord`]s.
//!
//! Every downstream reducer performs unguarded arithmetic, so coercion here
//! never lets a non-number through: a missing or garbled field becomes zero
//! and an unbuildable release date falls back to the epoch. Cardinality and
//! order are preserved, one record out per row in.

use super::record::{AudioCharacteristic, PlatformPresence, SongRecord};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::HashMap;

/// One CSV row keyed by header name, exactly as the reader produced it.
pub type RawRecord = HashMap<String, String>;

fn field<'a>(row: &'a RawRecord, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|key| {
        let value = row.get(*key)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

/// Base-10 integer coercion. Tolerates thousands-group commas ("1,234,567"),
/// anything else unparseable becomes zero.
fn coerce_u64(row: &RawRecord, candidates: &[&str]) -> u64 {
    field(row, candidates)
        .map(|v| v.replace(',', ""))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn coerce_i32(row: &RawRecord, candidates: &[&str]) -> i32 {
    field(row, candidates)
        .map(|v| v.replace(',', ""))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn coerce_f64(row: &RawRecord, candidates: &[&str]) -> f64 {
    field(row, candidates)
        .map(|v| v.replace(',', ""))
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Resolves the naming variants of a percentage column: the real dataset
/// suffixes with "_%", the sample data with "_", older exports with neither.
fn coerce_percentage(row: &RawRecord, stem: &str) -> f64 {
    let suffixed = format!("{stem}_%");
    let underscored = format!("{stem}_");
    coerce_f64(row, &[&suffixed, &underscored, stem])
}

/// Builds the composite release date from year/month/day columns.
///
/// An unparseable year is sentinelled to the epoch so that year extraction
/// downstream cannot fail. Out-of-range month or day components degrade a
/// step at a time instead of invalidating the whole date.
fn build_release_date(year: i32, month: u32, day: u32) -> NaiveDate {
    if year <= 0 {
        return NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}

/// Normalizes a single raw row. Never fails: malformed fields are recovered
/// locally per the coercion rules above.
pub fn normalize_row(row: &RawRecord) -> SongRecord {
    let year = coerce_i32(row, &["released_year"]);
    let month = coerce_u64(row, &["released_month"]) as u32;
    let day = coerce_u64(row, &["released_day"]) as u32;

    SongRecord {
        track_name: field(row, &["track_name"]).unwrap_or_default().to_owned(),
        artist_names: field(row, &["artist(s)_name", "artist_name"])
            .unwrap_or_default()
            .to_owned(),
        genre: field(row, &["genre"]).map(str::to_owned),
        key: field(row, &["key"]).map(str::to_owned),
        streams: coerce_u64(row, &["streams"]),
        duration_ms: coerce_u64(row, &["duration_ms"]),
        bpm: coerce_u64(row, &["bpm"]) as u32,
        released: build_release_date(year, month, day),
        danceability: coerce_percentage(row, AudioCharacteristic::Danceability.field_stem()),
        valence: coerce_percentage(row, AudioCharacteristic::Valence.field_stem()),
        energy: coerce_percentage(row, AudioCharacteristic::Energy.field_stem()),
        acousticness: coerce_percentage(row, AudioCharacteristic::Acousticness.field_stem()),
        instrumentalness: coerce_percentage(
            row,
            AudioCharacteristic::Instrumentalness.field_stem(),
        ),
        liveness: coerce_percentage(row, AudioCharacteristic::Liveness.field_stem()),
        speechiness: coerce_percentage(row, AudioCharacteristic::Speechiness.field_stem()),
        presence: PlatformPresence {
            spotify_playlists: coerce_u64(row, &["in_spotify_playlists"]),
            spotify_charts: coerce_u64(row, &["in_spotify_charts"]),
            apple_playlists: coerce_u64(row, &["in_apple_playlists"]),
            apple_charts: coerce_u64(row, &["in_apple_charts"]),
            deezer_playlists: coerce_u64(row, &["in_deezer_playlists"]),
            deezer_charts: coerce_u64(row, &["in_deezer_charts"]),
            shazam_charts: coerce_u64(row, &["in_shazam_charts"]),
        },
    }
}

/// Normalizes every row, same cardinality and order as the input.
pub fn normalize_rows(rows: &[RawRecord]) -> Vec<SongRecord> {
    rows.par_iter().map(normalize_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn preserves_cardinality_and_order() {
        let rows = vec![
            raw(&[("track_name", "a")]),
            raw(&[("track_name", "b")]),
            raw(&[("track_name", "c")]),
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 3);
        let names: Vec<&str> = records.iter().map(|r| r.track_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn garbled_numerics_become_zero() {
        let row = raw(&[
            ("streams", "not a number"),
            ("duration_ms", ""),
            ("bpm", "NaN"),
        ]);
        let record = normalize_row(&row);
        assert_eq!(record.streams, 0);
        assert_eq!(record.duration_ms, 0);
        assert_eq!(record.bpm, 0);
    }

    #[test]
    fn strips_thousands_group_commas() {
        let row = raw(&[("streams", "1,234,567")]);
        assert_eq!(normalize_row(&row).streams, 1_234_567);
    }

    #[test]
    fn resolves_percentage_suffix_variants() {
        let suffixed = raw(&[("danceability_%", "80")]);
        let underscored = raw(&[("danceability_", "70")]);
        let bare = raw(&[("danceability", "60")]);
        assert_eq!(normalize_row(&suffixed).danceability, 80.0);
        assert_eq!(normalize_row(&underscored).danceability, 70.0);
        assert_eq!(normalize_row(&bare).danceability, 60.0);
    }

    #[test]
    fn every_characteristic_is_finite() {
        let row = raw(&[("valence_%", "inf"), ("energy_%", "oops")]);
        let record = normalize_row(&row);
        for characteristic in AudioCharacteristic::ALL {
            assert!(record.characteristic(characteristic).is_finite());
        }
    }

    #[test]
    fn builds_release_date_from_parts() {
        let row = raw(&[
            ("released_year", "2021"),
            ("released_month", "6"),
            ("released_day", "15"),
        ]);
        let record = normalize_row(&row);
        assert_eq!(record.released, NaiveDate::from_ymd_opt(2021, 6, 15).unwrap());
    }

    #[test]
    fn unparseable_year_falls_back_to_epoch() {
        let row = raw(&[("released_year", "twenty-one")]);
        let record = normalize_row(&row);
        assert_eq!(record.released, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn out_of_range_date_components_degrade_gradually() {
        let bad_day = raw(&[
            ("released_year", "2020"),
            ("released_month", "2"),
            ("released_day", "31"),
        ]);
        assert_eq!(
            normalize_row(&bad_day).released,
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()
        );

        let bad_month = raw(&[("released_year", "2020"), ("released_month", "13")]);
        assert_eq!(
            normalize_row(&bad_month).released,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn missing_genre_is_none() {
        let record = normalize_row(&raw(&[("genre", "")]));
        assert_eq!(record.genre, None);
    }

    #[test]
    fn multi_artist_credit_stays_joined() {
        let row = raw(&[("artist(s)_name", "Latto, Jung Kook")]);
        let record = normalize_row(&row);
        assert_eq!(record.artist_names, "Latto, Jung Kook");
        assert_eq!(record.split_artists(), vec!["Latto", "Jung Kook"]);
    }
}
