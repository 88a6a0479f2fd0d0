//! Built-in sample dataset, served when the real CSV cannot be loaded so the
//! API always has something to answer with.

use super::record::{PlatformPresence, SongRecord};
use chrono::NaiveDate;

struct SampleSong {
    track_name: &'static str,
    artist_names: &'static str,
    genre: &'static str,
    key: &'static str,
    streams: u64,
    duration_ms: u64,
    bpm: u32,
    released: (i32, u32, u32),
    characteristics: [f64; 7],
}

const SAMPLE_SONGS: [SampleSong; 3] = [
    SampleSong {
        track_name: "Song 1",
        artist_names: "Artist 1",
        genre: "Pop",
        key: "C#",
        streams: 1_000_000,
        duration_ms: 180_000,
        bpm: 120,
        released: (2021, 1, 1),
        characteristics: [80.0, 65.0, 75.0, 20.0, 5.0, 15.0, 10.0],
    },
    SampleSong {
        track_name: "Song 2",
        artist_names: "Artist 2",
        genre: "Rock",
        key: "E",
        streams: 800_000,
        duration_ms: 210_000,
        bpm: 140,
        released: (2020, 6, 15),
        characteristics: [70.0, 55.0, 85.0, 30.0, 10.0, 20.0, 5.0],
    },
    SampleSong {
        track_name: "Song 3",
        artist_names: "Artist 3",
        genre: "Hip Hop",
        key: "G",
        streams: 1_200_000,
        duration_ms: 195_000,
        bpm: 95,
        released: (2022, 3, 10),
        characteristics: [90.0, 75.0, 80.0, 10.0, 2.0, 25.0, 20.0],
    },
];

/// Three hand-written songs covering distinct genres, years and tempos.
pub fn sample_dataset() -> Vec<SongRecord> {
    SAMPLE_SONGS
        .iter()
        .map(|song| {
            let (year, month, day) = song.released;
            let [danceability, valence, energy, acousticness, instrumentalness, liveness, speechiness] =
                song.characteristics;
            SongRecord {
                track_name: song.track_name.to_owned(),
                artist_names: song.artist_names.to_owned(),
                genre: Some(song.genre.to_owned()),
                key: Some(song.key.to_owned()),
                streams: song.streams,
                duration_ms: song.duration_ms,
                bpm: song.bpm,
                released: NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
                danceability,
                valence,
                energy,
                acousticness,
                instrumentalness,
                liveness,
                speechiness,
                presence: PlatformPresence::default(),
            }
        })
        .collect()
}
