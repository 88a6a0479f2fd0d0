use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The seven audio characteristics, each a percentage nominally in [0, 100].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AudioCharacteristic {
    Danceability,
    Valence,
    Energy,
    Acousticness,
    Instrumentalness,
    Liveness,
    Speechiness,
}

impl AudioCharacteristic {
    pub const ALL: [AudioCharacteristic; 7] = [
        AudioCharacteristic::Danceability,
        AudioCharacteristic::Valence,
        AudioCharacteristic::Energy,
        AudioCharacteristic::Acousticness,
        AudioCharacteristic::Instrumentalness,
        AudioCharacteristic::Liveness,
        AudioCharacteristic::Speechiness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AudioCharacteristic::Danceability => "Danceability",
            AudioCharacteristic::Valence => "Valence",
            AudioCharacteristic::Energy => "Energy",
            AudioCharacteristic::Acousticness => "Acousticness",
            AudioCharacteristic::Instrumentalness => "Instrumentalness",
            AudioCharacteristic::Liveness => "Liveness",
            AudioCharacteristic::Speechiness => "Speechiness",
        }
    }

    /// The column name stem in the source schema, without the percent suffix.
    pub fn field_stem(&self) -> &'static str {
        match self {
            AudioCharacteristic::Danceability => "danceability",
            AudioCharacteristic::Valence => "valence",
            AudioCharacteristic::Energy => "energy",
            AudioCharacteristic::Acousticness => "acousticness",
            AudioCharacteristic::Instrumentalness => "instrumentalness",
            AudioCharacteristic::Liveness => "liveness",
            AudioCharacteristic::Speechiness => "speechiness",
        }
    }
}

/// Playlist and chart appearance counts per streaming platform.
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PlatformPresence {
    pub spotify_playlists: u64,
    pub spotify_charts: u64,
    pub apple_playlists: u64,
    pub apple_charts: u64,
    pub deezer_playlists: u64,
    pub deezer_charts: u64,
    pub shazam_charts: u64,
}

impl PlatformPresence {
    /// Presence counts paired with a display label, in schema order.
    pub fn labelled(&self) -> [(&'static str, u64); 7] {
        [
            ("Spotify Playlists", self.spotify_playlists),
            ("Spotify Charts", self.spotify_charts),
            ("Apple Playlists", self.apple_playlists),
            ("Apple Charts", self.apple_charts),
            ("Deezer Playlists", self.deezer_playlists),
            ("Deezer Charts", self.deezer_charts),
            ("Shazam Charts", self.shazam_charts),
        ]
    }
}

/// One song, fully coerced and typed. Every numeric field is finite; a field
/// that could not be parsed from the source row holds zero. Multiple artists
/// stay joined with ", " at this layer, reducers split when they need
/// per-artist attribution.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SongRecord {
    pub track_name: String,
    pub artist_names: String,
    pub genre: Option<String>,
    pub key: Option<String>,
    pub streams: u64,
    pub duration_ms: u64,
    pub bpm: u32,
    pub released: NaiveDate,
    pub danceability: f64,
    pub valence: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub presence: PlatformPresence,
}

impl SongRecord {
    pub fn characteristic(&self, which: AudioCharacteristic) -> f64 {
        match which {
            AudioCharacteristic::Danceability => self.danceability,
            AudioCharacteristic::Valence => self.valence,
            AudioCharacteristic::Energy => self.energy,
            AudioCharacteristic::Acousticness => self.acousticness,
            AudioCharacteristic::Instrumentalness => self.instrumentalness,
            AudioCharacteristic::Liveness => self.liveness,
            AudioCharacteristic::Speechiness => self.speechiness,
        }
    }

    /// Co-artists of the joined credit string, in credit order.
    pub fn split_artists(&self) -> Vec<&str> {
        self.artist_names
            .split(", ")
            .filter(|s| !s.is_empty())
            .collect()
    }
}
