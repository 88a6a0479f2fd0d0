//! Radar-chart profiles: averaged audio characteristics.

use super::OrderedGroups;
use crate::dataset::{AudioCharacteristic, SongRecord};
use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct CharacteristicAvg {
    pub characteristic: &'static str,
    pub value: f64,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct GenreProfile {
    pub genre: String,
    pub profile: Vec<CharacteristicAvg>,
}

fn average_profile(records: &[SongRecord]) -> Vec<CharacteristicAvg> {
    AudioCharacteristic::ALL
        .into_iter()
        .map(|characteristic| {
            let value = if records.is_empty() {
                0.0
            } else {
                let sum: f64 = records
                    .iter()
                    .map(|record| record.characteristic(characteristic))
                    .sum();
                sum / records.len() as f64
            };
            CharacteristicAvg {
                characteristic: characteristic.label(),
                value,
            }
        })
        .collect()
}

/// Average of all seven characteristics over the whole subset. An empty
/// subset yields a zeroed seven-entry profile so the radar still renders.
pub fn characteristic_profile(records: &[SongRecord]) -> Vec<CharacteristicAvg> {
    average_profile(records)
}

/// One averaged profile per genre. When `genres` is given only those are
/// emitted, in the requested order; otherwise every genre of the subset, in
/// first-seen order. Records without a genre are skipped here, there is no
/// meaningful radar for an unlabelled category mix. Requested genres absent
/// from the subset are omitted rather than emitted as zeroes.
pub fn genre_profiles(records: &[SongRecord], genres: Option<&[String]>) -> Vec<GenreProfile> {
    let mut groups: OrderedGroups<String, Vec<SongRecord>> = OrderedGroups::new();
    for record in records {
        if let Some(genre) = &record.genre {
            groups.entry(genre.clone()).push(record.clone());
        }
    }
    let grouped = groups.into_entries();

    let selected: Vec<(String, Vec<SongRecord>)> = match genres {
        None => grouped,
        Some(wanted) => wanted
            .iter()
            .filter_map(|genre| {
                grouped
                    .iter()
                    .find(|(candidate, _)| candidate == genre)
                    .cloned()
            })
            .collect(),
    };

    selected
        .into_iter()
        .map(|(genre, members)| GenreProfile {
            profile: average_profile(&members),
            genre,
        })
        .collect()
}
