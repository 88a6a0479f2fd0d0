//! Time-series reducers: streams and release counts over calendar time.

use super::OrderedGroups;
use crate::dataset::SongRecord;
use chrono::Datelike;
use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct YearStreams {
    pub year: i32,
    pub streams: u64,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct MonthStreams {
    pub month: &'static str,
    pub streams: u64,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Total streams per release year, ascending by year.
pub fn streams_by_year(records: &[SongRecord]) -> Vec<YearStreams> {
    let mut groups: OrderedGroups<i32, u64> = OrderedGroups::new();
    for record in records {
        *groups.entry(record.released.year()) += record.streams;
    }
    let mut series: Vec<YearStreams> = groups
        .into_entries()
        .into_iter()
        .map(|(year, streams)| YearStreams { year, streams })
        .collect();
    series.sort_by_key(|entry| entry.year);
    series
}

/// Songs released per year, ascending by year.
pub fn releases_by_year(records: &[SongRecord]) -> Vec<YearCount> {
    let mut groups: OrderedGroups<i32, usize> = OrderedGroups::new();
    for record in records {
        *groups.entry(record.released.year()) += 1;
    }
    let mut series: Vec<YearCount> = groups
        .into_entries()
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();
    series.sort_by_key(|entry| entry.year);
    series
}

/// Total streams per month of `year`, always twelve entries Jan through Dec,
/// zero for months with no releases.
pub fn streams_by_month(records: &[SongRecord], year: i32) -> Vec<MonthStreams> {
    let mut totals = [0u64; 12];
    for record in records {
        if record.released.year() == year {
            totals[record.released.month0() as usize] += record.streams;
        }
    }
    MONTH_LABELS
        .into_iter()
        .zip(totals)
        .map(|(month, streams)| MonthStreams { month, streams })
        .collect()
}

/// The most recent release year in the subset, if any.
pub fn latest_year(records: &[SongRecord]) -> Option<i32> {
    records.iter().map(|record| record.released.year()).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;

    #[test]
    fn sums_streams_per_year_ascending() {
        let series = streams_by_year(&sample_dataset());
        let years: Vec<i32> = series.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        assert_eq!(series[0].streams, 800_000);
    }

    #[test]
    fn records_with_fallback_dates_group_under_1970() {
        let mut records = sample_dataset();
        records[0].released = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        records[1].released = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let series = streams_by_year(&records);
        assert_eq!(series[0].year, 1970);
        assert_eq!(series[0].streams, 1_800_000);
    }

    #[test]
    fn counts_releases_per_year() {
        let series = releases_by_year(&sample_dataset());
        assert!(series.iter().all(|entry| entry.count == 1));
    }

    #[test]
    fn month_series_always_has_twelve_entries() {
        let records = sample_dataset();
        let series = streams_by_month(&records, 2021);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "Jan");
        assert_eq!(series[0].streams, 1_000_000);
        assert!(series[1..].iter().all(|entry| entry.streams == 0));
    }

    #[test]
    fn month_series_for_absent_year_is_zeroed() {
        let series = streams_by_month(&sample_dataset(), 1999);
        assert_eq!(series.len(), 12);
        assert!(series.iter().all(|entry| entry.streams == 0));
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(streams_by_year(&[]).is_empty());
        assert!(releases_by_year(&[]).is_empty());
        assert_eq!(streams_by_month(&[], 2023).len(), 12);
        assert_eq!(latest_year(&[]), None);
    }

    #[test]
    fn latest_year_picks_the_maximum() {
        assert_eq!(latest_year(&sample_dataset()), Some(2022));
    }
}
