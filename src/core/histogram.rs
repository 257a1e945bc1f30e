//! Activity histograms and the weekday × hour heatmap.
//!
//! # Example
//!
//! ```
//! use chatpulse::core::histogram::{by_hour, heatmap};
//! use chatpulse::parsers::ChatParser;
//! use chatpulse::Weekday;
//!
//! let content = "01/02/2021, 10:30 - Alice: hello\n01/02/2021, 10:31 - Bob: hi there\n";
//! let export = ChatParser::new().parse_str(content)?;
//! let records: Vec<_> = export.records.iter().collect();
//!
//! let map = heatmap(&records);
//! assert_eq!(map.count(Weekday::Monday, 10), 2);
//! assert_eq!(map.cells().len(), 1);
//!
//! let hours = by_hour(&records, &["Alice".to_string()]);
//! assert_eq!(hours.series[0].count(&10), 1);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::message::{MessageRecord, Weekday};

/// Number of hour columns in the heatmap.
pub const HOURS: usize = 24;

/// One non-empty heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub weekday: Weekday,
    pub hour: u32,
    pub count: usize,
}

/// Message counts per (weekday, hour) pair.
///
/// Only pairs that occur are stored, ordered by hour and then weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// Counts `records` by weekday and hour.
    pub fn from_records(records: &[&MessageRecord]) -> Self {
        let mut counts: BTreeMap<(u32, Weekday), usize> = BTreeMap::new();
        for record in records {
            *counts.entry((record.hour, record.weekday)).or_default() += 1;
        }

        let cells = counts
            .into_iter()
            .map(|((hour, weekday), count)| HeatmapCell {
                weekday,
                hour,
                count,
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    /// Count for one pair, 0 if it never occurs.
    pub fn count(&self, weekday: Weekday, hour: u32) -> usize {
        self.cells
            .binary_search_by_key(&(hour, weekday), |c| (c.hour, c.weekday))
            .map_or(0, |i| self.cells[i].count)
    }

    /// Dense grid with one row per weekday (Monday first) and one column per hour.
    pub fn to_matrix(&self) -> [[usize; HOURS]; 7] {
        let mut matrix = [[0; HOURS]; 7];
        for cell in &self.cells {
            matrix[cell.weekday.index()][cell.hour as usize] = cell.count;
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }
}

/// Shorthand for [`Heatmap::from_records`].
pub fn heatmap(records: &[&MessageRecord]) -> Heatmap {
    Heatmap::from_records(records)
}

/// One bar of a histogram series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
}

/// Bucket counts for one sender, in ascending key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series<K> {
    pub sender: String,
    pub buckets: Vec<Bucket<K>>,
}

impl<K: Ord> Series<K> {
    /// Count for `key`, 0 if the sender has no messages in that bucket.
    pub fn count(&self, key: &K) -> usize {
        self.buckets
            .binary_search_by(|b| b.key.cmp(key))
            .map_or(0, |i| self.buckets[i].count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// One [`Series`] per sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram<K> {
    pub series: Vec<Series<K>>,
}

impl<K: Ord> Histogram<K> {
    /// Series of `sender`, if present.
    pub fn get(&self, sender: &str) -> Option<&Series<K>> {
        self.series.iter().find(|s| s.sender == sender)
    }
}

/// Buckets each sender's records by `key`.
///
/// Series follow the order of `senders`; a sender without records gets an
/// empty series.
pub fn histogram<K, F>(records: &[&MessageRecord], senders: &[String], key: F) -> Histogram<K>
where
    K: Ord + Copy,
    F: Fn(&MessageRecord) -> K,
{
    let mut per_sender: BTreeMap<&str, BTreeMap<K, usize>> = senders
        .iter()
        .map(|s| (s.as_str(), BTreeMap::new()))
        .collect();

    for record in records {
        if let Some(counts) = per_sender.get_mut(record.sender.as_str()) {
            *counts.entry(key(record)).or_default() += 1;
        }
    }

    let series = senders
        .iter()
        .map(|sender| Series {
            sender: sender.clone(),
            buckets: per_sender
                .remove(sender.as_str())
                .unwrap_or_default()
                .into_iter()
                .map(|(key, count)| Bucket { key, count })
                .collect(),
        })
        .collect();

    Histogram { series }
}

/// Messages per sender per month, keyed by the first day of the month.
pub fn by_month(records: &[&MessageRecord], senders: &[String]) -> Histogram<NaiveDate> {
    histogram(records, senders, |r| r.month_bucket)
}

/// Messages per sender per hour of day.
pub fn by_hour(records: &[&MessageRecord], senders: &[String]) -> Histogram<u32> {
    histogram(records, senders, |r| r.hour)
}

/// Messages per sender per weekday, Monday first.
pub fn by_weekday(records: &[&MessageRecord], senders: &[String]) -> Histogram<Weekday> {
    histogram(records, senders, |r| r.weekday)
}

/// Messages per sender per minute of the day.
pub fn by_time(records: &[&MessageRecord], senders: &[String]) -> Histogram<NaiveTime> {
    histogram(records, senders, |r| {
        r.time.with_second(0).unwrap_or(r.time)
    })
}
