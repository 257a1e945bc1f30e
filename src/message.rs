//! Normalized message records.
//!
//! This module provides [`MessageRecord`], one row of the table built from an
//! export, and [`Weekday`], the fixed Monday-first day ordering used by every
//! aggregate.
//!
//! # Examples
//!
//! ```
//! use chatpulse::{MessageRecord, Weekday};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let record = MessageRecord::new(
//!     NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
//!     NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
//!     "Alice",
//!     "hello 👋",
//! );
//!
//! assert_eq!(record.weekday, Weekday::Monday);
//! assert_eq!(record.hour, 10);
//! assert_eq!(record.emojis, "👋");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::emoji::extract_emojis;

/// Day of the week, declared Monday first.
///
/// The derived [`Ord`] follows declaration order, so sorting weekdays always
/// yields Monday … Sunday regardless of locale or message counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in display order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Monday = 0 … Sunday = 6.
    pub fn index(self) -> usize {
        self as usize
    }

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown weekday: '{}'", s))
    }
}

/// One message of a chat export with its derived bucket fields.
///
/// Built by the normalizer from a parsed line; the derived fields are always
/// computed from `date`, `time` and `body` by [`MessageRecord::new`], so they
/// cannot drift out of sync.
///
/// | Field | Derived from |
/// |-------|--------------|
/// | `month_bucket` | first day of `date`'s month |
/// | `hour` | `time` |
/// | `weekday` | `date` only |
/// | `emojis` | `body` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Calendar date of the message.
    pub date: NaiveDate,

    /// Time of day (minute or second granularity, depending on the export).
    pub time: NaiveTime,

    /// Participant name as written in the export.
    pub sender: String,

    /// Message text. Multi-line messages keep their line breaks.
    pub body: String,

    /// First day of the message's month, used for monthly histograms.
    pub month_bucket: NaiveDate,

    /// Hour of day, 0–23.
    pub hour: u32,

    /// Day of week.
    pub weekday: Weekday,

    /// Emoji characters found in `body`, in order of appearance.
    pub emojis: String,
}

impl MessageRecord {
    /// Builds a record and computes its derived fields.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let emojis = extract_emojis(&body);
        Self {
            date,
            time,
            sender: sender.into(),
            month_bucket: month_bucket(date),
            hour: time.hour(),
            weekday: Weekday::of(date),
            emojis,
            body,
        }
    }

    /// Number of whitespace-delimited words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// First day of the month containing `date`.
pub fn month_bucket(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
