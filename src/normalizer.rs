//! Converts raw string fields into typed [`MessageRecord`]s.
//!
//! ```
//! use chatpulse::normalizer::normalize;
//! use chatpulse::parser::{ExportFormat, RawRecord};
//! use chatpulse::Weekday;
//!
//! let raw = RawRecord {
//!     line_number: 1,
//!     date: "01/02/2021".into(),
//!     time: "10:30".into(),
//!     sender: "Alice".into(),
//!     body: "hello 👋".into(),
//! };
//! let record = normalize(raw, ExportFormat::Legacy).unwrap();
//! assert_eq!(record.weekday, Weekday::Monday);
//! assert_eq!(record.hour, 10);
//! assert_eq!(record.emojis, "👋");
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{ChatpulseError, Result};
use crate::message::MessageRecord;
use crate::parser::{ExportFormat, RawRecord};

/// Parses a date field, trying each of the format's date layouts in turn.
///
/// `line` is only used for error reporting.
pub fn parse_date(input: &str, format: ExportFormat, line: usize) -> Result<NaiveDate> {
    format
        .date_formats()
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ChatpulseError::date_parse(line, input))
}

/// Parses a time field, accepting both `HH:MM` and `HH:MM:SS`.
pub fn parse_time(input: &str, format: ExportFormat, line: usize) -> Result<NaiveTime> {
    format
        .time_formats()
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ChatpulseError::time_parse(line, input))
}

/// Builds a [`MessageRecord`] with all derived fields from `raw`.
///
/// # Errors
///
/// Returns [`ChatpulseError::DateParse`] or [`ChatpulseError::TimeParse`]
/// carrying the header line number when a field does not parse.
pub fn normalize(raw: RawRecord, format: ExportFormat) -> Result<MessageRecord> {
    let date = parse_date(&raw.date, format, raw.line_number)?;
    let time = parse_time(&raw.time, format, raw.line_number)?;
    Ok(MessageRecord::new(date, time, raw.sender, raw.body))
}

/// Returns `true` if the record is an omitted-attachment placeholder.
pub fn is_media_placeholder(record: &MessageRecord, placeholder: &str) -> bool {
    record.body.trim() == placeholder
}

/// Replaces every sender with `User N`, numbering distinct senders in
/// ascending name order starting at 1.
pub fn anonymize(records: &mut [MessageRecord]) {
    let mut aliases: BTreeMap<String, String> = records
        .iter()
        .map(|r| (r.sender.clone(), String::new()))
        .collect();

    for (i, alias) in aliases.values_mut().enumerate() {
        *alias = format!("User {}", i + 1);
    }

    for record in records.iter_mut() {
        if let Some(alias) = aliases.get(&record.sender) {
            record.sender.clone_from(alias);
        }
    }
}
