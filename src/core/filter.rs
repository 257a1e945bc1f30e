//! Filter records by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for selecting the matching records.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Senders | [`with_senders`](FilterConfig::with_senders) | Records from the listed participants |
//!
//! # Examples
//!
//! ```
//! use chatpulse::core::filter::{FilterConfig, apply_filters};
//! use chatpulse::MessageRecord;
//! use chrono::{NaiveDate, NaiveTime};
//!
//! # fn main() -> chatpulse::Result<()> {
//! let at = |d: u32| {
//!     (
//!         NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
//!         NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
//!     )
//! };
//! let records = vec![
//!     MessageRecord::new(at(1).0, at(1).1, "Alice", "Old"),
//!     MessageRecord::new(at(15).0, at(15).1, "Alice", "New"),
//!     MessageRecord::new(at(15).0, at(15).1, "Bob", "Other"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-10")?
//!     .with_senders(["Alice"]);
//!
//! let filtered = apply_filters(&records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Both date bounds are inclusive whole days
//! - Sender matching is exact
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::error::{ChatpulseError, FilterRangeKind, Result};
use crate::message::MessageRecord;

/// Date layout accepted by the `with_date_*` builders.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for filtering records by date and sender.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only records on or after this day.
    pub start: Option<NaiveDate>,

    /// Include only records on or before this day.
    pub end: Option<NaiveDate>,

    /// Include only records from these senders. `Some(vec![])` selects nobody
    /// and fails validation.
    pub senders: Option<Vec<String>>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.start = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.end = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the start day directly.
    #[must_use]
    pub fn with_start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Sets the end day directly.
    #[must_use]
    pub fn with_end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Restricts the selection to `senders`.
    #[must_use]
    pub fn with_senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senders = Some(senders.into_iter().map(Into::into).collect());
        self
    }

    /// Checks that the filter can select anything at all.
    ///
    /// # Errors
    ///
    /// - [`FilterRangeKind::EndBeforeStart`] if `end < start`
    /// - [`FilterRangeKind::NoSenders`] if the sender list is empty
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(ChatpulseError::FilterRange(FilterRangeKind::EndBeforeStart));
            }
        }
        if self.senders.as_ref().is_some_and(Vec::is_empty) {
            return Err(ChatpulseError::FilterRange(FilterRangeKind::NoSenders));
        }
        Ok(())
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns `true` if the sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.senders.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if self.start.is_some_and(|start| record.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| record.date > end) {
            return false;
        }
        match &self.senders {
            Some(senders) => senders.iter().any(|s| *s == record.sender),
            None => true,
        }
    }
}

/// Parses a `YYYY-MM-DD` filter bound.
pub fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, FILTER_DATE_FORMAT)
        .map_err(|_| ChatpulseError::invalid_date(date_str))
}

/// Selects the records that match all active filters, keeping their order.
///
/// Does not validate `config`; call [`FilterConfig::validate`] first when the
/// bounds come from user input.
///
/// # Examples
///
/// ```
/// use chatpulse::core::filter::{FilterConfig, apply_filters};
/// use chatpulse::MessageRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let records = vec![
///     MessageRecord::new(day, noon, "Alice", "Hello"),
///     MessageRecord::new(day, noon, "Bob", "Hi"),
/// ];
///
/// let config = FilterConfig::new().with_senders(["Bob"]);
/// let filtered = apply_filters(&records, &config);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].sender, "Bob");
/// ```
pub fn apply_filters<'a>(
    records: &'a [MessageRecord],
    config: &FilterConfig,
) -> Vec<&'a MessageRecord> {
    if !config.is_active() {
        return records.iter().collect();
    }
    records.iter().filter(|r| config.matches(r)).collect()
}
