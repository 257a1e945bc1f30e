//! Session state: the currently loaded table and analyses over it.
//!
//! A [`Session`] owns at most one parsed export. Every load replaces the
//! table wholesale; a failed load leaves the session empty.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::core::FilterConfig;
//! use chatpulse::session::Session;
//! use chatpulse::Weekday;
//!
//! let mut session = Session::default();
//! session.load_str("01/02/2021, 10:30 - Alice: hello\n01/02/2021, 10:31 - Bob: hi there\n")?;
//!
//! assert_eq!(session.senders(), ["Alice", "Bob"]);
//!
//! let analysis = session.analyze(&FilterConfig::new())?;
//! assert_eq!(analysis.message_count, 2);
//! assert_eq!(analysis.heatmap.count(Weekday::Monday, 10), 2);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use crate::config::ChatpulseConfig;
use crate::core::filter::{FilterConfig, apply_filters};
use crate::core::histogram::{self, Heatmap, Histogram};
use crate::core::stats::{UserStats, user_stats};
use crate::error::{ChatpulseError, Result};
use crate::message::{MessageRecord, Weekday};
use crate::parser::ExportFormat;
use crate::parsers::{ChatParser, ParseStats, ParsedExport};

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Records that passed the filter
    pub message_count: usize,
    /// Senders covered, in report order
    pub senders: Vec<String>,
    pub user_stats: Vec<UserStats>,
    pub heatmap: Heatmap,
    pub by_month: Histogram<NaiveDate>,
    pub by_hour: Histogram<u32>,
    pub by_weekday: Histogram<Weekday>,
    pub by_time: Histogram<NaiveTime>,
}

#[cfg(feature = "json-output")]
impl Analysis {
    /// Renders the analysis as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the analysis as pretty-printed JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

/// Owner of the current record table.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ChatpulseConfig,
    table: Option<ParsedExport>,
}

impl Session {
    pub fn new(config: ChatpulseConfig) -> Self {
        Self {
            config,
            table: None,
        }
    }

    pub fn config(&self) -> &ChatpulseConfig {
        &self.config
    }

    /// Parses `content` and makes it the current table.
    pub fn load_str(&mut self, content: &str) -> Result<ParseStats> {
        let parsed = ChatParser::with_config(self.config.parse.clone()).parse_str(content);
        self.replace(parsed)
    }

    /// Reads the export at `path` and makes it the current table.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<ParseStats> {
        let parsed = ChatParser::with_config(self.config.parse.clone()).parse(path.as_ref());
        self.replace(parsed)
    }

    fn replace(&mut self, parsed: Result<ParsedExport>) -> Result<ParseStats> {
        self.table = None;
        let export = parsed?;
        let stats = export.stats;
        self.table = Some(export);
        Ok(stats)
    }

    /// Returns `true` once a table has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The current table, empty when nothing is loaded.
    pub fn records(&self) -> &[MessageRecord] {
        self.table
            .as_ref()
            .map(|t| t.records.as_slice())
            .unwrap_or_default()
    }

    /// Format of the current table.
    pub fn format(&self) -> Option<ExportFormat> {
        self.table.as_ref().map(|t| t.format)
    }

    /// Counters of the last successful load.
    pub fn parse_stats(&self) -> Option<&ParseStats> {
        self.table.as_ref().map(|t| &t.stats)
    }

    /// Distinct message dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.records().iter().map(|r| r.date).collect();
        dates.into_iter().collect()
    }

    /// Distinct senders, ascending.
    pub fn senders(&self) -> Vec<String> {
        let senders: BTreeSet<&str> = self.records().iter().map(|r| r.sender.as_str()).collect();
        senders.into_iter().map(str::to_string).collect()
    }

    /// Filters the table and computes every aggregate.
    ///
    /// Senders are reported in the order given by the filter, or in
    /// ascending name order when the filter does not restrict senders.
    ///
    /// # Errors
    ///
    /// - [`ChatpulseError::EmptyUpload`] if no table is loaded
    /// - [`ChatpulseError::FilterRange`] if the filter cannot select anything
    pub fn analyze(&self, filter: &FilterConfig) -> Result<Analysis> {
        let table = self.table.as_ref().ok_or(ChatpulseError::EmptyUpload)?;
        filter.validate()?;

        let selected = apply_filters(&table.records, filter);
        let senders = match &filter.senders {
            Some(chosen) => {
                let mut seen = BTreeSet::new();
                chosen.iter().filter(|s| seen.insert(s.as_str())).cloned().collect()
            }
            None => self.senders(),
        };
        debug!(
            selected = selected.len(),
            senders = senders.len(),
            "analyzing selection"
        );

        Ok(Analysis {
            message_count: selected.len(),
            user_stats: user_stats(&selected, &senders, &self.config.stats),
            heatmap: histogram::heatmap(&selected),
            by_month: histogram::by_month(&selected, &senders),
            by_hour: histogram::by_hour(&selected, &senders),
            by_weekday: histogram::by_weekday(&selected, &senders),
            by_time: histogram::by_time(&selected, &senders),
            senders,
        })
    }
}
