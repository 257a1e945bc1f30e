//! Parser for the legacy (Android) export layout.
//!
//! ```text
//! 01/02/2021, 10:30 - Alice: hello
//! ```
//!
//! Date is the first 10 characters, time the next `HH:MM`, the sender runs
//! from after `" - "` to the first `:` and the body is everything after
//! `": "`.

use std::sync::LazyLock;

use regex::Regex;

use super::{captures_to_record, clean_body};
use crate::parser::{ExportFormat, RawRecord, RecordParser};
use crate::tokenizer::LogicalLine;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ExportFormat::Legacy.record_pattern()).expect("legacy record pattern is valid")
});

/// Record parser for `DD/MM/YYYY, HH:MM - Sender: Message` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyParser;

impl LegacyParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for LegacyParser {
    fn name(&self) -> &'static str {
        "Legacy"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Legacy
    }

    fn parse_line(&self, line: &LogicalLine) -> Option<RawRecord> {
        let caps = RECORD.captures(&line.text)?;
        let mut record = captures_to_record(&caps, line.line_number)?;
        record.body = clean_body(&record.body).to_string();
        Some(record)
    }
}
