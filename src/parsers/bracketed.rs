//! Parser for the bracketed (iOS) export layout.
//!
//! ```text
//! [01/02/21, 10:30:15] Alice: hello
//! ```
//!
//! iOS exports may prefix lines and attachment bodies with a left-to-right
//! mark (U+200E); it is tolerated before the bracket and stripped from the
//! end of the body.

use std::sync::LazyLock;

use regex::Regex;

use super::{captures_to_record, clean_body};
use crate::parser::{ExportFormat, RawRecord, RecordParser};
use crate::tokenizer::LogicalLine;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ExportFormat::Bracketed.record_pattern()).expect("bracketed record pattern is valid")
});

/// Record parser for `[DD/MM/YY, HH:MM:SS] Sender: Message` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedParser;

impl BracketedParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for BracketedParser {
    fn name(&self) -> &'static str {
        "Bracketed"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Bracketed
    }

    fn parse_line(&self, line: &LogicalLine) -> Option<RawRecord> {
        let caps = RECORD.captures(&line.text)?;
        let mut record = captures_to_record(&caps, line.line_number)?;
        record.body = clean_body(&record.body).to_string();
        Some(record)
    }
}
