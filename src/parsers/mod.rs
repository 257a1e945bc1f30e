//! Record parsers and the export parsing pipeline.
//!
//! - [`LegacyParser`] - `DD/MM/YYYY, HH:MM - Sender: Message`
//! - [`BracketedParser`] - `[DD/MM/YY, HH:MM:SS] Sender: Message`
//! - [`ChatParser`] - detect, tokenize, parse and normalize a whole export
//!
//! # Example
//!
//! ```rust
//! use chatpulse::parsers::ChatParser;
//!
//! let content = "01/02/2021, 10:30 - Alice: hello\n01/02/2021, 10:31 - Bob: hi there\n";
//! let export = ChatParser::new().parse_str(content)?;
//!
//! assert_eq!(export.records.len(), 2);
//! assert_eq!(export.stats.header_lines, 2);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

mod bracketed;
mod legacy;

pub use bracketed::BracketedParser;
pub use legacy::LegacyParser;

use std::fs;
use std::path::Path;

use regex::Captures;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ParseConfig;
use crate::error::{ChatpulseError, Result};
use crate::message::MessageRecord;
use crate::normalizer;
use crate::parser::{ExportFormat, RawRecord, create_parser, detect_format_in};
use crate::tokenizer::tokenize;

/// Builds a [`RawRecord`] from the four capture groups of a record pattern.
///
/// Returns `None` when the sender is blank.
fn captures_to_record(caps: &Captures<'_>, line_number: usize) -> Option<RawRecord> {
    let sender = caps.get(3)?.as_str().trim();
    if sender.is_empty() {
        return None;
    }
    Some(RawRecord {
        line_number,
        date: caps.get(1)?.as_str().to_string(),
        time: caps.get(2)?.as_str().to_string(),
        sender: sender.to_string(),
        body: caps.get(4).map_or("", |m| m.as_str()).to_string(),
    })
}

/// Strips trailing line terminators and left-to-right marks from a body.
fn clean_body(body: &str) -> &str {
    body.trim_end_matches(['\r', '\n', '\u{200E}'])
}

/// Counters collected while loading one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub format: ExportFormat,
    pub header_lines: usize,
    pub continuation_lines: usize,
    /// Lines before the first message header
    pub orphan_lines: usize,
    /// Encryption notices and sender-less events
    pub system_lines: usize,
    /// Logical lines the record parser rejected
    pub malformed_lines: usize,
    /// Records dropped by the media filter
    pub media_dropped: usize,
    /// Records in the final table
    pub records: usize,
}

/// A parsed export: the record table plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    pub format: ExportFormat,
    pub records: Vec<MessageRecord>,
    pub stats: ParseStats,
}

/// Turns exported text into a table of [`MessageRecord`]s.
///
/// # Example
///
/// ```rust,no_run
/// use chatpulse::config::ParseConfig;
/// use chatpulse::parsers::ChatParser;
///
/// let parser = ChatParser::with_config(ParseConfig::new().with_skip_media(true));
/// let export = parser.parse("chat.txt".as_ref())?;
/// println!("{} messages", export.records.len());
/// # Ok::<(), chatpulse::ChatpulseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParseConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Reads and parses the export at `path`.
    ///
    /// Timestamp errors carry `path` so the message points at the file.
    pub fn parse(&self, path: &Path) -> Result<ParsedExport> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content).map_err(|e| e.with_path(path))
    }

    /// Parses export content held in memory.
    ///
    /// # Errors
    ///
    /// - [`ChatpulseError::EmptyUpload`] if no format can be detected or no
    ///   message survives parsing
    /// - [`ChatpulseError::MalformedLine`] on the first unparsable message
    ///   when `skip_invalid` is off
    /// - [`ChatpulseError::DateParse`] / [`ChatpulseError::TimeParse`] on a
    ///   bad timestamp
    pub fn parse_str(&self, content: &str) -> Result<ParsedExport> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

        let format = match self.config.format {
            Some(forced) => forced,
            None => detect_format_in(content).ok_or(ChatpulseError::EmptyUpload)?,
        };
        debug!(%format, forced = self.config.format.is_some(), "export format");

        let tokens = tokenize(content, format);
        let parser = create_parser(format);

        let mut malformed_lines = 0;
        let mut media_dropped = 0;
        let mut records = Vec::with_capacity(tokens.lines.len());

        for line in &tokens.lines {
            let Some(raw) = parser.parse_line(line) else {
                if !self.config.skip_invalid {
                    return Err(ChatpulseError::malformed_line(line.line_number, &line.text));
                }
                debug!(line = line.line_number, parser = parser.name(), "skipping malformed line");
                malformed_lines += 1;
                continue;
            };

            let record = normalizer::normalize(raw, format)?;
            if self.config.skip_media
                && normalizer::is_media_placeholder(&record, &self.config.media_placeholder)
            {
                media_dropped += 1;
                continue;
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ChatpulseError::EmptyUpload);
        }

        if self.config.anonymize {
            normalizer::anonymize(&mut records);
        }

        let stats = ParseStats {
            format,
            header_lines: tokens.header_lines,
            continuation_lines: tokens.continuation_lines,
            orphan_lines: tokens.orphan_lines,
            system_lines: tokens.system_lines,
            malformed_lines,
            media_dropped,
            records: records.len(),
        };
        info!(
            %format,
            records = stats.records,
            headers = stats.header_lines,
            continuations = stats.continuation_lines,
            orphans = stats.orphan_lines,
            system = stats.system_lines,
            malformed = stats.malformed_lines,
            media_dropped = stats.media_dropped,
            "export parsed"
        );

        Ok(ParsedExport {
            format,
            records,
            stats,
        })
    }
}
