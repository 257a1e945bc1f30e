//! Export formats and the record parser interface.
//!
//! WhatsApp has shipped two text layouts over the years:
//!
//! | Format | Example header line |
//! |--------|---------------------|
//! | [`Legacy`](ExportFormat::Legacy) | `01/02/2021, 10:30 - Alice: hello` |
//! | [`Bracketed`](ExportFormat::Bracketed) | `[01/02/21, 10:30:15] Alice: hello` |
//!
//! Each layout has its own [`RecordParser`] in [`crate::parsers`]. When no
//! format is forced, [`detect_format`] scores a sample of lines against both
//! header shapes and picks the better match.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::parser::{ExportFormat, create_parser, detect_format};
//! use chatpulse::tokenizer::LogicalLine;
//!
//! let lines = ["01/02/2021, 10:30 - Alice: hello"];
//! let format = detect_format(&lines).unwrap();
//! assert_eq!(format, ExportFormat::Legacy);
//!
//! let parser = create_parser(format);
//! let raw = parser.parse_line(&LogicalLine::new(1, lines[0])).unwrap();
//! assert_eq!(raw.sender, "Alice");
//! assert_eq!(raw.body, "hello");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tokenizer::LogicalLine;

/// Number of non-empty lines inspected by [`detect_format`].
pub const DETECTION_SAMPLE_LINES: usize = 20;

static LEGACY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ExportFormat::Legacy.header_pattern()).expect("legacy header pattern is valid")
});

static BRACKETED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ExportFormat::Bracketed.header_pattern()).expect("bracketed header pattern is valid")
});

/// Supported chat export layouts.
///
/// ```rust
/// use chatpulse::parser::ExportFormat;
///
/// let format: ExportFormat = "ios".parse().unwrap();
/// assert_eq!(format, ExportFormat::Bracketed);
/// assert_eq!(format.to_string(), "Bracketed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `DD/MM/YYYY, HH:MM - Sender: Message`
    #[serde(alias = "android")]
    Legacy,

    /// `[DD/MM/YY, HH:MM:SS] Sender: Message`
    #[serde(alias = "ios")]
    Bracketed,
}

impl ExportFormat {
    /// Regex matching the timestamp region that opens a header line.
    pub fn header_pattern(self) -> &'static str {
        match self {
            // 01/02/2021, 10:30 -
            ExportFormat::Legacy => r"^\d{2}/\d{2}/\d{4}, \d{1,2}:\d{2} - ",
            // [01/02/21, 10:30:15]
            ExportFormat::Bracketed => {
                r"^\x{200E}?\[\d{1,2}/\d{1,2}/\d{2,4}, \d{1,2}:\d{2}(?::\d{2})?\] "
            }
        }
    }

    /// Regex capturing date, time, sender and body of a whole logical line.
    pub fn record_pattern(self) -> &'static str {
        match self {
            ExportFormat::Legacy => {
                r"(?s)^(\d{2}/\d{2}/\d{4}), (\d{1,2}:\d{2}) - ([^:\n]+): ?(.*)$"
            }
            ExportFormat::Bracketed => {
                r"(?s)^\x{200E}?\[(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2}(?::\d{2})?)\] ([^:\n]+): ?(.*)$"
            }
        }
    }

    /// chrono formats tried, in order, for the date field.
    pub fn date_formats(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Legacy => &["%d/%m/%Y"],
            ExportFormat::Bracketed => &["%d/%m/%y", "%d/%m/%Y"],
        }
    }

    /// chrono formats tried, in order, for the time field.
    pub fn time_formats(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Legacy => &["%H:%M", "%H:%M:%S"],
            ExportFormat::Bracketed => &["%H:%M:%S", "%H:%M"],
        }
    }

    /// Compiled header regex for this format.
    pub fn header_regex(self) -> &'static Regex {
        match self {
            ExportFormat::Legacy => &*LEGACY_HEADER,
            ExportFormat::Bracketed => &*BRACKETED_HEADER,
        }
    }

    /// Returns `true` if `line` opens a new message in this format.
    pub fn is_header(self, line: &str) -> bool {
        self.header_regex().is_match(line)
    }

    /// Byte offset where the timestamp region of a header line ends.
    ///
    /// Returns `None` if `line` is not a header line.
    pub fn timestamp_end(self, line: &str) -> Option<usize> {
        self.header_regex().find(line).map(|m| m.end())
    }

    /// Returns all format names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["legacy", "android", "bracketed", "ios"]
    }

    /// Returns all formats, in detection tie-break order.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Bracketed, ExportFormat::Legacy]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Legacy => write!(f, "Legacy"),
            ExportFormat::Bracketed => write!(f, "Bracketed"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "android" => Ok(ExportFormat::Legacy),
            "bracketed" | "ios" => Ok(ExportFormat::Bracketed),
            _ => Err(format!(
                "Unknown export format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// The four unconverted fields of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number of the header line
    pub line_number: usize,
    pub date: String,
    pub time: String,
    pub sender: String,
    pub body: String,
}

/// Splits a logical line into a [`RawRecord`].
///
/// Implementations must not panic on arbitrary input; a line that does not
/// have the expected shape yields `None` and is treated as malformed by the
/// caller.
pub trait RecordParser: Send + Sync {
    /// Human-readable parser name.
    fn name(&self) -> &'static str;

    /// The export format this parser reads.
    fn format(&self) -> ExportFormat;

    /// Extracts date, time, sender and body from a whole message.
    fn parse_line(&self, line: &LogicalLine) -> Option<RawRecord>;
}

/// Creates the record parser for `format`.
///
/// ```rust
/// use chatpulse::parser::{ExportFormat, create_parser};
///
/// let parser = create_parser(ExportFormat::Bracketed);
/// assert_eq!(parser.name(), "Bracketed");
/// ```
pub fn create_parser(format: ExportFormat) -> Box<dyn RecordParser> {
    match format {
        ExportFormat::Legacy => Box::new(crate::parsers::LegacyParser::new()),
        ExportFormat::Bracketed => Box::new(crate::parsers::BracketedParser::new()),
    }
}

/// Auto-detect the export format by scoring sample lines.
///
/// Every line is matched against each format's header pattern; the format
/// with the most matches wins, ties going to the earlier entry of
/// [`ExportFormat::all`]. Returns `None` if no line matches any format.
pub fn detect_format<S: AsRef<str>>(lines: &[S]) -> Option<ExportFormat> {
    let formats = ExportFormat::all();
    let mut scores = vec![0usize; formats.len()];

    for line in lines {
        for (i, format) in formats.iter().enumerate() {
            if format.is_header(line.as_ref()) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(formats[winner_idx])
}

/// Detects the format from the first [`DETECTION_SAMPLE_LINES`] non-empty lines of `content`.
pub fn detect_format_in(content: &str) -> Option<ExportFormat> {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DETECTION_SAMPLE_LINES)
        .collect();
    detect_format(&sample)
}
