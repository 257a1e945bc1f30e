//! Splits an export into logical lines.
//!
//! A message starts on a header line (a line opening with the format's
//! timestamp) and runs until the next header. Lines in between are
//! continuation lines and are appended to the message with `\n`.
//!
//! ```
//! use chatpulse::parser::ExportFormat;
//! use chatpulse::tokenizer::tokenize;
//!
//! let content = "01/02/2021, 10:30 - Alice: first\nsecond\n01/02/2021, 10:31 - Bob: hi";
//! let tokens = tokenize(content, ExportFormat::Legacy);
//!
//! assert_eq!(tokens.lines.len(), 2);
//! assert_eq!(tokens.lines[0].text, "01/02/2021, 10:30 - Alice: first\nsecond");
//! assert_eq!(tokens.continuation_lines, 1);
//! ```

use tracing::{debug, warn};

use crate::parser::ExportFormat;

/// End-to-end encryption banners WhatsApp writes as the first "message".
const ENCRYPTION_NOTICES: &[&str] = &[
    "Messages to this chat and calls are now secured with end-to-end encryption",
    "Messages and calls are end-to-end encrypted",
];

/// A header line together with its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line number of the header
    pub line_number: usize,
    /// Header and continuations joined with `\n`
    pub text: String,
}

impl LogicalLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    fn push_continuation(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }
}

/// Result of [`tokenize`]: the logical lines plus what was seen on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub lines: Vec<LogicalLine>,
    /// Header lines seen, including dropped system headers
    pub header_lines: usize,
    /// Continuation lines seen after a header
    pub continuation_lines: usize,
    /// Non-empty lines before the first header
    pub orphan_lines: usize,
    /// Encryption notices and sender-less events that were dropped
    pub system_lines: usize,
}

/// Returns `true` for header remainders that carry no sender.
///
/// `rest` is the header line after its timestamp region.
fn is_system_header(rest: &str) -> bool {
    ENCRYPTION_NOTICES.iter().any(|notice| rest.contains(notice)) || !rest.contains(':')
}

/// Groups the lines of `content` into logical lines for `format`.
///
/// A leading byte-order mark is ignored and `\r\n` endings are accepted.
/// System headers (encryption notices, "X joined" style events) are dropped.
/// Lines that follow one are continuations of the last kept message, or
/// orphans when no message has been kept yet.
pub fn tokenize(content: &str, format: ExportFormat) -> Tokenized {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut out = Tokenized::default();
    let mut current: Option<LogicalLine> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;

        if let Some(end) = format.timestamp_end(line) {
            out.header_lines += 1;

            // the open message stays open across a system header
            if is_system_header(&line[end..]) {
                debug!(line = line_number, "dropping system message");
                out.system_lines += 1;
                continue;
            }

            if let Some(done) = current.replace(LogicalLine::new(line_number, line)) {
                out.lines.push(done);
            }
            continue;
        }

        if let Some(open) = current.as_mut() {
            open.push_continuation(line);
            out.continuation_lines += 1;
        } else if !line.trim().is_empty() {
            warn!(line = line_number, "skipping line before the first message");
            out.orphan_lines += 1;
        }
    }

    if let Some(done) = current {
        out.lines.push(done);
    }

    out
}
