//! Unified error types for chatpulse.
//!
//! This module provides a single [`ChatpulseError`] enum that covers every
//! failure in the library, from reading an export to validating a filter.
//!
//! # Recoverability
//!
//! | Variant | Raised by | Policy |
//! |---------|-----------|--------|
//! | [`MalformedLine`](ChatpulseError::MalformedLine) | record parser | skipped and counted unless strict |
//! | [`DateParse`](ChatpulseError::DateParse) / [`TimeParse`](ChatpulseError::TimeParse) | normalizer | aborts the load |
//! | [`EmptyUpload`](ChatpulseError::EmptyUpload) | session | shown as "no data" |
//! | [`InsufficientSample`](ChatpulseError::InsufficientSample) | statistics | shown as "N/A" |
//! | [`FilterRange`](ChatpulseError::FilterRange) | filter validation | aggregation not attempted |

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::MessageRecord;
///
/// fn load_nothing() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// The error type for all chatpulse operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred while reading an export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A header-shaped line could not be split into date, time, sender and body.
    ///
    /// Only returned when the parser runs with `skip_invalid = false`;
    /// otherwise such lines are skipped and counted.
    #[error("Malformed message line {line}: {content}")]
    MalformedLine {
        /// 1-based line number of the header line
        line: usize,
        /// The offending logical line
        content: String,
    },

    /// A date field could not be converted to a calendar date.
    ///
    /// Usually means the export is not in the format that was selected.
    #[error("Cannot parse date '{input}' on line {line}{}", hint_suffix(.path))]
    DateParse {
        /// 1-based line number of the header line
        line: usize,
        /// The raw date substring
        input: String,
        /// The file being parsed, if known
        path: Option<PathBuf>,
    },

    /// A time field could not be converted to a time of day.
    #[error("Cannot parse time '{input}' on line {line}{}", hint_suffix(.path))]
    TimeParse {
        /// 1-based line number of the header line
        line: usize,
        /// The raw time substring
        input: String,
        /// The file being parsed, if known
        path: Option<PathBuf>,
    },

    /// The input contains no valid message lines.
    #[error("No messages found in the export")]
    EmptyUpload,

    /// Fewer than two samples were available for a standard deviation.
    #[error("Insufficient sample: {count} message(s), at least 2 required")]
    InsufficientSample {
        /// Number of samples that were available
        count: usize,
    },

    /// The filter selection cannot produce an aggregation.
    #[error("Invalid filter: {0}")]
    FilterRange(FilterRangeKind),

    /// Invalid date string in a filter.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown format name or unusable format selection.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format involved ("export", "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Why a filter selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterRangeKind {
    /// The end date precedes the start date
    #[error("end date precedes start date")]
    EndBeforeStart,
    /// The selected sender set is empty
    #[error("no senders selected")]
    NoSenders,
}

fn hint_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" (file: {})", p.display()))
        .unwrap_or_default()
}

impl From<std::string::FromUtf8Error> for ChatpulseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatpulseError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates a malformed line error.
    pub fn malformed_line(line: usize, content: impl Into<String>) -> Self {
        ChatpulseError::MalformedLine {
            line,
            content: content.into(),
        }
    }

    /// Creates a date parse error without a file path.
    pub fn date_parse(line: usize, input: impl Into<String>) -> Self {
        ChatpulseError::DateParse {
            line,
            input: input.into(),
            path: None,
        }
    }

    /// Creates a time parse error without a file path.
    pub fn time_parse(line: usize, input: impl Into<String>) -> Self {
        ChatpulseError::TimeParse {
            line,
            input: input.into(),
            path: None,
        }
    }

    /// Creates an insufficient sample error.
    pub fn insufficient_sample(count: usize) -> Self {
        ChatpulseError::InsufficientSample { count }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatpulseError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatpulseError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Attaches a file path to date/time parse errors; other variants pass through.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatpulseError::DateParse { line, input, .. } => ChatpulseError::DateParse {
                line,
                input,
                path: Some(file.into()),
            },
            ChatpulseError::TimeParse { line, input, .. } => ChatpulseError::TimeParse {
                line,
                input,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if a date or time field failed to parse.
    pub fn is_timestamp_parse(&self) -> bool {
        matches!(
            self,
            ChatpulseError::DateParse { .. } | ChatpulseError::TimeParse { .. }
        )
    }

    /// Returns `true` if the export produced no messages.
    pub fn is_empty_upload(&self) -> bool {
        matches!(self, ChatpulseError::EmptyUpload)
    }

    /// Returns `true` if a statistic lacked samples.
    pub fn is_insufficient_sample(&self) -> bool {
        matches!(self, ChatpulseError::InsufficientSample { .. })
    }

    /// Returns `true` if a filter selection was rejected.
    pub fn is_filter_range(&self) -> bool {
        matches!(self, ChatpulseError::FilterRange(_))
    }

    /// Returns `true` if this is a date-related filter error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatpulseError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
