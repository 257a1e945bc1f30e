//! # Chatpulse
//!
//! A Rust library for turning WhatsApp-style chat exports into activity
//! statistics: who writes how much, when, and with which emojis.
//!
//! ## Overview
//!
//! Chatpulse reads the plain-text exports WhatsApp produces in two layouts:
//! - **Legacy** (Android) - `01/02/2021, 10:30 - Alice: hello`
//! - **Bracketed** (iOS) - `[01/02/21, 10:30:15] Alice: hello`
//!
//! Multi-line messages, encryption notices, join/leave events and stray
//! lines are handled while building a table of [`MessageRecord`]s. The table
//! can then be filtered by date range and participant and summarized as
//! per-user statistics, monthly/hourly/weekday histograms and a weekday ×
//! hour heatmap.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = Session::default();
//!     session.load_str(
//!         "01/02/2021, 10:30 - Alice: hello\n\
//!          01/02/2021, 10:31 - Bob: hi there\n",
//!     )?;
//!
//!     let analysis = session.analyze(&FilterConfig::new())?;
//!     assert_eq!(analysis.heatmap.count(Weekday::Monday, 10), 2);
//!
//!     // One message is not enough for word statistics
//!     assert!(analysis.user_stats[0].words.stats().is_none());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`tokenizer`] - Physical lines to logical (multi-line) messages
//! - [`parser`] - [`ExportFormat`](parser::ExportFormat), the
//!   [`RecordParser`](parser::RecordParser) trait and format detection
//! - [`parsers`] - Legacy and bracketed record parsers, and the
//!   [`ChatParser`](parsers::ChatParser) pipeline
//! - [`normalizer`] - Typed dates/times, media filter, anonymization
//! - [`emoji`] - Emoji classification and extraction
//! - [`core`] - Filtering, statistics, histograms, table writers
//! - [`session`] - [`Session`](session::Session) and
//!   [`Analysis`](session::Analysis)
//! - [`config`] - Parse and statistics configuration
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - Unified error types ([`ChatpulseError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod emoji;
pub mod error;
pub mod format;
pub mod message;
pub mod normalizer;
pub mod parser;
pub mod parsers;
pub mod session;
pub mod tokenizer;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpulseError, Result};
pub use message::{MessageRecord, Weekday};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::message::{MessageRecord, Weekday};

    // Error types
    pub use crate::error::{ChatpulseError, FilterRangeKind, Result};

    // Configuration
    pub use crate::config::{ChatpulseConfig, EmojiRanking, ParseConfig, StatsConfig};

    // Parsing
    pub use crate::parser::{ExportFormat, RecordParser, create_parser, detect_format};
    pub use crate::parsers::{ChatParser, ParseStats, ParsedExport};

    // Session
    pub use crate::session::{Analysis, Session};

    // Filtering and aggregates
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::histogram::{Heatmap, Histogram, Series};
    pub use crate::core::stats::{UserStats, WordStats, WordSummary};

    // Output
    pub use crate::format::OutputFormat;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
