//! Core analysis logic for chatpulse.
//!
//! This module contains:
//! - [`filter`] - Record selection by date range and sender
//! - [`stats`] - Per-user word and emoji statistics
//! - [`histogram`] - Monthly/hourly/weekday series and the weekday × hour heatmap
//! - [`output`] - Table writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatpulse::config::StatsConfig;
//! use chatpulse::core::{FilterConfig, apply_filters, by_hour, heatmap, user_stats};
//! use chatpulse::parsers::ChatParser;
//!
//! let content = "01/02/2021, 10:30 - Alice: hello\n01/02/2021, 10:31 - Bob: hi there\n";
//! let export = ChatParser::new().parse_str(content)?;
//!
//! let filter = FilterConfig::new().with_senders(["Alice", "Bob"]);
//! filter.validate()?;
//! let selected = apply_filters(&export.records, &filter);
//!
//! let senders = vec!["Alice".to_string(), "Bob".to_string()];
//! let stats = user_stats(&selected, &senders, &StatsConfig::default());
//! assert_eq!(stats[1].message_count, 1);
//! assert_eq!(heatmap(&selected).total(), 2);
//! assert_eq!(by_hour(&selected, &senders).series.len(), 2);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

pub mod filter;
pub mod histogram;
pub mod output;
pub mod stats;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters};
pub use histogram::{
    Bucket, Heatmap, HeatmapCell, Histogram, Series, by_hour, by_month, by_time, by_weekday,
    heatmap,
};
pub use stats::{EmojiCount, UserStats, WordStats, WordSummary, rank_emojis, user_stats, word_stats};

// Re-export MessageRecord from the crate root
pub use crate::MessageRecord;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
