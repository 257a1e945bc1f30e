//! Table export writers.
//!
//! This module provides writers for the normalized record table:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! Every writer accepts anything that iterates over `&MessageRecord`, so both
//! a whole table (`&records`) and a filtered selection
//! (`filtered.iter().copied()`) can be exported.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatpulse::Result<()> {
//! use chatpulse::core::output::{to_csv, write_csv, write_json, write_jsonl};
//! use chatpulse::parsers::ChatParser;
//!
//! let export = ChatParser::new().parse("chat.txt".as_ref())?;
//!
//! write_csv(&export.records, "table.csv")?;
//! write_json(&export.records, "table.json")?;
//! write_jsonl(&export.records, "table.jsonl")?;
//!
//! let csv_string = to_csv(&export.records)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
