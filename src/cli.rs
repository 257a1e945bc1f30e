//! Command-line interface definition using clap.
//!
//! [`Args`] only describes the command line. Turning it into library
//! configuration happens in [`Args::to_config`] and [`Args::to_filter`], so
//! the same options can be driven from tests without spawning the binary.
//!
//! ```rust
//! use chatpulse::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatpulse", "chat.txt", "--user", "Alice", "--skip-media"]);
//! let config = args.to_config()?;
//! assert!(config.parse.skip_media);
//! assert_eq!(args.to_filter()?.senders, Some(vec!["Alice".to_string()]));
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ChatpulseConfig, EmojiRanking};
use crate::core::filter::FilterConfig;
use crate::error::Result;
use crate::format::OutputFormat;
use crate::parser::ExportFormat;

/// Per-user activity statistics, histograms and heatmaps for WhatsApp chat
/// exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse chat.txt
    chatpulse chat.txt --from 2021-01-01 --to 2021-06-30 --user Alice --user Bob
    chatpulse chat.txt --skip-media --min-emoji-count 10
    chatpulse chat.txt --export table.csv --report report.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Export layout; detected from the file when omitted
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Only messages from this participant (repeatable)
    #[arg(short, long = "user", value_name = "NAME")]
    pub users: Vec<String>,

    /// Drop "<Media omitted>" placeholder messages
    #[arg(long)]
    pub skip_media: bool,

    /// Replace participant names with "User 1" … "User N"
    #[arg(long)]
    pub anonymize: bool,

    /// Report the K most used emojis per user
    #[arg(long, value_name = "K", conflicts_with = "min_emoji_count")]
    pub top_emojis: Option<usize>,

    /// Report every emoji used at least N times
    #[arg(long, value_name = "N")]
    pub min_emoji_count: Option<usize>,

    /// Fail on the first malformed message line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Write the filtered message table to this file
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Table format; inferred from the --export extension when omitted
    #[arg(long, value_enum, value_name = "FORMAT", requires = "export")]
    pub export_format: Option<TableFormatArg>,

    /// Write the full analysis as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// JSON configuration file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log parsing details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `DD/MM/YYYY, HH:MM - Sender: Message`
    #[value(alias = "android")]
    Legacy,
    /// `[DD/MM/YY, HH:MM:SS] Sender: Message`
    #[value(alias = "ios")]
    Bracketed,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Legacy => ExportFormat::Legacy,
            FormatArg::Bracketed => ExportFormat::Bracketed,
        }
    }
}

/// `--export-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormatArg {
    Csv,
    Json,
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<TableFormatArg> for OutputFormat {
    fn from(arg: TableFormatArg) -> Self {
        match arg {
            TableFormatArg::Csv => OutputFormat::Csv,
            TableFormatArg::Json => OutputFormat::Json,
            TableFormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

impl Args {
    /// Loads `--config` (or defaults) and applies the command-line overrides.
    pub fn to_config(&self) -> Result<ChatpulseConfig> {
        let mut config = match &self.config {
            Some(path) => ChatpulseConfig::from_path(path)?,
            None => ChatpulseConfig::default(),
        };

        if let Some(format) = self.format {
            config.parse.format = Some(format.into());
        }
        if self.skip_media {
            config.parse.skip_media = true;
        }
        if self.anonymize {
            config.parse.anonymize = true;
        }
        if self.strict {
            config.parse.skip_invalid = false;
        }
        if let Some(k) = self.top_emojis {
            config.stats.emoji_ranking = EmojiRanking::TopK(k);
        }
        if let Some(n) = self.min_emoji_count {
            config.stats.emoji_ranking = EmojiRanking::MinCount(n);
        }

        Ok(config)
    }

    /// Builds the filter from `--from`, `--to` and `--user`.
    pub fn to_filter(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(from) = &self.from {
            filter = filter.with_date_from(from)?;
        }
        if let Some(to) = &self.to {
            filter = filter.with_date_to(to)?;
        }
        if !self.users.is_empty() {
            filter = filter.with_senders(self.users.iter().cloned());
        }
        Ok(filter)
    }

    /// Table format for `--export`, if any.
    pub fn export_format(&self) -> Result<Option<OutputFormat>> {
        let Some(path) = &self.export else {
            return Ok(None);
        };
        match self.export_format {
            Some(format) => Ok(Some(format.into())),
            None => OutputFormat::from_path(path).map(Some),
        }
    }
}
