//! Configuration types for parsing and statistics.
//!
//! Plain builder structs without any CLI framework dependencies. Media
//! filtering and anonymization are opt-in; emoji ranking defaults to the top
//! five per user.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{EmojiRanking, ParseConfig, StatsConfig};
//! use chatpulse::parser::ExportFormat;
//!
//! let parse = ParseConfig::new()
//!     .with_format(ExportFormat::Legacy)
//!     .with_skip_media(true);
//!
//! let stats = StatsConfig::new().with_emoji_ranking(EmojiRanking::MinCount(10));
//! assert!(parse.skip_media);
//! ```

#[cfg(feature = "json-output")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::ExportFormat;

/// Placeholder body WhatsApp writes for attachments that were not exported.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Default number of emojis reported per user.
pub const DEFAULT_TOP_EMOJIS: usize = 5;

/// Configuration for turning an export into a table of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Force an export format instead of auto-detecting it (default: detect)
    pub format: Option<ExportFormat>,

    /// Skip malformed lines instead of returning errors (default: true)
    pub skip_invalid: bool,

    /// Drop records whose body equals `media_placeholder` (default: false)
    pub skip_media: bool,

    /// Body text that marks an omitted attachment
    pub media_placeholder: String,

    /// Replace sender names with `User 1` … `User N` (default: false)
    pub anonymize: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            format: None,
            skip_invalid: true,
            skip_media: false,
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
            anonymize: false,
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the export format.
    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets whether to skip malformed lines.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Sets whether to drop media placeholder records.
    #[must_use]
    pub fn with_skip_media(mut self, skip: bool) -> Self {
        self.skip_media = skip;
        self
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Sets whether sender names are anonymized.
    #[must_use]
    pub fn with_anonymize(mut self, anonymize: bool) -> Self {
        self.anonymize = anonymize;
        self
    }
}

/// How the "most used emojis" list is chosen.
///
/// Both rankings order by descending count with ties broken by first
/// appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiRanking {
    /// The `k` most frequent emojis
    TopK(usize),
    /// Every emoji used at least `n` times
    MinCount(usize),
}

impl Default for EmojiRanking {
    fn default() -> Self {
        EmojiRanking::TopK(DEFAULT_TOP_EMOJIS)
    }
}

/// Configuration for per-user statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Emoji ranking rule (default: top 5)
    pub emoji_ranking: EmojiRanking,
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the emoji ranking rule.
    #[must_use]
    pub fn with_emoji_ranking(mut self, ranking: EmojiRanking) -> Self {
        self.emoji_ranking = ranking;
        self
    }
}

/// Complete configuration, as stored in a JSON config file.
///
/// ```json
/// {
///   "parse": { "format": "legacy", "skip_media": true },
///   "stats": { "emoji_ranking": { "min_count": 10 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatpulseConfig {
    pub parse: ParseConfig,
    pub stats: StatsConfig,
}

impl ChatpulseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from a JSON string. Missing keys take defaults.
    #[cfg(feature = "json-output")]
    pub fn from_json(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a configuration from a JSON file.
    #[cfg(feature = "json-output")]
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}
