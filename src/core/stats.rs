//! Per-user message statistics.
//!
//! # Example
//!
//! ```
//! use chatpulse::core::stats::word_stats;
//!
//! let stats = word_stats(&[2, 4, 9])?;
//! assert_eq!(stats.mean, 5.0);
//! assert_eq!(stats.median, 4.0);
//! assert_eq!(stats.max, 9);
//!
//! assert!(word_stats(&[3]).unwrap_err().is_insufficient_sample());
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::config::{EmojiRanking, StatsConfig};
use crate::error::{ChatpulseError, Result};
use crate::message::MessageRecord;

/// Summary of the words-per-message distribution of one sender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WordStats {
    pub samples: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub max: usize,
}

/// Word statistics, or the reason they could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WordSummary {
    Available(WordStats),
    InsufficientSample { count: usize },
}

impl WordSummary {
    /// Returns the statistics if they were computed.
    pub fn stats(&self) -> Option<&WordStats> {
        match self {
            WordSummary::Available(stats) => Some(stats),
            WordSummary::InsufficientSample { .. } => None,
        }
    }

    /// Summarizes `counts`, or records how few samples there were.
    pub fn from_counts(counts: &[usize]) -> Self {
        match counts.len() {
            n @ 0..=1 => WordSummary::InsufficientSample { count: n },
            _ => WordSummary::Available(summarize(counts)),
        }
    }
}

/// One ranked emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: char,
    pub count: usize,
}

impl fmt::Display for EmojiCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.emoji, self.count)
    }
}

/// Statistics for one sender over the filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub sender: String,
    pub message_count: usize,
    pub words: WordSummary,
    pub top_emojis: Vec<EmojiCount>,
}

/// Computes mean, median, sample standard deviation and max of `counts`.
///
/// # Errors
///
/// Returns [`ChatpulseError::InsufficientSample`] when fewer than two
/// samples are given.
pub fn word_stats(counts: &[usize]) -> Result<WordStats> {
    let n = counts.len();
    if n < 2 {
        return Err(ChatpulseError::insufficient_sample(n));
    }
    Ok(summarize(counts))
}

/// `counts` must hold at least two samples.
fn summarize(counts: &[usize]) -> WordStats {
    let n = counts.len();
    let mean = counts.iter().sum::<usize>() as f64 / n as f64;

    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    let mid = n / 2;
    let median = if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;

    WordStats {
        samples: n,
        mean,
        median,
        std_dev: variance.sqrt(),
        max: sorted[n - 1],
    }
}

/// Counts emojis and ranks them by descending count.
///
/// Ties keep the order in which the emojis first appeared.
pub fn rank_emojis<I>(emojis: I, ranking: EmojiRanking) -> Vec<EmojiCount>
where
    I: IntoIterator<Item = char>,
{
    let mut counts: Vec<EmojiCount> = Vec::new();
    let mut index: HashMap<char, usize> = HashMap::new();

    for emoji in emojis {
        match index.get(&emoji) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(emoji, counts.len());
                counts.push(EmojiCount { emoji, count: 1 });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    match ranking {
        EmojiRanking::TopK(k) => counts.truncate(k),
        EmojiRanking::MinCount(n) => counts.retain(|c| c.count >= n),
    }
    counts
}

/// Builds [`UserStats`] for each of `senders`, in the given order.
///
/// Senders with fewer than two messages get
/// [`WordSummary::InsufficientSample`].
pub fn user_stats(
    records: &[&MessageRecord],
    senders: &[String],
    config: &StatsConfig,
) -> Vec<UserStats> {
    senders
        .iter()
        .map(|sender| {
            let own: Vec<&MessageRecord> = records
                .iter()
                .copied()
                .filter(|r| &r.sender == sender)
                .collect();

            let counts: Vec<usize> = own.iter().map(|r| r.word_count()).collect();
            let top_emojis = rank_emojis(
                own.iter().flat_map(|r| r.emojis.chars()),
                config.emoji_ranking,
            );

            UserStats {
                sender: sender.clone(),
                message_count: own.len(),
                words: WordSummary::from_counts(&counts),
                top_emojis,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record(sender: &str, body: &str) -> MessageRecord {
        MessageRecord::new(
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            sender,
            body,
        )
    }

    #[test]
    fn test_word_stats_even_sample() {
        let stats = word_stats(&[1, 2, 3, 4]).unwrap();
        assert_eq!(stats.samples, 4);
        assert!((stats.mean - 2.5).abs() < 1e-9);
        assert!((stats.median - 2.5).abs() < 1e-9);
        // sample variance of 1..=4 is 5/3
        assert!((stats.std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(stats.max, 4);
    }

    #[test]
    fn test_word_stats_constant_sample() {
        let stats = word_stats(&[3, 3, 3]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_word_stats_insufficient() {
        let err = word_stats(&[5]).unwrap_err();
        assert!(matches!(err, ChatpulseError::InsufficientSample { count: 1 }));
        let err = word_stats(&[]).unwrap_err();
        assert!(matches!(err, ChatpulseError::InsufficientSample { count: 0 }));
    }

    #[test]
    fn test_rank_emojis_top_k_with_ties() {
        let ranked = rank_emojis("😂🔥😂❤🔥👍".chars(), EmojiRanking::TopK(2));
        assert_eq!(
            ranked,
            [
                EmojiCount { emoji: '😂', count: 2 },
                EmojiCount { emoji: '🔥', count: 2 },
            ]
        );
    }

    #[test]
    fn test_rank_emojis_min_count() {
        let text = "👍".repeat(10) + &"🙏".repeat(9) + "😂";
        let ranked = rank_emojis(text.chars(), EmojiRanking::MinCount(10));
        assert_eq!(ranked, [EmojiCount { emoji: '👍', count: 10 }]);
    }

    #[test]
    fn test_rank_emojis_empty() {
        assert!(rank_emojis("".chars(), EmojiRanking::TopK(5)).is_empty());
    }

    #[test]
    fn test_user_stats_in_sender_order() {
        let records = [
            record("Alice", "hello there 😀"),
            record("Bob", "hi"),
            record("Alice", "one two three four 😀🎉"),
        ];
        let refs: Vec<&MessageRecord> = records.iter().collect();
        let senders = vec!["Bob".to_string(), "Alice".to_string()];

        let stats = user_stats(&refs, &senders, &StatsConfig::default());

        assert_eq!(stats[0].sender, "Bob");
        assert_eq!(stats[0].message_count, 1);
        assert_eq!(stats[0].words, WordSummary::InsufficientSample { count: 1 });

        assert_eq!(stats[1].sender, "Alice");
        assert_eq!(stats[1].message_count, 2);
        let words = stats[1].words.stats().unwrap();
        assert_eq!(words.max, 5);
        assert_eq!(stats[1].top_emojis[0], EmojiCount { emoji: '😀', count: 2 });
        assert_eq!(stats[1].top_emojis.len(), 2);
    }

    #[test]
    fn test_user_stats_unknown_sender() {
        let records = [record("Alice", "hi")];
        let refs: Vec<&MessageRecord> = records.iter().collect();
        let stats = user_stats(&refs, &["Carol".to_string()], &StatsConfig::default());
        assert_eq!(stats[0].message_count, 0);
        assert_eq!(stats[0].words, WordSummary::InsufficientSample { count: 0 });
        assert!(stats[0].top_emojis.is_empty());
    }

    #[test]
    fn test_word_summary_from_counts() {
        assert_eq!(WordSummary::from_counts(&[]), WordSummary::InsufficientSample { count: 0 });
        assert_eq!(WordSummary::from_counts(&[7]), WordSummary::InsufficientSample { count: 1 });

        let summary = WordSummary::from_counts(&[2, 4, 9]);
        assert_eq!(summary.stats(), Some(&word_stats(&[2, 4, 9]).unwrap()));
    }
}
