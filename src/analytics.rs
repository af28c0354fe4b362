//! Aggregates over stored entries
//!
//! These feed the dashboard views: sentiment distribution, the time series of
//! daily average scores, the recent-entries table and word-cloud frequencies.
//! Rendering them is left to the caller.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{EmotionEntry, SentimentCategory};
use crate::nlp::TextProcessor;

/// Count of entries per sentiment category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    /// Entries scored Positive
    pub positive: usize,
    /// Entries scored Negative
    pub negative: usize,
    /// Entries scored Neutral
    pub neutral: usize,
}

impl SentimentDistribution {
    /// Number of entries counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Entries in `category`
    #[must_use]
    pub const fn count(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Neutral => self.neutral,
        }
    }

    /// Fraction of entries in `category`, 0.0 when there are none
    #[must_use]
    pub fn share(&self, category: SentimentCategory) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(category) as f64 / total as f64,
        }
    }
}

/// Average score of the entries recorded on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    /// Calendar day
    pub date: NaiveDate,
    /// Mean score of that day
    pub average_score: f64,
    /// Entries recorded that day
    pub entries: usize,
}

/// How often a word occurs across entry texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Lowercased token
    pub word: String,
    /// Occurrences across all texts
    pub count: usize,
}

/// Entries per sentiment category
#[must_use]
pub fn distribution(entries: &[EmotionEntry]) -> SentimentDistribution {
    entries
        .iter()
        .fold(SentimentDistribution::default(), |mut acc, entry| {
            match entry.sentiment_category {
                SentimentCategory::Positive => acc.positive += 1,
                SentimentCategory::Negative => acc.negative += 1,
                SentimentCategory::Neutral => acc.neutral += 1,
            }
            acc
        })
}

/// Mean score over all entries, `None` when empty
#[must_use]
pub fn average_score(entries: &[EmotionEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|e| e.sentiment_score).sum();
    Some(sum / entries.len() as f64)
}

/// Mean score per calendar day, oldest day first
#[must_use]
pub fn daily_averages(entries: &[EmotionEntry]) -> Vec<DailySentiment> {
    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let slot = by_day.entry(entry.date()).or_insert((0.0, 0));
        slot.0 += entry.sentiment_score;
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (sum, count))| DailySentiment {
            date,
            average_score: sum / count as f64,
            entries: count,
        })
        .collect()
}

/// The `limit` newest entries, newest first
#[must_use]
pub fn recent(entries: &[EmotionEntry], limit: usize) -> Vec<&EmotionEntry> {
    let mut sorted: Vec<&EmotionEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}

/// Most frequent non-stop-words across entry texts
///
/// Ordered by descending count, ties alphabetically; at most `max_words` results.
#[must_use]
pub fn word_frequencies(
    entries: &[EmotionEntry],
    processor: &TextProcessor,
    max_words: usize,
) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let cleaned = processor.clean_text(&entry.text);
        for token in processor.tokenize(&cleaned) {
            // Single letters and bare numbers make poor cloud words
            if token.chars().count() < 2 || token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(max_words);
    words
}
