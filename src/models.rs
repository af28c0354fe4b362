//! Data models for emotion entries
//!
//! This module contains the entry type persisted by the store together with the
//! sentiment types and the calendar-day range used for queries.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};

/// Scores strictly above this are Positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are Negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Sentiment category derived from a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentCategory {
    /// Score above 0.1
    Positive,
    /// Score below -0.1
    Negative,
    /// Everything in between, bounds included
    Neutral,
}

impl SentimentCategory {
    /// All categories in display order
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Threshold function mapping a polarity score to its category
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Name as stored in the database
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Positive" => Ok(Self::Positive),
            "Negative" => Ok(Self::Negative),
            "Neutral" => Ok(Self::Neutral),
            other => Err(JournalError::CorruptRow(format!(
                "unknown sentiment category: {other}"
            ))),
        }
    }
}

/// A polarity score paired with the category it implies
///
/// The only constructor checks the score, so a `Sentiment` always satisfies the
/// threshold invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    category: SentimentCategory,
    score: f64,
}

impl Sentiment {
    /// Zero score, Neutral
    pub const NEUTRAL: Self = Self {
        category: SentimentCategory::Neutral,
        score: 0.0,
    };

    /// Build from a score, rejecting NaN, infinities and values outside [-1, 1]
    pub fn from_score(score: f64) -> Result<Self> {
        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(JournalError::ScoreOutOfRange(score));
        }
        Ok(Self {
            category: SentimentCategory::from_score(score),
            score,
        })
    }

    /// Build from a caller-supplied pair, rejecting a category that disagrees with the score
    pub fn checked(category: SentimentCategory, score: f64) -> Result<Self> {
        let sentiment = Self::from_score(score)?;
        if sentiment.category != category {
            return Err(JournalError::CategoryMismatch {
                category,
                score,
                expected: sentiment.category,
            });
        }
        Ok(sentiment)
    }

    /// Derived category
    #[must_use]
    pub const fn category(&self) -> SentimentCategory {
        self.category
    }

    /// Polarity score in [-1.0, 1.0]
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }
}

/// One stored journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    /// Database primary key
    pub id: i64,
    /// Local time the entry was recorded, whole seconds
    pub timestamp: NaiveDateTime,
    /// User-supplied text
    pub text: String,
    /// Category derived from `sentiment_score`
    pub sentiment_category: SentimentCategory,
    /// Polarity score in [-1.0, 1.0]
    pub sentiment_score: f64,
}

impl EmotionEntry {
    /// Calendar day the entry belongs to
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Inclusive window of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    /// First day, from 00:00:00
    pub start: NaiveDate,
    /// Last day, through 23:59:59
    pub end: NaiveDate,
}

impl DayRange {
    /// Create a range; `start` after `end` yields a range that contains nothing
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A single calendar day
    #[must_use]
    pub const fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The `days` calendar days ending with `today`
    #[must_use]
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let back = TimeDelta::days(i64::from(days.saturating_sub(1)));
        let start = today.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// Date-times bounding the range: `start 00:00:00` and `end 23:59:59`
    #[must_use]
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (start_of_day(self.start), end_of_day(self.end))
    }

    /// Whether `timestamp` falls inside the range
    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let (lower, upper) = self.bounds();
        lower <= timestamp && timestamp <= upper
    }

    /// True when `start` is after `end`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| start_of_day(date))
}

/// Output format for exported entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values format
    Csv,
    /// Plain text format
    Txt,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            other => Err(JournalError::InvalidInput(format!(
                "unknown output format: {other} (expected csv, txt or json)"
            ))),
        }
    }
}
