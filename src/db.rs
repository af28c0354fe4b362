use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::{params, Connection, Row};
use tracing::{debug, error, warn};

use crate::error::{JournalError, Result};
use crate::logging::OperationTimer;
use crate::metrics::{MetricsCollector, MetricsTimer};
use crate::models::{DayRange, EmotionEntry, Sentiment, SentimentCategory};
use crate::schema::{self, emotions, TIMESTAMP_FORMAT};

/// Source of the creation time stamped on new entries
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Local system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Store for emotion entries backed by a single SQLite table
///
/// Every operation opens its own connection, runs one statement and closes it
/// again. Errors are returned to the caller; nothing is swallowed.
pub struct EntryStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
    metrics: MetricsCollector,
}

impl EntryStore {
    /// Create a store for the database file at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_clock(path, SystemClock)
    }

    /// Create a store that stamps entries using `clock`
    pub fn with_clock(path: impl AsRef<Path>, clock: impl Clock + 'static) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| JournalError::StorageUnavailable {
                path: path.clone(),
                source: Box::new(e),
            })?;
        }

        Ok(Self {
            path,
            clock: Box::new(clock),
            metrics: MetricsCollector::default(),
        })
    }

    /// Location of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to open database");
            JournalError::StorageUnavailable {
                path: self.path.clone(),
                source: Box::new(e),
            }
        })
    }

    /// Create the emotions table if it does not exist yet
    ///
    /// Safe to call any number of times; existing rows are left untouched.
    pub fn initialize(&self) -> Result<()> {
        let timer = MetricsTimer::new(self.metrics, "initialize");
        let result = self
            .connect()
            .and_then(|conn| Ok(conn.execute_batch(&schema::create_statements())?));
        self.finish(timer, "initialize", &result);
        result
    }

    /// Store a new entry stamped with the current time
    ///
    /// `category` must be the one the threshold function derives from `score`,
    /// and `score` must lie in [-1.0, 1.0].
    pub fn save(&self, text: &str, category: SentimentCategory, score: f64) -> Result<EmotionEntry> {
        let sentiment = Sentiment::checked(category, score).inspect_err(|e| {
            warn!(error = %e, "Rejected entry with inconsistent sentiment");
        })?;
        self.save_sentiment(text, sentiment)
    }

    /// Store a new entry with an already validated sentiment
    pub fn save_sentiment(&self, text: &str, sentiment: Sentiment) -> Result<EmotionEntry> {
        if text.is_empty() {
            return Err(JournalError::InvalidInput("entry text must not be empty".to_string()));
        }

        let op_timer = OperationTimer::new("save");
        let timer = MetricsTimer::new(self.metrics, "save");
        let result = self.insert(text, sentiment);
        self.finish(timer, "save", &result);
        op_timer.finish();

        if let Ok(entry) = &result {
            self.metrics
                .record_entry(entry.sentiment_category, entry.sentiment_score, entry.text.len());
            debug!(id = entry.id, category = %entry.sentiment_category, "Saved entry");
        }
        result
    }

    fn insert(&self, text: &str, sentiment: Sentiment) -> Result<EmotionEntry> {
        let conn = self.connect()?;
        let timestamp = truncate_to_seconds(self.clock.now());

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
                emotions::TABLE,
                emotions::DATE,
                emotions::TEXT,
                emotions::SENTIMENT,
                emotions::SENTIMENT_SCORE
            ),
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                text,
                sentiment.category().as_str(),
                sentiment.score()
            ],
        )
        .map_err(JournalError::WriteFailed)?;

        Ok(EmotionEntry {
            id: conn.last_insert_rowid(),
            timestamp,
            text: text.to_string(),
            sentiment_category: sentiment.category(),
            sentiment_score: sentiment.score(),
        })
    }

    /// Every entry, newest first
    pub fn list_all(&self) -> Result<Vec<EmotionEntry>> {
        let query = format!(
            "SELECT {}, {}, {}, {}, {} FROM {} ORDER BY {} DESC, {} DESC",
            emotions::ID,
            emotions::DATE,
            emotions::TEXT,
            emotions::SENTIMENT,
            emotions::SENTIMENT_SCORE,
            emotions::TABLE,
            emotions::DATE,
            emotions::ID
        );

        let timer = MetricsTimer::new(self.metrics, "list_all");
        let result = self.query_entries(&query, &[]);
        self.finish(timer, "list_all", &result);
        result
    }

    /// Entries recorded between `start_date` 00:00:00 and `end_date` 23:59:59, newest first
    ///
    /// A window with no entries, including one where `start_date` is after
    /// `end_date`, yields an empty vector.
    pub fn list_in_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<EmotionEntry>> {
        let (mut lower, mut upper) = DayRange::new(start_date, end_date).bounds();
        if let Some((first, last)) = sortable_span() {
            if lower > last || upper < first {
                return Ok(Vec::new());
            }
            lower = lower.max(first);
            upper = upper.min(last);
        }
        let query = format!(
            "SELECT {}, {}, {}, {}, {} FROM {} WHERE {} BETWEEN ?1 AND ?2 ORDER BY {} DESC, {} DESC",
            emotions::ID,
            emotions::DATE,
            emotions::TEXT,
            emotions::SENTIMENT,
            emotions::SENTIMENT_SCORE,
            emotions::TABLE,
            emotions::DATE,
            emotions::DATE,
            emotions::ID
        );
        let lower = lower.format(TIMESTAMP_FORMAT).to_string();
        let upper = upper.format(TIMESTAMP_FORMAT).to_string();

        let timer = MetricsTimer::new(self.metrics, "list_in_range");
        let result = self.query_entries(&query, &[&lower, &upper]);
        self.finish(timer, "list_in_range", &result);
        result
    }

    /// Calendar days of the oldest and newest entries, `None` when empty
    pub fn date_span(&self) -> Result<Option<DayRange>> {
        let timer = MetricsTimer::new(self.metrics, "date_span");
        let result = self.query_date_span();
        self.finish(timer, "date_span", &result);
        result
    }

    /// Number of stored entries
    pub fn count(&self) -> Result<usize> {
        let timer = MetricsTimer::new(self.metrics, "count");
        let result = self.query_count();
        self.finish(timer, "count", &result);
        result
    }

    fn query_date_span(&self) -> Result<Option<DayRange>> {
        let conn = self.connect()?;
        let (min, max): (Option<String>, Option<String>) = conn.query_row(
            &format!(
                "SELECT MIN({}), MAX({}) FROM {}",
                emotions::DATE,
                emotions::DATE,
                emotions::TABLE
            ),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(min), Some(max)) => Ok(Some(DayRange::new(
                parse_timestamp(&min)?.date(),
                parse_timestamp(&max)?.date(),
            ))),
            _ => Ok(None),
        }
    }

    fn query_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", emotions::TABLE),
            [],
            |row| row.get(0),
        )?;
        usize::try_from(total).map_err(|_| JournalError::CorruptRow(format!("negative count {total}")))
    }

    fn query_entries(&self, query: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<EmotionEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(query)?;
        let rows = stmt.query_map(params, map_raw_row)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?.into_entry()?);
        }

        Ok(results)
    }

    fn finish<T>(&self, timer: MetricsTimer, operation: &'static str, result: &Result<T>) {
        timer.finish(result.is_ok());
        if let Err(e) = result {
            warn!(operation, error = %e, "Store operation failed");
            self.metrics.record_error(e.kind(), operation);
        }
    }
}

/// Row as read from SQLite, before typed conversion
struct RawRow {
    id: i64,
    date: String,
    text: String,
    sentiment: String,
    score: f64,
}

impl RawRow {
    fn into_entry(self) -> Result<EmotionEntry> {
        let sentiment_category: SentimentCategory = self.sentiment.parse()?;
        if sentiment_category != SentimentCategory::from_score(self.score) {
            warn!(
                id = self.id,
                category = %sentiment_category,
                score = self.score,
                "Stored category disagrees with score"
            );
        }

        Ok(EmotionEntry {
            id: self.id,
            timestamp: parse_timestamp(&self.date)?,
            text: self.text,
            sentiment_category,
            sentiment_score: self.score,
        })
    }
}

fn map_raw_row(row: &Row) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        date: row.get(1)?,
        text: row.get(2)?,
        sentiment: row.get(3)?,
        score: row.get(4)?,
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| JournalError::CorruptRow(format!("bad timestamp {value:?}: {e}")))
}

/// Widest span whose formatted timestamps still sort chronologically
///
/// Years outside 0000..=9999 gain a sign or a fifth digit and break text order.
fn sortable_span() -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = NaiveDate::from_ymd_opt(0, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let last = NaiveDate::from_ymd_opt(9999, 12, 31)?.and_hms_opt(23, 59, 59)?;
    Some((first, last))
}

fn truncate_to_seconds(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_initialize_creates_table() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path().join("emotions.db")).unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.date_span().unwrap(), None);
    }

    #[test]
    fn test_new_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("emotions.db");
        let store = EntryStore::new(&path).unwrap();
        store.initialize().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_query_before_initialize_is_an_error() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path().join("emotions.db")).unwrap();
        let err = store.list_all().unwrap_err();
        assert!(matches!(err, JournalError::Query(_)));
    }

    #[test]
    fn test_span_and_count_before_initialize_are_errors() {
        let dir = tempdir().unwrap();
        let store = EntryStore::new(dir.path().join("emotions.db")).unwrap();
        assert!(matches!(store.date_span(), Err(JournalError::Query(_))));
        assert!(matches!(store.count(), Err(JournalError::Query(_))));
    }

    #[test]
    fn test_sortable_span_formats_as_four_digit_years() {
        let (first, last) = sortable_span().unwrap();
        assert_eq!(first.format(TIMESTAMP_FORMAT).to_string(), "0000-01-01 00:00:00");
        assert_eq!(last.format(TIMESTAMP_FORMAT).to_string(), "9999-12-31 23:59:59");
    }

    #[test]
    fn test_truncate_to_seconds() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 678)
            .unwrap();
        assert_eq!(truncate_to_seconds(ts).to_string(), "2025-01-02 03:04:05");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(JournalError::CorruptRow(_))
        ));
    }
}
