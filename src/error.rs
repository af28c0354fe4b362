//! Error types for the emotion-journal library.
//!
//! This module provides custom error types using `thiserror` so that storage
//! failures are reported to callers instead of being folded into empty results.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::SentimentCategory;

/// Errors that can occur in the emotion-journal library.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The database file or its directory could not be opened or created
    #[error("Storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        /// Location of the database file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An insert did not commit
    #[error("Write failed: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    /// A read query failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Malformed user input (empty text, control characters)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sentiment score is not a finite number in [-1.0, 1.0]
    #[error("Sentiment score out of range: {0}")]
    ScoreOutOfRange(f64),

    /// Category supplied by the caller disagrees with the one derived from the score
    #[error("Category {category} does not match score {score} (expected {expected})")]
    CategoryMismatch {
        /// Category supplied by the caller
        category: SentimentCategory,
        /// Score supplied by the caller
        score: f64,
        /// Category derived from the score
        expected: SentimentCategory,
    },

    /// A stored row could not be mapped to an entry
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Invalid date format or range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Result with `JournalError`
pub type Result<T> = std::result::Result<T, JournalError>;

impl JournalError {
    /// Short label used for metrics and structured log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::WriteFailed(_) => "write_failed",
            Self::Query(_) => "query",
            Self::InvalidInput(_) => "invalid_input",
            Self::ScoreOutOfRange(_) => "score_out_of_range",
            Self::CategoryMismatch { .. } => "category_mismatch",
            Self::CorruptRow(_) => "corrupt_row",
            Self::InvalidDate(_) => "invalid_date",
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::Serialization(_) => "serialization",
        }
    }
}
