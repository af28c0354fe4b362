//! Database schema definitions
//!
//! Constants for table and column names used with rusqlite.

/// Emotions table schema
pub mod emotions {
    /// Table name
    pub const TABLE: &str = "emotions";
    /// Primary key column
    pub const ID: &str = "id";
    /// Creation timestamp column, `YYYY-MM-DD HH:MM:SS` local time
    pub const DATE: &str = "date";
    /// Entry text column
    pub const TEXT: &str = "text";
    /// Sentiment category column
    pub const SENTIMENT: &str = "sentiment";
    /// Polarity score column
    pub const SENTIMENT_SCORE: &str = "sentiment_score";
    /// Index on the timestamp column
    pub const DATE_INDEX: &str = "idx_emotions_date";
}

/// Format of timestamps stored in the `date` column
///
/// Lexicographic order of this format matches chronological order, which the
/// range and ordering queries rely on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// DDL creating the emotions table and its index when absent
#[must_use]
pub fn create_statements() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            {id} INTEGER PRIMARY KEY AUTOINCREMENT,
            {date} TIMESTAMP NOT NULL,
            {text} TEXT NOT NULL,
            {sentiment} TEXT NOT NULL,
            {score} REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS {index} ON {table} ({date});",
        table = emotions::TABLE,
        id = emotions::ID,
        date = emotions::DATE,
        text = emotions::TEXT,
        sentiment = emotions::SENTIMENT,
        score = emotions::SENTIMENT_SCORE,
        index = emotions::DATE_INDEX,
    )
}
