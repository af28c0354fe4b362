//! Emotion Journal - Sentiment-tagged Journal Entries
//!
//! A Rust library for recording free-text emotion entries, classifying their
//! sentiment and querying them back by calendar day.
//!
//! # Features
//!
//! - SQLite entry store with inclusive calendar-day range queries
//! - Lexicon-based sentiment classification behind a pluggable trait
//! - Distribution, daily average and word frequency aggregates
//! - CSV, JSON and text export

/// Aggregates over stored entries
pub mod analytics;
/// Configuration management
pub mod config;
/// Entry store
pub mod db;
/// Error types
pub mod error;
/// Entry export
pub mod file_writer;
/// Logging setup and utilities
pub mod logging;
/// Motivational messages, colors and emoji
pub mod messages;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Text processing and sentiment scoring
pub mod nlp;
/// Database schema definitions
pub mod schema;
/// Classification and storage of new entries
pub mod service;
/// Display helpers
pub mod utils;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use db::{Clock, EntryStore, SystemClock};
pub use error::{JournalError, Result};
pub use models::{DayRange, EmotionEntry, OutputFormat, Sentiment, SentimentCategory};
pub use nlp::{LexiconClassifier, SentimentClassifier, TextProcessor};
pub use service::Journal;
