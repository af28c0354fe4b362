use chrono::NaiveDate;
use std::path::Path;

use crate::error::{JournalError, Result};
use crate::models::DayRange;

/// Date format accepted on input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate entry text, returning the sanitized form that should be stored
    pub fn validate_entry_text(text: &str) -> Result<String> {
        if text.contains('\0') {
            return Err(JournalError::InvalidInput(
                "Entry text contains a NUL byte".to_string(),
            ));
        }

        let sanitized = Self::sanitize_text(text);
        if sanitized.is_empty() {
            return Err(JournalError::InvalidInput(
                "Please enter some text before submitting".to_string(),
            ));
        }

        Ok(sanitized)
    }

    /// Parse a calendar date in `YYYY-MM-DD` form
    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
            JournalError::InvalidDate(format!("{value:?} is not a YYYY-MM-DD date: {e}"))
        })
    }

    /// Validate date range
    pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<DayRange> {
        if start > end {
            return Err(JournalError::InvalidDate(format!(
                "Start date {start} cannot be after end date {end}"
            )));
        }

        // Warn about very large date ranges
        let days = (end - start).num_days();
        if days > 365 * 10 {
            tracing::warn!(days, "Date range spans more than ten years");
        }

        Ok(DayRange::new(start, end))
    }

    /// Parse optional start and end strings into a range
    ///
    /// Returns `None` when neither bound is given; a single missing bound is
    /// filled from `fallback`.
    pub fn parse_date_range(
        start: Option<&str>,
        end: Option<&str>,
        fallback: impl FnOnce() -> Result<DayRange>,
    ) -> Result<Option<DayRange>> {
        let (start, end) = match (start, end) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => (Self::parse_date(start)?, Self::parse_date(end)?),
            (Some(start), None) => (Self::parse_date(start)?, fallback()?.end),
            (None, Some(end)) => (fallback()?.start, Self::parse_date(end)?),
        };
        Self::validate_date_range(start, end).map(Some)
    }

    /// Validate the database file path
    pub fn validate_database_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(JournalError::InvalidInput("Database path cannot be empty".to_string()));
        }

        if path.is_dir() {
            return Err(JournalError::InvalidInput(format!(
                "Database path is a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Validate a row limit
    pub fn validate_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(JournalError::InvalidInput(
                "Limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Sanitize text input
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
