//! Display helpers for entry text and timestamps.

use chrono::NaiveDateTime;

/// Cut `text` to at most `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Format a timestamp for display, e.g. `Mar 14, 2025 at 09:05 PM`.
#[must_use]
pub fn format_display_date(timestamp: NaiveDateTime) -> String {
    timestamp.format("%b %d, %Y at %I:%M %p").to_string()
}

/// Format a timestamp for table rows, e.g. `2025-03-14 21:05`.
#[must_use]
pub fn format_table_date(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
        // Multi-byte characters are counted, not bytes
        assert_eq!(truncate_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_format_dates() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap();
        assert_eq!(format_display_date(ts), "Mar 14, 2025 at 09:05 PM");
        assert_eq!(format_table_date(ts), "2025-03-14 21:05");
    }
}
