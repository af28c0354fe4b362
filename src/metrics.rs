use std::time::{Duration, Instant};

use metrics::{counter, histogram};

use crate::models::SentimentCategory;

/// Metric names emitted by the journal
///
/// Values go to whatever recorder the binary installs; without one every call
/// is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    // Store metrics
    /// Counter of store calls by operation and outcome
    pub store_operations_total: &'static str,
    /// Histogram of store call durations in seconds
    pub store_operation_duration: &'static str,

    // Entry metrics
    /// Counter of saved entries by category
    pub entries_recorded_total: &'static str,
    /// Histogram of saved scores
    pub sentiment_scores: &'static str,
    /// Histogram of saved text lengths in bytes
    pub entry_text_length: &'static str,

    // Export metrics
    /// Counter of exported entries by format
    pub entries_exported_total: &'static str,

    // Error metrics
    /// Counter of failures by error kind and operation
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            store_operations_total: "emotion_journal_store_operations_total",
            store_operation_duration: "emotion_journal_store_operation_duration_seconds",

            entries_recorded_total: "emotion_journal_entries_recorded_total",
            sentiment_scores: "emotion_journal_sentiment_scores",
            entry_text_length: "emotion_journal_entry_text_length",

            entries_exported_total: "emotion_journal_entries_exported_total",

            errors_total: "emotion_journal_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Record a store operation and its outcome
    pub fn record_store_operation(&self, operation: &'static str, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };

        counter!(self.store_operations_total, "operation" => operation, "status" => status)
            .increment(1);
        histogram!(self.store_operation_duration, "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Record a newly stored entry
    pub fn record_entry(&self, category: SentimentCategory, score: f64, text_length: usize) {
        counter!(self.entries_recorded_total, "category" => category.as_str()).increment(1);
        histogram!(self.sentiment_scores).record(score);
        histogram!(self.entry_text_length).record(text_length as f64);
    }

    /// Record entries written by an export
    pub fn record_export(&self, format: &'static str, count: usize) {
        counter!(self.entries_exported_total, "format" => format).increment(count as u64);
    }

    /// Record an error by kind
    pub fn record_error(&self, error_type: &'static str, operation: &'static str) {
        counter!(self.errors_total, "type" => error_type, "operation" => operation).increment(1);
    }
}

/// Times a store operation and records it on `finish`
pub struct MetricsTimer {
    collector: MetricsCollector,
    operation: &'static str,
    start: Instant,
}

impl MetricsTimer {
    /// Start timing `operation`
    pub fn new(collector: MetricsCollector, operation: &'static str) -> Self {
        Self {
            collector,
            operation,
            start: Instant::now(),
        }
    }

    /// Record the elapsed time and outcome
    pub fn finish(self, success: bool) -> Duration {
        let duration = self.start.elapsed();
        self.collector
            .record_store_operation(self.operation, duration, success);
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_names() {
        let collector = MetricsCollector::default();
        assert_eq!(
            collector.store_operations_total,
            "emotion_journal_store_operations_total"
        );
        assert!(collector.errors_total.starts_with("emotion_journal_"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::default();
        collector.record_entry(SentimentCategory::Neutral, 0.0, 12);
        collector.record_export("csv", 3);
        collector.record_error("query", "list_all");

        let timer = MetricsTimer::new(collector, "save");
        let elapsed = timer.finish(true);
        assert!(elapsed < Duration::from_secs(5));
    }
}
