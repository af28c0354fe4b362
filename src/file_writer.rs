//! File writing utilities for entry export.
//!
//! Exports are read-only projections of the store: the CSV backup carries the
//! columns `timestamp, text, category, score`, alongside JSON and plain text
//! renderings of the same entries.

use crate::db::EntryStore;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{EmotionEntry, OutputFormat};
use crate::schema::TIMESTAMP_FORMAT;
use csv::Writer;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Header row of CSV exports
pub const CSV_HEADER: [&str; 4] = ["timestamp", "text", "category", "score"];

/// Write entries to a file in the specified format.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn write_entries(entries: &[EmotionEntry], format: OutputFormat, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    let file = File::create(file_path)?;
    match format {
        OutputFormat::Txt => write_txt(entries, file),
        OutputFormat::Csv => write_csv(entries, file),
        OutputFormat::Json => write_json(entries, file),
    }?;

    MetricsCollector::default().record_export(format.extension(), entries.len());
    Ok(())
}

/// Dump every stored entry to a CSV file at `file_path`.
///
/// Returns the number of entries written. An empty store writes no file and
/// returns 0.
pub fn backup_to_csv(store: &EntryStore, file_path: &Path) -> Result<usize> {
    let entries = store.list_all()?;
    if entries.is_empty() {
        info!("No entries to back up");
        return Ok(0);
    }

    write_entries(&entries, OutputFormat::Csv, file_path)?;
    info!(count = entries.len(), path = %file_path.display(), "Backed up entries");
    Ok(entries.len())
}

/// Write entries as CSV with a header row.
pub fn write_csv<W: Write>(entries: &[EmotionEntry], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry.text.clone(),
            entry.sentiment_category.to_string(),
            entry.sentiment_score.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write entries as a pretty-printed JSON array.
pub fn write_json<W: Write>(entries: &[EmotionEntry], out: W) -> Result<()> {
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}

/// Write entries as text, one entry per line.
///
/// Format: `timestamp [category score] text`
pub fn write_txt<W: Write>(entries: &[EmotionEntry], out: W) -> Result<()> {
    let mut writer = BufWriter::new(out);

    for entry in entries {
        writeln!(
            writer,
            "{} [{} {:+.2}] {}",
            entry.timestamp.format(TIMESTAMP_FORMAT),
            entry.sentiment_category,
            entry.sentiment_score,
            entry.text
        )?;
    }

    writer.flush()?;
    Ok(())
}
