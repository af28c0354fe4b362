use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use emotion_journal::analytics::{self, DailySentiment};
use emotion_journal::config::AppConfig;
use emotion_journal::file_writer::{self, write_entries};
use emotion_journal::logging::init_logging;
use emotion_journal::messages::{emoji_for, motivational_message};
use emotion_journal::utils::{format_table_date, truncate_text};
use emotion_journal::validation::InputValidator;
use emotion_journal::{
    DayRange, EmotionEntry, EntryStore, Journal, LexiconClassifier, OutputFormat, SentimentCategory,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding configuration
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if it does not exist
    Init,
    /// Classify and save a new entry
    Record {
        /// How you are feeling
        text: String,
    },
    /// List all entries, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// List entries between two calendar days, inclusive
    Range {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: String,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// Sentiment distribution and daily averages
    Stats {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<String>,
    },
    /// Most frequent words for a word cloud
    Words {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<String>,

        /// Maximum number of words
        #[arg(short, long)]
        max: Option<usize>,
    },
    /// Export all entries to a file
    Export {
        /// Output format (csv, json or txt)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file; defaults to the configured backup location
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    let log_file = config.logging.file_path.as_deref().map(Path::new);
    let _log_guard = init_logging(Some(&config.get_log_level()), log_file, &config.logging.format)?;

    let db_path = cli.database.clone().unwrap_or_else(|| config.get_database_path());
    InputValidator::validate_database_path(&db_path)?;
    debug!(path = %db_path.display(), "Using database");

    let store = EntryStore::new(&db_path).context("Failed to prepare database location")?;
    let classifier = LexiconClassifier::new()?;
    let journal = Journal::open(store, classifier).context("Failed to initialize database")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Process command
    match cli.command {
        Commands::Init => {
            info!(path = %db_path.display(), "Database ready");
        }
        Commands::Record { text } => record_entry(&journal, &text, &mut out)?,
        Commands::List { limit, format } => {
            let mut entries = journal.entries(None)?;
            if let Some(limit) = limit {
                InputValidator::validate_limit(limit)?;
                entries.truncate(limit);
            }
            print_entries(&entries, format, &mut out)?;
        }
        Commands::Range { start_date, end_date, format } => {
            let range = InputValidator::validate_date_range(
                InputValidator::parse_date(&start_date)?,
                InputValidator::parse_date(&end_date)?,
            )?;
            let entries = journal.entries(Some(range))?;
            print_entries(&entries, format, &mut out)?;
        }
        Commands::Stats { start_date, end_date } => {
            let range = resolve_range(&journal, &config, start_date.as_deref(), end_date.as_deref())?;
            let entries = journal.entries(Some(range))?;
            print_stats(&entries, range, config.dashboard.recent_entries, &mut out)?;
        }
        Commands::Words { start_date, end_date, max } => {
            let range = resolve_range(&journal, &config, start_date.as_deref(), end_date.as_deref())?;
            let entries = journal.entries(Some(range))?;
            let max_words = max.unwrap_or(config.dashboard.word_cloud_max_words);
            InputValidator::validate_limit(max_words)?;

            let words = analytics::word_frequencies(&entries, journal.classifier().processor(), max_words);
            if words.is_empty() {
                warn!("Not enough text data to build a word cloud");
            }
            for word in words {
                writeln!(out, "{:>5}  {}", word.count, word.word)?;
            }
        }
        Commands::Export { format, output } => {
            let format: OutputFormat = format.parse()?;
            let path = output.unwrap_or_else(|| config.backup_path().with_extension(format.extension()));
            export_entries(&journal, format, &path)?;
        }
    }

    Ok(())
}

/// Record an entry and report its sentiment
fn record_entry<C, W>(journal: &Journal<C>, text: &str, out: &mut W) -> Result<()>
where
    C: emotion_journal::SentimentClassifier,
    W: Write,
{
    let entry = journal.record(text)?;
    let message = motivational_message(entry.sentiment_category, &mut rand::thread_rng());

    writeln!(
        out,
        "Your emotion has been analyzed as: {} {} ({:+.2})",
        entry.sentiment_category,
        emoji_for(entry.sentiment_category),
        entry.sentiment_score
    )?;
    writeln!(out, "{message}")?;
    Ok(())
}

/// Explicit dates if given, else the span of stored entries, else the last N days
fn resolve_range<C: emotion_journal::SentimentClassifier>(
    journal: &Journal<C>,
    config: &AppConfig,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DayRange> {
    let today = Local::now().date_naive();
    let days = config.dashboard.default_range_days;
    let fallback = || journal.default_range(today, days);

    match InputValidator::parse_date_range(start, end, fallback)? {
        Some(range) => Ok(range),
        None => Ok(journal.default_range(today, days)?),
    }
}

fn print_entries<W: Write>(entries: &[EmotionEntry], format: ListFormat, out: &mut W) -> Result<()> {
    match format {
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entries)?;
            writeln!(out)?;
        }
        ListFormat::Table => {
            if entries.is_empty() {
                writeln!(out, "No entries found.")?;
                return Ok(());
            }
            writeln!(out, "{:<16}  {:<9} {:>6}  Entry", "Date", "Sentiment", "Score")?;
            for entry in entries {
                writeln!(
                    out,
                    "{:<16}  {:<9} {:>+6.2}  {}",
                    format_table_date(entry.timestamp),
                    entry.sentiment_category,
                    entry.sentiment_score,
                    truncate_text(&entry.text, 60)
                )?;
            }
        }
    }
    Ok(())
}

fn print_stats<W: Write>(
    entries: &[EmotionEntry],
    range: DayRange,
    recent_limit: usize,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Entries from {} to {}", range.start, range.end)?;
    if entries.is_empty() {
        writeln!(out, "No data available for the selected date range. Start by recording your emotions!")?;
        return Ok(());
    }

    let distribution = analytics::distribution(entries);
    writeln!(out, "\nSentiment distribution ({} entries)", distribution.total())?;
    for category in SentimentCategory::ALL {
        writeln!(
            out,
            "  {:<9} {:>5}  {:>5.1}%",
            category,
            distribution.count(category),
            distribution.share(category) * 100.0
        )?;
    }

    if let Some(average) = analytics::average_score(entries) {
        writeln!(out, "\nAverage score: {average:+.3}")?;
    }

    writeln!(out, "\nSentiment over time")?;
    for DailySentiment { date, average_score, entries: count } in analytics::daily_averages(entries) {
        writeln!(out, "  {date}  {average_score:+.3}  ({count} entries)")?;
    }

    writeln!(out, "\nRecent entries")?;
    for entry in analytics::recent(entries, recent_limit) {
        writeln!(
            out,
            "  {}  {:<9} {}",
            format_table_date(entry.timestamp),
            entry.sentiment_category,
            truncate_text(&entry.text, 60)
        )?;
    }
    Ok(())
}

fn export_entries<C: emotion_journal::SentimentClassifier>(
    journal: &Journal<C>,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    if format == OutputFormat::Csv {
        let count = file_writer::backup_to_csv(journal.store(), path)?;
        if count == 0 {
            warn!("No data to export");
        }
        return Ok(());
    }

    let entries = journal.entries(None)?;
    if entries.is_empty() {
        warn!("No data to export");
        return Ok(());
    }
    write_entries(&entries, format, path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;
    info!(count = entries.len(), path = %path.display(), "Exported entries");
    Ok(())
}
