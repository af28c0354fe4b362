use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "EMOTION_JOURNAL_DB";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Settings for the journal, layered from defaults, files and environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Entry store settings
    pub database: DatabaseConfig,
    /// Log level, format and optional file
    pub logging: LoggingConfig,
    /// Defaults for the summary views
    pub dashboard: DashboardConfig,
    /// Backup location
    pub export: ExportConfig,
}

/// Database section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: String,
}

/// Logging section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level, e.g. "info"
    pub level: String,
    /// Rolling JSON log file, if any
    pub file_path: Option<String>,
    /// "text" or "json"
    pub format: String,
}

/// Dashboard section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows in the recent entries table
    pub recent_entries: usize,
    /// Days shown when the store is empty
    pub default_range_days: u32,
    /// Most words listed by `words`
    pub word_cloud_max_words: usize,
}

/// Export section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to
    pub output_directory: String,
    /// File name of the CSV backup
    pub backup_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "data/emotions.db".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            dashboard: DashboardConfig {
                recent_entries: 5,
                default_range_days: 30,
                word_cloud_max_words: 100,
            },
            export: ExportConfig {
                output_directory: "./output".to_string(),
                backup_file_name: "emotions_backup.csv".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, later sources overriding earlier ones
    ///
    /// Defaults, then `config/default.*`, `config/local.*`, `emotion_journal.*`,
    /// then `EMOTION_JOURNAL__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        Self::build(None)
    }

    /// Load configuration with an explicit file layered over the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(Some(path))
    }

    fn build(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        for name in ["config/default", "config/local", "emotion_journal"] {
            builder = builder.add_source(File::with_name(name).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let loaded: Self = builder
            .add_source(
                Environment::with_prefix("EMOTION_JOURNAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the application cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.database.path.trim().is_empty(), "database.path must not be empty");

        ensure!(
            LOG_LEVELS.contains(&self.logging.level.as_str()),
            "logging.level {:?} is not one of {LOG_LEVELS:?}",
            self.logging.level
        );
        ensure!(
            LOG_FORMATS.contains(&self.logging.format.as_str()),
            "logging.format {:?} is not one of {LOG_FORMATS:?}",
            self.logging.format
        );

        let dashboard = &self.dashboard;
        ensure!(dashboard.recent_entries > 0, "dashboard.recent_entries must be positive");
        ensure!(dashboard.default_range_days > 0, "dashboard.default_range_days must be positive");
        ensure!(
            dashboard.word_cloud_max_words > 0,
            "dashboard.word_cloud_max_words must be positive"
        );

        ensure!(
            !self.export.backup_file_name.trim().is_empty(),
            "export.backup_file_name must not be empty"
        );
        Ok(())
    }

    /// Database file, honouring the `EMOTION_JOURNAL_DB` override
    pub fn get_database_path(&self) -> PathBuf {
        std::env::var(DATABASE_PATH_ENV)
            .map_or_else(|_| PathBuf::from(&self.database.path), PathBuf::from)
    }

    /// `RUST_LOG` if set, else the configured level
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Default location of the CSV backup
    pub fn backup_path(&self) -> PathBuf {
        Path::new(&self.export.output_directory).join(&self.export.backup_file_name)
    }
}
