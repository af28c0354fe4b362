use chrono::NaiveDate;
use tracing::info;

use crate::db::EntryStore;
use crate::error::Result;
use crate::models::{DayRange, EmotionEntry};
use crate::nlp::SentimentClassifier;
use crate::validation::InputValidator;

/// Records entries by classifying text and handing the result to the store
pub struct Journal<C> {
    store: EntryStore,
    classifier: C,
}

impl<C: SentimentClassifier> Journal<C> {
    /// Wrap an already initialized store
    pub const fn new(store: EntryStore, classifier: C) -> Self {
        Self { store, classifier }
    }

    /// Prepare storage; call once before anything else
    pub fn open(store: EntryStore, classifier: C) -> Result<Self> {
        store.initialize()?;
        Ok(Self::new(store, classifier))
    }

    /// The underlying entry store
    pub const fn store(&self) -> &EntryStore {
        &self.store
    }

    /// The classifier applied to new entries
    pub const fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Validate, classify and save a new entry
    pub fn record(&self, text: &str) -> Result<EmotionEntry> {
        let text = InputValidator::validate_entry_text(text)?;
        let sentiment = self.classifier.classify(&text);
        let entry = self.store.save_sentiment(&text, sentiment)?;

        info!(
            id = entry.id,
            category = %entry.sentiment_category,
            score = entry.sentiment_score,
            "Recorded entry"
        );
        Ok(entry)
    }

    /// All entries, or those within `range`, newest first
    pub fn entries(&self, range: Option<DayRange>) -> Result<Vec<EmotionEntry>> {
        match range {
            Some(range) => self.store.list_in_range(range.start, range.end),
            None => self.store.list_all(),
        }
    }

    /// Range spanning every stored entry, or the `days` days ending `today` when empty
    pub fn default_range(&self, today: NaiveDate, days: u32) -> Result<DayRange> {
        Ok(self
            .store
            .date_span()?
            .unwrap_or_else(|| DayRange::last_days(today, days)))
    }
}
