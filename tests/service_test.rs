use chrono::NaiveDate;
use mockall::mock;
use tempfile::{tempdir, TempDir};

use emotion_journal::{
    DayRange, EntryStore, Journal, JournalError, LexiconClassifier, SentimentCategory,
    SentimentClassifier,
};

mock! {
    pub Classifier {}

    impl SentimentClassifier for Classifier {
        fn score(&self, text: &str) -> f64;
    }
}

fn open_journal<C: SentimentClassifier>(classifier: C) -> (TempDir, Journal<C>) {
    let dir = tempdir().expect("Failed to create temp directory");
    let store = EntryStore::new(dir.path().join("journal.db")).expect("Failed to create store");
    let journal = Journal::open(store, classifier).expect("Failed to open journal");
    (dir, journal)
}

#[test]
fn test_record_classifies_sanitized_text() {
    let mut classifier = MockClassifier::new();
    classifier
        .expect_score()
        .withf(|text| text == "feeling great")
        .times(1)
        .return_const(0.5);

    let (_dir, journal) = open_journal(classifier);
    let entry = journal.record("  feeling great \u{7} ").unwrap();

    assert_eq!(entry.text, "feeling great");
    assert_eq!(entry.sentiment_category, SentimentCategory::Positive);
    assert_eq!(entry.sentiment_score, 0.5);

    let stored = journal.entries(None).unwrap();
    assert_eq!(stored, vec![entry]);
}

#[test]
fn test_record_clamps_out_of_range_scores() {
    let mut classifier = MockClassifier::new();
    classifier.expect_score().return_const(3.0);

    let (_dir, journal) = open_journal(classifier);
    let entry = journal.record("overjoyed").unwrap();
    assert_eq!(entry.sentiment_score, 1.0);
    assert_eq!(entry.sentiment_category, SentimentCategory::Positive);
}

#[test]
fn test_record_treats_nan_as_neutral() {
    let mut classifier = MockClassifier::new();
    classifier.expect_score().return_const(f64::NAN);

    let (_dir, journal) = open_journal(classifier);
    let entry = journal.record("hmm").unwrap();
    assert_eq!(entry.sentiment_score, 0.0);
    assert_eq!(entry.sentiment_category, SentimentCategory::Neutral);
}

#[test]
fn test_record_rejects_blank_text_without_classifying() {
    let mut classifier = MockClassifier::new();
    classifier.expect_score().times(0);

    let (_dir, journal) = open_journal(classifier);
    let err = journal.record("   \n ").unwrap_err();
    assert!(matches!(err, JournalError::InvalidInput(_)));
    assert!(journal.entries(None).unwrap().is_empty());
}

#[test]
fn test_entries_filters_by_range() {
    let (_dir, journal) = open_journal(LexiconClassifier::new().unwrap());
    journal.record("I love sunny mornings").unwrap();

    let entry_day = journal.entries(None).unwrap()[0].date();
    assert_eq!(journal.entries(Some(DayRange::day(entry_day))).unwrap().len(), 1);

    let long_ago = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    assert!(journal.entries(Some(DayRange::day(long_ago))).unwrap().is_empty());
}

#[test]
fn test_default_range_without_entries_uses_recent_days() {
    let (_dir, journal) = open_journal(LexiconClassifier::new().unwrap());
    let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

    let range = journal.default_range(today, 30).unwrap();
    assert_eq!(range.end, today);
    assert!(range.start < today);
}

#[test]
fn test_default_range_spans_stored_entries() {
    let (_dir, journal) = open_journal(LexiconClassifier::new().unwrap());
    journal.record("quiet day").unwrap();
    let recorded = journal.entries(None).unwrap()[0].date();

    let range = journal
        .default_range(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(), 30)
        .unwrap();
    assert_eq!(range, DayRange::day(recorded));
}
