use chrono::{NaiveDate, NaiveDateTime};

use emotion_journal::analytics::{
    average_score, daily_averages, distribution, recent, word_frequencies, WordCount,
};
use emotion_journal::{EmotionEntry, SentimentCategory, TextProcessor};

fn entry(id: i64, at: &str, text: &str, score: f64) -> EmotionEntry {
    EmotionEntry {
        id,
        timestamp: NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").unwrap(),
        text: text.to_string(),
        sentiment_category: SentimentCategory::from_score(score),
        sentiment_score: score,
    }
}

fn sample() -> Vec<EmotionEntry> {
    vec![
        entry(4, "2025-03-15 08:00:00", "coffee in the garden, coffee again", 0.5),
        entry(3, "2025-03-14 20:00:00", "rainy evening", -0.3),
        entry(2, "2025-03-14 09:00:00", "morning coffee", 0.1),
        entry(1, "2025-03-13 12:00:00", "garden visited", 0.7),
    ]
}

#[test]
fn test_distribution_counts_each_category() {
    let dist = distribution(&sample());
    assert_eq!(dist.positive, 2);
    assert_eq!(dist.negative, 1);
    assert_eq!(dist.neutral, 1);
    assert_eq!(dist.total(), 4);
    assert!((dist.share(SentimentCategory::Positive) - 0.5).abs() < 1e-9);

    let empty = distribution(&[]);
    assert_eq!(empty.total(), 0);
    assert_eq!(empty.share(SentimentCategory::Neutral), 0.0);
}

#[test]
fn test_average_score() {
    assert_eq!(average_score(&[]), None);
    let average = average_score(&sample()).unwrap();
    assert!((average - 0.25).abs() < 1e-9);
}

#[test]
fn test_daily_averages_are_oldest_first() {
    let days = daily_averages(&sample());
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 3, 13).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        ]
    );
    assert_eq!(days[1].entries, 2);
    assert!((days[1].average_score - -0.1).abs() < 1e-9);
}

#[test]
fn test_recent_limits_and_orders() {
    let mut entries = sample();
    entries.reverse();

    let latest = recent(&entries, 2);
    let ids: Vec<i64> = latest.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![4, 3]);
    assert_eq!(recent(&entries, 10).len(), 4);
}

#[test]
fn test_word_frequencies() {
    let processor = TextProcessor::new().unwrap();
    let words = word_frequencies(&sample(), &processor, 2);

    assert_eq!(
        words,
        vec![
            WordCount { word: "coffee".to_string(), count: 3 },
            WordCount { word: "garden".to_string(), count: 2 },
        ]
    );
    assert!(word_frequencies(&[], &processor, 10).is_empty());
}
