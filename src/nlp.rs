use anyhow::{Context, Result};
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};
use stop_words::{get, LANGUAGE};
use unicode_normalization::UnicodeNormalization;

use crate::models::Sentiment;

/// Scores free text for sentiment polarity
///
/// Implementations must be deterministic for identical input and return a
/// score in [-1.0, 1.0].
pub trait SentimentClassifier {
    /// Polarity of `text` in [-1.0, 1.0]
    fn score(&self, text: &str) -> f64;

    /// Score `text` and derive its category
    fn classify(&self, text: &str) -> Sentiment {
        let score = self.score(text);
        let clamped = if score.is_finite() { score.clamp(-1.0, 1.0) } else { 0.0 };
        Sentiment::from_score(clamped).unwrap_or(Sentiment::NEUTRAL)
    }
}

/// Text cleaning and tokenization shared by classification and word counts
pub struct TextProcessor {
    links: Regex,
    pictographs: Regex,
    apostrophes: Regex,
    punctuation: Regex,
    whitespace: Regex,
    stopwords: HashSet<String>,
}

impl TextProcessor {
    /// Create a processor with the English stop word list
    pub fn new() -> Result<Self> {
        Ok(Self {
            links: Regex::new(r"https?://\S+|www\.\S+").context("invalid link pattern")?,
            pictographs: Regex::new(r"\p{Extended_Pictographic}")
                .context("invalid pictograph pattern")?,
            apostrophes: Regex::new(r"['\u{2019}]").context("invalid apostrophe pattern")?,
            punctuation: Regex::new(r"[^\w\s]").context("invalid punctuation pattern")?,
            whitespace: Regex::new(r"\s+").context("invalid whitespace pattern")?,
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Lowercased text with links, pictographs and punctuation replaced by spaces
    ///
    /// Apostrophes are dropped rather than split on, so "don't" becomes "dont".
    #[must_use]
    pub fn clean_text(&self, text: &str) -> String {
        let composed = text.nfc().collect::<String>();
        let text = self.links.replace_all(&composed, " ");
        let text = self.pictographs.replace_all(&text, " ");
        let text = self.apostrophes.replace_all(&text, "");
        let text = self.punctuation.replace_all(&text, " ");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_lowercase()
    }

    /// Split cleaned text into words, dropping stop words
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|word| !self.is_stopword(word))
            .map(ToString::to_string)
            .collect()
    }

    /// Whether `word` is on the English stop word list
    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

// Word weights on a 0..2 scale, grouped by weight.
const LEXICON: &[(f64, &[&str])] = &[
    (2.0, &["excellent", "amazing", "love", "perfect"]),
    (1.8, &["wonderful", "fantastic", "awesome", "brilliant", "thrilled"]),
    (1.6, &["beautiful"]),
    (
        1.5,
        &[
            "great", "joy", "best", "delightful", "excited", "grateful", "thankful", "blessed",
            "successful",
        ],
    ),
    (
        1.2,
        &["happy", "better", "peaceful", "proud", "hopeful", "pleased", "energized", "confident"],
    ),
    (1.0, &["good", "relaxed", "satisfied", "lucky", "fun", "nice"]),
    (0.8, &["calm"]),
    (0.6, &["like"]),
    (-0.8, &["tired"]),
    (-1.0, &["bad", "dislike", "nervous"]),
    (
        -1.2,
        &[
            "poor", "sad", "upset", "annoyed", "irritated", "exhausted", "worried", "anxious",
            "afraid",
        ],
    ),
    (-1.4, &["unhappy", "lonely", "stressed", "hurt", "overwhelmed"]),
    (-1.5, &["disappointed", "angry", "frustrated", "scared", "useless"]),
    (-1.8, &["depressed", "miserable", "hopeless", "worthless"]),
    (
        -2.0,
        &["terrible", "awful", "horrible", "worst", "hate", "furious", "devastated"],
    ),
];

// Multipliers applied to the word that follows.
const INTENSIFIERS: &[(f64, &[&str])] = &[
    (2.0, &["extremely", "incredibly", "absolutely"]),
    (1.8, &["completely", "totally"]),
    (1.5, &["very"]),
    (1.3, &["really"]),
    (1.2, &["so", "quite"]),
    (1.1, &["rather"]),
    (0.8, &["somewhat"]),
    (0.7, &["slightly"]),
    (0.5, &["barely"]),
];

// Apostrophes are already stripped when these are matched.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "dont", "didnt",
    "doesnt", "isnt", "wasnt", "arent", "werent", "cant", "cannot", "wont", "hardly",
];

const MAX_WEIGHT: f64 = 2.0;
const NEGATION_DAMPING: f64 = 0.8;
const NEGATION_WINDOW: usize = 2;

/// Lexicon-based polarity scorer
///
/// Words are matched by stem, so "loved" and "loving" count as "love". A
/// preceding intensifier scales a word's weight and a negation within the two
/// preceding words flips it.
pub struct LexiconClassifier {
    processor: TextProcessor,
    stemmer: Stemmer,
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconClassifier {
    /// Create a classifier with the built-in English lexicon
    pub fn new() -> Result<Self> {
        let stemmer = Stemmer::create(Algorithm::English);
        let lexicon = LEXICON
            .iter()
            .flat_map(|&(weight, words)| words.iter().map(move |word| (word, weight)))
            .map(|(word, weight)| (stemmer.stem(word).into_owned(), weight))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .flat_map(|&(factor, words)| words.iter().map(move |word| (*word, factor)))
            .collect();

        Ok(Self {
            processor: TextProcessor::new()?,
            stemmer,
            lexicon,
            intensifiers,
        })
    }

    /// The text processor used for cleaning
    #[must_use]
    pub const fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    fn weight(&self, word: &str) -> Option<f64> {
        self.lexicon.get(&*self.stemmer.stem(word)).copied()
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn score(&self, text: &str) -> f64 {
        let cleaned = self.processor.clean_text(text);
        let words: Vec<&str> = cleaned.split_whitespace().collect();

        let mut sum = 0.0;
        let mut matched = 0_u32;

        for (i, word) in words.iter().enumerate() {
            let Some(mut weight) = self.weight(word) else {
                continue;
            };

            if let Some(factor) = i
                .checked_sub(1)
                .and_then(|prev| self.intensifiers.get(words[prev]))
            {
                weight *= factor;
            }

            if words[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|w| NEGATIONS.contains(w))
            {
                weight = -weight * NEGATION_DAMPING;
            }

            sum += weight;
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (sum / f64::from(matched) / MAX_WEIGHT).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentCategory;

    fn classifier() -> LexiconClassifier {
        LexiconClassifier::new().expect("Failed to create classifier")
    }

    #[test]
    fn test_clean_text_strips_links_and_pictographs() {
        let processor = TextProcessor::new().unwrap();

        let cleaned = processor.clean_text("Read https://example.com/post later 🌧️ ok");
        assert_eq!(cleaned, "read later ok");

        assert_eq!(processor.clean_text("I don't know"), "i dont know");
        assert_eq!(processor.clean_text("  lots\tof   gaps "), "lots of gaps");
        // Digits survive cleaning
        assert_eq!(processor.clean_text("ran 5km!"), "ran 5km");
    }

    #[test]
    fn test_tokenize_keeps_content_words() {
        let processor = TextProcessor::new().unwrap();
        let tokens = processor.tokenize("this is a journal entry about the harbor");

        assert!(processor.is_stopword("this"));
        assert!(!tokens.contains(&"this".to_string()));
        assert!(tokens.contains(&"journal".to_string()));
        assert!(tokens.contains(&"harbor".to_string()));
    }

    #[test]
    fn test_polarity() {
        let classifier = classifier();

        assert!(classifier.score("I love this, it's amazing and wonderful") > 0.1);
        assert!(classifier.score("This is terrible and I hate it") < -0.1);
        assert_eq!(classifier.score("The bus was late again"), 0.0);
    }

    #[test]
    fn test_intensifier_scales_weight() {
        let classifier = classifier();
        assert!(classifier.score("very good") > classifier.score("good"));
        assert!(classifier.score("barely good") < classifier.score("good"));
    }

    #[test]
    fn test_negation_flips_sentiment() {
        let classifier = classifier();

        assert!(classifier.score("I am happy") > 0.0);
        assert!(classifier.score("I am not happy") < 0.0);
        assert!(classifier.score("I don't feel good") < 0.0);
    }

    #[test]
    fn test_stems_match_inflections() {
        let classifier = classifier();
        assert!(classifier.score("I loved it") > 0.1);
        assert_eq!(
            classifier.classify("hated every minute").category(),
            SentimentCategory::Negative
        );
    }
}
