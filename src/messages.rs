//! Fixed message, color and emoji tables per sentiment category

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::SentimentCategory;

const POSITIVE_MESSAGES: [&str; 5] = [
    "Keep up the positive energy! It's contagious!",
    "Your positive outlook brightens everyone's day!",
    "Wonderful! Positivity leads to possibilities!",
    "That's the spirit! Keep embracing the good vibes!",
    "Fantastic! Your positive energy is your superpower!",
];

const NEGATIVE_MESSAGES: [&str; 5] = [
    "Remember, every cloud has a silver lining. Tomorrow is a new day!",
    "It's okay to feel down sometimes. Be kind to yourself today.",
    "Difficult times often lead to the greatest personal growth.",
    "Your feelings are valid. Take the time you need to process them.",
    "This too shall pass. You've overcome challenges before!",
];

const NEUTRAL_MESSAGES: [&str; 5] = [
    "Balance is key. You're doing great!",
    "Steady and calm - that's a good approach to life!",
    "Sometimes neutral is exactly what we need. Keep going!",
    "A balanced mind leads to balanced decisions. You're on the right track!",
    "Mindfulness and awareness - you're practicing important skills!",
];

/// Every message that may be shown for `category`
#[must_use]
pub const fn messages_for(category: SentimentCategory) -> &'static [&'static str] {
    match category {
        SentimentCategory::Positive => &POSITIVE_MESSAGES,
        SentimentCategory::Negative => &NEGATIVE_MESSAGES,
        SentimentCategory::Neutral => &NEUTRAL_MESSAGES,
    }
}

/// A randomly chosen encouraging message for `category`
pub fn motivational_message<R: Rng + ?Sized>(category: SentimentCategory, rng: &mut R) -> &'static str {
    messages_for(category)
        .choose(rng)
        .copied()
        .unwrap_or("Thanks for checking in.")
}

/// Hex color used for `category` in charts
#[must_use]
pub const fn color_for(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "#4CAF50",
        SentimentCategory::Negative => "#F44336",
        SentimentCategory::Neutral => "#2196F3",
    }
}

/// Emoji shown next to `category`
#[must_use]
pub const fn emoji_for(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "😊",
        SentimentCategory::Negative => "😔",
        SentimentCategory::Neutral => "😐",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_message_comes_from_category_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in SentimentCategory::ALL {
            for _ in 0..20 {
                let message = motivational_message(category, &mut rng);
                assert!(messages_for(category).contains(&message));
            }
        }
    }

    #[test]
    fn test_colors_are_distinct() {
        assert_ne!(
            color_for(SentimentCategory::Positive),
            color_for(SentimentCategory::Negative)
        );
        assert_eq!(color_for(SentimentCategory::Neutral), "#2196F3");
        assert_eq!(emoji_for(SentimentCategory::Positive), "😊");
    }
}
