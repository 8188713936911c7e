use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::frequency::rank_words;
use crate::text::{round_one_decimal, TextSegmenter};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "positive", "happy", "love",
    "perfect", "best", "awesome", "brilliant", "outstanding",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "worst", "hate", "negative", "sad", "angry",
    "disappointed", "frustrated", "poor", "fail",
];

const FORMAL_MARKERS: &[&str] = &[
    "therefore", "however", "furthermore", "moreover", "consequently", "nevertheless", "thus", "hence",
];
const CASUAL_MARKERS: &[&str] = &[
    "really", "pretty", "quite", "kind of", "sort of", "like", "you know", "gonna",
];
const CONFIDENT_MARKERS: &[&str] = &[
    "definitely", "certainly", "absolutely", "clearly", "obviously", "undoubtedly",
];
const TENTATIVE_MARKERS: &[&str] = &["maybe", "perhaps", "possibly", "might", "could", "seems", "appears"];

static KEYWORD_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
        "would", "could", "should", "may", "might", "can", "this", "that", "these", "those",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Share of positive hits among all lexicon hits, 0.5 when there are none.
    pub score: f64,
    pub positive: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
    /// Percentage of kept words, one decimal.
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudienceLevel {
    Elementary,
    General,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceReport {
    pub level: AudienceLevel,
    pub score: f64,
    pub avg_words_per_sentence: f64,
    pub avg_word_length: f64,
}

/// Percentage of tokens carrying each tone's marker words.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneScores {
    pub formal: f64,
    pub casual: f64,
    pub confident: f64,
    pub tentative: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageStats {
    pub total_words: usize,
    pub unique_words: usize,
    pub vocabulary_richness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInsights {
    pub sentiment: SentimentReport,
    pub keywords: Vec<Keyword>,
    pub audience: AudienceReport,
    pub tone: ToneScores,
    pub language: LanguageStats,
}

/// Heuristic sentiment, tone, keyword and audience analysis.
pub fn analyze_insights(text: &str, keyword_limit: usize) -> TextInsights {
    TextInsights {
        sentiment: analyze_sentiment(text),
        keywords: extract_keywords(text, keyword_limit),
        audience: determine_audience(text),
        tone: analyze_tone(text),
        language: language_stats(text),
    }
}

pub fn analyze_sentiment(text: &str) -> SentimentReport {
    let lowered = text.to_lowercase();
    let mut positive = 0;
    let mut negative = 0;

    for token in TextSegmenter::raw_tokens(&lowered) {
        let clean = TextSegmenter::strip_non_word(token);
        if POSITIVE_WORDS.contains(&clean.as_str()) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&clean.as_str()) {
            negative += 1;
        }
    }

    let total = positive + negative;
    let score = if total > 0 {
        positive as f64 / total as f64
    } else {
        0.5
    };
    let sentiment = if total == 0 {
        Sentiment::Neutral
    } else if score > 0.6 {
        Sentiment::Positive
    } else if score < 0.4 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    SentimentReport {
        sentiment,
        score,
        positive,
        negative,
    }
}

pub fn extract_keywords(text: &str, limit: usize) -> Vec<Keyword> {
    let words = TextSegmenter::words(text);
    let kept: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| w.chars().count() > 3 && !KEYWORD_STOP_WORDS.contains(w))
        .collect();
    if kept.is_empty() {
        return Vec::new();
    }

    let total = kept.len() as f64;
    rank_words(kept.iter().copied(), |_| true)
        .into_iter()
        .take(limit)
        .map(|entry| Keyword {
            density: round_one_decimal(entry.count as f64 / total * 100.0),
            word: entry.word,
            count: entry.count,
        })
        .collect()
}

pub fn determine_audience(text: &str) -> AudienceReport {
    let tokens = TextSegmenter::raw_tokens(text);
    let sentences = TextSegmenter::sentences(text);
    if tokens.is_empty() || sentences.is_empty() {
        return AudienceReport {
            level: AudienceLevel::General,
            score: 0.5,
            avg_words_per_sentence: 0.0,
            avg_word_length: 0.0,
        };
    }

    let avg_words_per_sentence = tokens.len() as f64 / sentences.len() as f64;
    let avg_word_length =
        tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64;

    let (level, score) = if avg_words_per_sentence > 20.0 && avg_word_length > 6.0 {
        (AudienceLevel::Advanced, 0.8)
    } else if avg_words_per_sentence > 15.0 && avg_word_length > 5.0 {
        (AudienceLevel::Intermediate, 0.6)
    } else if avg_words_per_sentence < 10.0 && avg_word_length < 4.5 {
        (AudienceLevel::Elementary, 0.3)
    } else {
        (AudienceLevel::General, 0.5)
    };

    AudienceReport {
        level,
        score,
        avg_words_per_sentence: round_one_decimal(avg_words_per_sentence),
        avg_word_length: round_one_decimal(avg_word_length),
    }
}

pub fn analyze_tone(text: &str) -> ToneScores {
    let lowered = text.to_lowercase();
    let tokens = TextSegmenter::raw_tokens(&lowered);
    if tokens.is_empty() {
        return ToneScores::default();
    }

    let score = |markers: &[&str]| {
        let hits = tokens
            .iter()
            .filter(|token| markers.iter().any(|m| token.contains(m)))
            .count();
        (hits as f64 / tokens.len() as f64 * 100.0).min(100.0)
    };

    ToneScores {
        formal: score(FORMAL_MARKERS),
        casual: score(CASUAL_MARKERS),
        confident: score(CONFIDENT_MARKERS),
        tentative: score(TENTATIVE_MARKERS),
    }
}

pub fn language_stats(text: &str) -> LanguageStats {
    let words = TextSegmenter::words(text);
    if words.is_empty() {
        return LanguageStats::default();
    }
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    LanguageStats {
        total_words: words.len(),
        unique_words: unique.len(),
        vocabulary_richness: round_one_decimal(unique.len() as f64 / words.len() as f64 * 100.0),
    }
}
