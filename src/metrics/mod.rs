//! Document statistics and readability scoring
//!
//! - `readability`: syllable estimation, Flesch reading ease and score bands
//! - `frequency`: stop words and ranked word counts
//! - `insights`: sentiment, tone, keyword and audience heuristics
//!
//! Everything here is a pure function of the input text. Degenerate input
//! produces a zeroed bundle, never an error.

pub mod frequency;
pub mod insights;
pub mod readability;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::text::{offsets, round_one_decimal, TextSegmenter};

pub use frequency::WordCount;
pub use insights::{analyze_insights, TextInsights};
pub use readability::{count_syllables, Difficulty, GradeLevel};

const ADVANCED_WORD_LENGTH: f64 = 6.0;
const ADVANCED_SENTENCE_LENGTH: f64 = 20.0;
const INTERMEDIATE_WORD_LENGTH: f64 = 5.0;
const INTERMEDIATE_SENTENCE_LENGTH: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

impl Complexity {
    /// Bucket text by average word length and average sentence length.
    pub fn classify(avg_word_length: f64, avg_sentence_length: f64) -> Self {
        if avg_word_length > ADVANCED_WORD_LENGTH && avg_sentence_length > ADVANCED_SENTENCE_LENGTH {
            Complexity::Advanced
        } else if avg_word_length > INTERMEDIATE_WORD_LENGTH
            || avg_sentence_length > INTERMEDIATE_SENTENCE_LENGTH
        {
            Complexity::Intermediate
        } else {
            Complexity::Basic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Complexity::Basic => "Basic",
            Complexity::Intermediate => "Intermediate",
            Complexity::Advanced => "Advanced",
        }
    }
}

/// Tunables for the metrics engine
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsOptions {
    pub top_words: usize,
    pub reading_wpm: usize,
    pub speaking_wpm: usize,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            top_words: 10,
            reading_wpm: 200,
            speaking_wpm: 150,
        }
    }
}

/// Snapshot of document statistics for one version of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub word_count: usize,
    pub character_count: usize,
    pub characters_no_spaces: usize,
    /// Raw sentence count, zero when the text has no content.
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub average_words_per_sentence: f64,
    pub average_sentences_per_paragraph: f64,
    pub average_word_length: f64,
    pub average_syllables_per_word: f64,
    pub total_syllables: usize,
    pub readability_score: u8,
    pub grade_level: GradeLevel,
    pub difficulty: Difficulty,
    pub complexity: Complexity,
    pub longest_word: Option<String>,
    pub shortest_word: Option<String>,
    pub top_words: Vec<WordCount>,
    pub reading_time_minutes: usize,
    pub speaking_time_minutes: usize,
}

impl MetricsBundle {
    /// The bundle reported for text without any words.
    pub fn empty(character_count: usize, characters_no_spaces: usize) -> Self {
        Self {
            word_count: 0,
            character_count,
            characters_no_spaces,
            sentence_count: 0,
            paragraph_count: 0,
            average_words_per_sentence: 0.0,
            average_sentences_per_paragraph: 0.0,
            average_word_length: 0.0,
            average_syllables_per_word: 0.0,
            total_syllables: 0,
            readability_score: 0,
            grade_level: GradeLevel::Unrated,
            difficulty: Difficulty::Unknown,
            complexity: Complexity::Basic,
            longest_word: None,
            shortest_word: None,
            top_words: Vec::new(),
            reading_time_minutes: 0,
            speaking_time_minutes: 0,
        }
    }
}

impl Default for MetricsBundle {
    fn default() -> Self {
        Self::empty(0, 0)
    }
}

/// A bundle stamped with the time it was exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: MetricsBundle,
}

impl MetricsReport {
    pub fn new(metrics: MetricsBundle) -> Self {
        Self {
            generated_at: Utc::now(),
            metrics,
        }
    }
}

/// Computes `MetricsBundle`s from raw text
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    options: MetricsOptions,
}

impl MetricsEngine {
    pub fn new(options: MetricsOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MetricsOptions {
        &self.options
    }

    pub fn compute(&self, text: &str) -> MetricsBundle {
        let character_count = offsets::char_len(text);
        let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();

        let words = TextSegmenter::words(text);
        if words.is_empty() {
            debug!("No words found, returning empty metrics");
            return MetricsBundle::empty(character_count, characters_no_spaces);
        }

        let sentence_count = TextSegmenter::sentences(text).len();
        let paragraph_count = TextSegmenter::paragraphs(text).len();
        let word_count = words.len();

        let word_lengths: Vec<usize> = words.iter().map(|w| w.chars().count()).collect();
        let average_word_length = word_lengths.iter().sum::<usize>() as f64 / word_count as f64;
        let average_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

        let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
        let readability_score =
            readability::flesch_reading_ease(word_count, sentence_count, total_syllables);
        let (grade_level, difficulty) = if sentence_count == 0 {
            (GradeLevel::Unrated, Difficulty::Unknown)
        } else {
            readability::score_band(readability_score)
        };

        let average_sentences_per_paragraph = if paragraph_count == 0 {
            0.0
        } else {
            round_one_decimal(sentence_count as f64 / paragraph_count as f64)
        };

        MetricsBundle {
            word_count,
            character_count,
            characters_no_spaces,
            sentence_count,
            paragraph_count,
            average_words_per_sentence: round_one_decimal(average_sentence_length),
            average_sentences_per_paragraph,
            average_word_length: round_one_decimal(average_word_length),
            average_syllables_per_word: round_one_decimal(total_syllables as f64 / word_count as f64),
            total_syllables,
            readability_score,
            grade_level,
            difficulty,
            complexity: Complexity::classify(average_word_length, average_sentence_length),
            longest_word: longest_word(&words),
            shortest_word: shortest_word(&words),
            top_words: frequency::top_words(&words, self.options.top_words),
            reading_time_minutes: minutes_for(word_count, self.options.reading_wpm),
            speaking_time_minutes: minutes_for(word_count, self.options.speaking_wpm),
        }
    }
}

/// Compute metrics with default options.
pub fn compute_metrics(text: &str) -> MetricsBundle {
    MetricsEngine::default().compute(text)
}

/// First word of maximal length.
fn longest_word(words: &[String]) -> Option<String> {
    let mut best: Option<&String> = None;
    for word in words {
        if best.map_or(true, |b| word.chars().count() > b.chars().count()) {
            best = Some(word);
        }
    }
    best.cloned()
}

/// First word of minimal length.
fn shortest_word(words: &[String]) -> Option<String> {
    let mut best: Option<&String> = None;
    for word in words {
        if best.map_or(true, |b| word.chars().count() < b.chars().count()) {
            best = Some(word);
        }
    }
    best.cloned()
}

fn minutes_for(word_count: usize, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    word_count.div_ceil(words_per_minute)
}

/// Human-readable duration: `"< 1m"`, `"12m"`, `"2h"` or `"1h 5m"`.
pub fn format_minutes(minutes: usize) -> String {
    if minutes < 1 {
        return "< 1m".to_string();
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}h", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_zeroed_bundle() {
        let bundle = compute_metrics("");
        assert_eq!(bundle.word_count, 0);
        assert_eq!(bundle.character_count, 0);
        assert_eq!(bundle.sentence_count, 0);
        assert_eq!(bundle.paragraph_count, 0);
        assert_eq!(bundle.readability_score, 0);
        assert_eq!(bundle.difficulty, Difficulty::Unknown);
        assert_eq!(bundle.grade_level, GradeLevel::Unrated);
        assert_eq!(bundle.complexity, Complexity::Basic);
        assert!(bundle.top_words.is_empty());
        assert_eq!(bundle.longest_word, None);
    }

    #[test]
    fn test_whitespace_only_counts_characters() {
        let bundle = compute_metrics("  \n\n  ");
        assert_eq!(bundle.word_count, 0);
        assert_eq!(bundle.character_count, 6);
        assert_eq!(bundle.characters_no_spaces, 0);
        assert_eq!(bundle.difficulty, Difficulty::Unknown);
    }

    #[test]
    fn test_word_count_zero_iff_trimmed_empty() {
        for text in ["", " ", "\n\t", "word", "  two words  ", "Hi."] {
            let bundle = compute_metrics(text);
            assert_eq!(bundle.word_count == 0, text.trim().is_empty(), "text: {:?}", text);
        }
    }

    #[test]
    fn test_basic_counts() {
        let text = "The cat sat on the mat. The dog ran fast!\n\nA new paragraph here?";
        let bundle = compute_metrics(text);
        assert_eq!(bundle.word_count, 14);
        assert_eq!(bundle.sentence_count, 3);
        assert_eq!(bundle.paragraph_count, 2);
        assert_eq!(bundle.character_count, text.chars().count());
        assert_eq!(bundle.average_words_per_sentence, 4.7);
        assert_eq!(bundle.average_sentences_per_paragraph, 1.5);
        assert_eq!(bundle.reading_time_minutes, 1);
        assert_eq!(bundle.speaking_time_minutes, 1);
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_sentence() {
        let bundle = compute_metrics("just some words without an ending");
        assert_eq!(bundle.sentence_count, 1);
        assert_eq!(bundle.average_words_per_sentence, 6.0);
        assert_ne!(bundle.difficulty, Difficulty::Unknown);
    }

    #[test]
    fn test_longest_and_shortest_prefer_first() {
        let bundle = compute_metrics("aa bb ccc ddd e f");
        assert_eq!(bundle.longest_word.as_deref(), Some("ccc"));
        assert_eq!(bundle.shortest_word.as_deref(), Some("e"));
    }

    #[test]
    fn test_readability_score_within_bounds() {
        let samples = [
            "Go. Run. Sit. Eat.",
            "The implementation of the comprehensive organizational restructuring initiative \
             necessitated the establishment of interdepartmental communication protocols.",
            "Their are many features available including real-time grammar checking.",
        ];
        for text in samples {
            let bundle = compute_metrics(text);
            assert!(bundle.readability_score <= 100);
        }
        assert_eq!(compute_metrics(samples[0]).difficulty, Difficulty::VeryEasy);
        assert_eq!(compute_metrics(samples[1]).difficulty, Difficulty::VeryDifficult);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let text = "Weather you're writing academic papers or emails, it helps. It really does.";
        assert_eq!(compute_metrics(text), compute_metrics(text));
    }

    #[test]
    fn test_complexity_classification() {
        assert_eq!(Complexity::classify(4.0, 10.0), Complexity::Basic);
        assert_eq!(Complexity::classify(5.5, 10.0), Complexity::Intermediate);
        assert_eq!(Complexity::classify(4.0, 16.0), Complexity::Intermediate);
        assert_eq!(Complexity::classify(6.5, 21.0), Complexity::Advanced);
        assert_eq!(Complexity::classify(6.5, 12.0), Complexity::Intermediate);
        assert_eq!(Complexity::classify(6.0, 20.0), Complexity::Intermediate);
    }

    #[test]
    fn test_custom_options() {
        let engine = MetricsEngine::new(MetricsOptions {
            top_words: 1,
            reading_wpm: 2,
            speaking_wpm: 0,
        });
        let bundle = engine.compute("apple apple banana cherry cherry cherry");
        assert_eq!(bundle.top_words, vec![WordCount { word: "cherry".into(), count: 3 }]);
        assert_eq!(bundle.reading_time_minutes, 3);
        assert_eq!(bundle.speaking_time_minutes, 0);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "< 1m");
        assert_eq!(format_minutes(12), "12m");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(65), "1h 5m");
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = MetricsReport::new(compute_metrics("Hello there."));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["difficulty"], "fairly easy");
        assert!(json["generated_at"].is_string());
    }
}
