//! Text segmentation primitives shared by the metrics engine and the
//! correction reconciler.
//!
//! - `TextSegmenter`: word, sentence and paragraph extraction
//! - `offsets`: character-indexed slicing and search over UTF-8 buffers

pub mod offsets;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid non-word pattern"));
static SENTENCE_TERMINATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid terminator pattern"));
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid blank line pattern"));

/// Splits raw text into words, sentences and paragraphs
pub struct TextSegmenter;

impl TextSegmenter {
    /// Lowercased words with punctuation replaced by whitespace.
    ///
    /// `"Don't stop!"` yields `["don", "t", "stop"]`.
    pub fn words(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        NON_WORD
            .replace_all(&lowered, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Sentence fragments between runs of `.`, `!` and `?`, trimmed.
    pub fn sentences(text: &str) -> Vec<&str> {
        SENTENCE_TERMINATORS
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Paragraphs separated by one or more blank lines.
    pub fn paragraphs(text: &str) -> Vec<&str> {
        BLANK_LINE
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .collect()
    }

    /// Whitespace-delimited tokens with their punctuation left in place.
    pub fn raw_tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    /// Remove every non-word character from a single token.
    pub fn strip_non_word(token: &str) -> String {
        token
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect()
    }
}

/// Round to one decimal place, the precision used for displayed averages.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
