use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SILENT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid suffix pattern"));
static LEADING_Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"^y").expect("valid leading y pattern"));
static VOWEL_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]{1,2}").expect("valid vowel pattern"));

/// Approximate syllable count for one word.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let stripped = SILENT_SUFFIX.replace(&word, "");
    let stripped = LEADING_Y.replace(&stripped, "");

    match VOWEL_GROUP.find_iter(&stripped).count() {
        0 => 1,
        n => n,
    }
}

/// Flesch Reading Ease, rounded and clamped into `0..=100`.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> u8 {
    if words == 0 || sentences == 0 {
        return 0;
    }
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "-")]
    Unrated,
    #[serde(rename = "5th grade")]
    Fifth,
    #[serde(rename = "6th grade")]
    Sixth,
    #[serde(rename = "7th grade")]
    Seventh,
    #[serde(rename = "8th-9th grade")]
    EighthToNinth,
    #[serde(rename = "10th-12th grade")]
    TenthToTwelfth,
    #[serde(rename = "College level")]
    College,
    #[serde(rename = "Graduate level")]
    Graduate,
}

impl GradeLevel {
    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::Unrated => "-",
            GradeLevel::Fifth => "5th grade",
            GradeLevel::Sixth => "6th grade",
            GradeLevel::Seventh => "7th grade",
            GradeLevel::EighthToNinth => "8th-9th grade",
            GradeLevel::TenthToTwelfth => "10th-12th grade",
            GradeLevel::College => "College level",
            GradeLevel::Graduate => "Graduate level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "very easy")]
    VeryEasy,
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "fairly easy")]
    FairlyEasy,
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "fairly difficult")]
    FairlyDifficult,
    #[serde(rename = "difficult")]
    Difficult,
    #[serde(rename = "very difficult")]
    VeryDifficult,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Unknown => "unknown",
            Difficulty::VeryEasy => "very easy",
            Difficulty::Easy => "easy",
            Difficulty::FairlyEasy => "fairly easy",
            Difficulty::Standard => "standard",
            Difficulty::FairlyDifficult => "fairly difficult",
            Difficulty::Difficult => "difficult",
            Difficulty::VeryDifficult => "very difficult",
        }
    }
}

/// Grade level and difficulty for a rounded Flesch score.
pub fn score_band(score: u8) -> (GradeLevel, Difficulty) {
    match score {
        90..=u8::MAX => (GradeLevel::Fifth, Difficulty::VeryEasy),
        80..=89 => (GradeLevel::Sixth, Difficulty::Easy),
        70..=79 => (GradeLevel::Seventh, Difficulty::FairlyEasy),
        60..=69 => (GradeLevel::EighthToNinth, Difficulty::Standard),
        50..=59 => (GradeLevel::TenthToTwelfth, Difficulty::FairlyDifficult),
        30..=49 => (GradeLevel::College, Difficulty::Difficult),
        _ => (GradeLevel::Graduate, Difficulty::VeryDifficult),
    }
}
