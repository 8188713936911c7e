use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Words left out of the frequency table.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
        "between", "among", "around", "is", "are", "was", "were", "be", "been", "being", "have",
        "has", "had", "do", "does", "did", "will", "would", "could", "should", "may", "might",
        "must", "can", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
        "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Count `words` in first-occurrence order, keeping only those accepted by
/// `keep`, then sort by descending count. Ties keep first-occurrence order.
pub fn rank_words<'a, I, F>(words: I, keep: F) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> bool,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for word in words {
        if !keep(word) {
            continue;
        }
        match index.get(word) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(word, counts.len());
                counts.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Most frequent non-stop-words longer than two characters.
pub fn top_words(words: &[String], limit: usize) -> Vec<WordCount> {
    let mut ranked = rank_words(words.iter().map(String::as_str), |word| {
        word.chars().count() > 2 && !STOP_WORDS.contains(word)
    });
    ranked.truncate(limit);
    ranked
}
