//! Character-indexed views over UTF-8 text.
//!
//! Correction positions count Unicode scalar values, not bytes, so every
//! slice and search here converts between the two before touching the
//! underlying `str`.

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the character at `char_index`. The index one past the
/// last character maps to `text.len()`.
pub fn byte_offset(text: &str, char_index: usize) -> Option<usize> {
    if char_index == 0 {
        return Some(0);
    }
    let mut seen = 0;
    for (byte_index, _) in text.char_indices() {
        if seen == char_index {
            return Some(byte_index);
        }
        seen += 1;
    }
    (seen == char_index).then_some(text.len())
}

/// The characters in `start..end`, or `None` when the range is inverted or
/// runs past the end of `text`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = byte_offset(text, start)?;
    let to = byte_offset(text, end)?;
    Some(&text[from..to])
}

/// Character index of the first occurrence of `needle`. An empty needle
/// never matches.
pub fn find_chars(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .find(needle)
        .map(|byte_index| char_len(&haystack[..byte_index]))
}

/// Copy of `text` with the characters in `start..end` replaced.
pub fn replace_chars(text: &str, start: usize, end: usize, replacement: &str) -> Option<String> {
    let from = byte_offset(text, start)?;
    let to = byte_offset(text, end)?;
    if from > to {
        return None;
    }
    let mut result = String::with_capacity(text.len() - (to - from) + replacement.len());
    result.push_str(&text[..from]);
    result.push_str(replacement);
    result.push_str(&text[to..]);
    Some(result)
}
