use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::correction::{Correction, Span};
use crate::text::offsets;

/// Which strategy found the text a correction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// The recorded span still holds the original text
    Position,
    /// First exact occurrence of the original text
    ExactSearch,
    /// First occurrence of the original text with surrounding whitespace trimmed
    TrimmedSearch,
}

/// Span in the current buffer that a correction will replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub span: Span,
    pub strategy: MatchStrategy,
}

/// Resolve `correction` against `buffer`, trying its recorded position
/// first and falling back to exact then trimmed search.
pub fn locate(correction: &Correction, buffer: &str) -> Option<Located> {
    // Strategy 1: recorded position
    if let Some(span) = try_position(correction, buffer) {
        return Some(Located {
            span,
            strategy: MatchStrategy::Position,
        });
    }

    if correction.position.is_some() {
        warn!(
            "Correction {} has a stale position, searching for its text instead",
            correction.id
        );
    }

    // Strategy 2: exact search
    if let Some(start) = offsets::find_chars(buffer, &correction.original_text) {
        debug!("Correction {} found by exact search at {}", correction.id, start);
        return Some(Located {
            span: Span::new(start, start + offsets::char_len(&correction.original_text)),
            strategy: MatchStrategy::ExactSearch,
        });
    }

    // Strategy 3: trimmed search
    let trimmed = correction.original_text.trim();
    if trimmed.len() != correction.original_text.len() {
        if let Some(start) = offsets::find_chars(buffer, trimmed) {
            debug!("Correction {} found by trimmed search at {}", correction.id, start);
            return Some(Located {
                span: Span::new(start, start + offsets::char_len(trimmed)),
                strategy: MatchStrategy::TrimmedSearch,
            });
        }
    }

    None
}

fn try_position(correction: &Correction, buffer: &str) -> Option<Span> {
    let span = correction.position?;
    let current = correction.span_text(buffer)?;
    let original = correction.original_text.as_str();

    if current == original {
        return Some(span);
    }
    let trimmed = original.trim();
    if !trimmed.is_empty() && current.trim() == trimmed {
        return Some(span);
    }
    None
}
