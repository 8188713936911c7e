use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::text::offsets;

pub type CorrectionId = usize;

/// Half-open character range `start..end` into a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move both ends by `delta` characters.
    pub fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
    }
}

/// A proposed edit before it has been given an id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrectionProposal {
    pub original_text: String,
    pub improved_text: String,
    pub position: Option<Span>,
    pub category: Option<String>,
    pub explanation: Option<String>,
    /// The analysis reported the sentence as already perfect.
    pub marked_perfect: bool,
}

impl CorrectionProposal {
    pub fn new(original_text: impl Into<String>, improved_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            improved_text: improved_text.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, start: usize, end: usize) -> Self {
        self.position = Some(Span::new(start, end));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// True when applying the proposal would not change the text.
    pub fn is_no_op(&self, sentinel: &str) -> bool {
        self.marked_perfect
            || self.improved_text == sentinel
            || self.improved_text == self.original_text
    }
}

/// A pending edit tracked by the reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub id: CorrectionId,
    pub original_text: String,
    pub improved_text: String,
    pub position: Option<Span>,
    pub category: Option<String>,
    pub explanation: Option<String>,
}

impl Correction {
    pub fn from_proposal(id: CorrectionId, proposal: CorrectionProposal) -> Self {
        Self {
            id,
            original_text: proposal.original_text,
            improved_text: proposal.improved_text,
            position: proposal.position,
            category: proposal.category,
            explanation: proposal.explanation,
        }
    }

    /// Current content of the recorded span in `buffer`, if it is in range.
    pub fn span_text<'a>(&self, buffer: &'a str) -> Option<&'a str> {
        let span = self.position?;
        offsets::slice_chars(buffer, span.start, span.end)
    }
}

/// Pending corrections keyed by id.
///
/// Ids are handed out in ascending input order, so key order is
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct CorrectionSet {
    entries: BTreeMap<CorrectionId, Correction>,
}

impl CorrectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, correction: Correction) {
        self.entries.insert(correction.id, correction);
    }

    pub fn get(&self, id: CorrectionId) -> Option<&Correction> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: CorrectionId) -> Option<Correction> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: CorrectionId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correction> {
        self.entries.values()
    }

    pub fn ids(&self) -> Vec<CorrectionId> {
        self.entries.keys().copied().collect()
    }

    /// Shift every positioned correction starting at or after `boundary`.
    /// Corrections before or straddling the edit are left untouched.
    pub fn shift_from(&mut self, boundary: usize, delta: isize) -> usize {
        if delta == 0 {
            return 0;
        }
        let mut shifted = 0;
        for correction in self.entries.values_mut() {
            if let Some(span) = correction.position.as_mut() {
                if span.start >= boundary {
                    span.shift(delta);
                    shifted += 1;
                }
            }
        }
        shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correction(id: CorrectionId, start: usize, end: usize) -> Correction {
        Correction::from_proposal(id, CorrectionProposal::new("old", "new").at(start, end))
    }

    #[test]
    fn test_span_shift_both_directions() {
        let mut span = Span::new(20, 25);
        span.shift(-3);
        assert_eq!(span, Span::new(17, 22));
        span.shift(5);
        assert_eq!(span, Span::new(22, 27));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_no_op_detection() {
        let sentinel = "NO_REVISION_NEEDED";
        assert!(CorrectionProposal::new("same", "same").is_no_op(sentinel));
        assert!(CorrectionProposal::new("text", sentinel).is_no_op(sentinel));
        let mut perfect = CorrectionProposal::new("a", "b");
        perfect.marked_perfect = true;
        assert!(perfect.is_no_op(sentinel));
        assert!(!CorrectionProposal::new("teh", "the").is_no_op(sentinel));
    }

    #[test]
    fn test_span_text() {
        let c = correction(0, 0, 5);
        assert_eq!(c.span_text("Their are"), Some("Their"));
        assert_eq!(c.span_text("abc"), None);
        let unpositioned = Correction::from_proposal(1, CorrectionProposal::new("x", "y"));
        assert_eq!(unpositioned.span_text("anything"), None);
    }

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut set = CorrectionSet::new();
        set.insert(correction(2, 0, 1));
        set.insert(correction(0, 5, 6));
        set.insert(correction(1, 3, 4));
        assert_eq!(set.ids(), vec![0, 1, 2]);
        assert!(set.remove(1).is_some());
        assert_eq!(set.ids(), vec![0, 2]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_shift_from_only_moves_later_corrections() {
        let mut set = CorrectionSet::new();
        set.insert(correction(0, 0, 5));
        set.insert(correction(1, 4, 9));
        set.insert(correction(2, 10, 12));
        set.insert(Correction::from_proposal(3, CorrectionProposal::new("x", "y")));

        let shifted = set.shift_from(5, 2);

        assert_eq!(shifted, 1);
        assert_eq!(set.get(0).unwrap().position, Some(Span::new(0, 5)));
        assert_eq!(set.get(1).unwrap().position, Some(Span::new(4, 9)));
        assert_eq!(set.get(2).unwrap().position, Some(Span::new(12, 14)));
        assert_eq!(set.get(3).unwrap().position, None);
    }

    #[test]
    fn test_shift_from_zero_delta_is_noop() {
        let mut set = CorrectionSet::new();
        set.insert(correction(0, 10, 12));
        assert_eq!(set.shift_from(0, 0), 0);
        assert_eq!(set.get(0).unwrap().position, Some(Span::new(10, 12)));
    }
}
