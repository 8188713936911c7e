//! Correction reconciliation
//!
//! Applies proposed edits to a caller-owned text buffer while keeping the
//! recorded positions of the remaining edits in step with the text.
//!
//! - `correction`: spans, corrections and the pending set
//! - `locate`: position / exact / trimmed resolution of a correction

pub mod correction;
pub mod locate;

use tracing::{debug, info, warn};

use crate::text::offsets;

pub use correction::{Correction, CorrectionId, CorrectionProposal, CorrectionSet, Span};
pub use locate::{locate, Located, MatchStrategy};

/// Sentinel the analysis service uses for sentences that need no change.
pub const NO_REVISION_NEEDED: &str = "NO_REVISION_NEEDED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    Applied { strategy: MatchStrategy, span: Span },
    /// The original text could not be found; the correction stays pending
    NotFound,
    /// No pending correction has this id
    UnknownId,
}

/// Result of applying a single correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub buffer: String,
    pub status: ApplyStatus,
}

impl ApplyOutcome {
    pub fn success(&self) -> bool {
        matches!(self.status, ApplyStatus::Applied { .. })
    }
}

/// Result of applying every pending correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub buffer: String,
    pub applied: Vec<CorrectionId>,
    pub failed_ids: Vec<CorrectionId>,
}

impl BatchOutcome {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Owns the pending corrections for one analysis of a document
#[derive(Debug, Clone)]
pub struct CorrectionReconciler {
    pending: CorrectionSet,
    no_revision_sentinel: String,
}

impl Default for CorrectionReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectionReconciler {
    pub fn new() -> Self {
        Self::with_sentinel(NO_REVISION_NEEDED)
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            pending: CorrectionSet::new(),
            no_revision_sentinel: sentinel.into(),
        }
    }

    pub fn pending(&self) -> &CorrectionSet {
        &self.pending
    }

    pub fn get(&self, id: CorrectionId) -> Option<&Correction> {
        self.pending.get(id)
    }

    /// Replace the pending set with `proposals`, dropping no-ops and
    /// proposals with nothing to search for. Ids are input indices.
    /// Returns the number of corrections kept.
    pub fn ingest<I>(&mut self, proposals: I) -> usize
    where
        I: IntoIterator<Item = CorrectionProposal>,
    {
        self.pending.clear();
        let mut skipped = 0;

        for (id, proposal) in proposals.into_iter().enumerate() {
            if proposal.is_no_op(&self.no_revision_sentinel) {
                debug!("Skipping correction {}: no revision needed", id);
                skipped += 1;
                continue;
            }
            if proposal.original_text.trim().is_empty() {
                debug!("Skipping correction {}: empty original text", id);
                skipped += 1;
                continue;
            }
            self.pending.insert(Correction::from_proposal(id, proposal));
        }

        info!(
            "Ingested {} corrections ({} skipped)",
            self.pending.len(),
            skipped
        );
        self.pending.len()
    }

    /// Apply one pending correction to `buffer`.
    ///
    /// On success the correction is removed and every other correction
    /// positioned at or after the end of the replaced span is shifted by
    /// the change in length. On failure the buffer is returned unchanged
    /// and the correction stays pending.
    pub fn apply_one(&mut self, id: CorrectionId, buffer: &str) -> ApplyOutcome {
        let Some(correction) = self.pending.get(id) else {
            warn!("Correction {} is not pending", id);
            return ApplyOutcome {
                buffer: buffer.to_string(),
                status: ApplyStatus::UnknownId,
            };
        };

        let Some(located) = locate(correction, buffer) else {
            warn!(
                "Could not locate the original text of correction {}: {:?}",
                id, correction.original_text
            );
            return ApplyOutcome {
                buffer: buffer.to_string(),
                status: ApplyStatus::NotFound,
            };
        };

        let span = located.span;
        let Some(updated) =
            offsets::replace_chars(buffer, span.start, span.end, &correction.improved_text)
        else {
            // locate only returns spans inside the buffer
            return ApplyOutcome {
                buffer: buffer.to_string(),
                status: ApplyStatus::NotFound,
            };
        };

        let delta = offsets::char_len(&correction.improved_text) as isize - span.len() as isize;
        self.pending.remove(id);
        let shifted = self.pending.shift_from(span.end, delta);

        info!(
            "Applied correction {} via {:?} at {}..{} (shifted {} others by {})",
            id, located.strategy, span.start, span.end, shifted, delta
        );

        ApplyOutcome {
            buffer: updated,
            status: ApplyStatus::Applied {
                strategy: located.strategy,
                span,
            },
        }
    }

    /// Apply every pending correction, highest position first so earlier
    /// spans stay valid while later text changes. Corrections without a
    /// position follow in insertion order. Failed corrections stay pending.
    pub fn apply_all(&mut self, buffer: &str) -> BatchOutcome {
        let mut order: Vec<(CorrectionId, Option<usize>)> = self
            .pending
            .iter()
            .map(|c| (c.id, c.position.map(|span| span.start)))
            .collect();
        order.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut current = buffer.to_string();
        let mut applied = Vec::new();
        let mut failed_ids = Vec::new();

        for (id, _) in order {
            let outcome = self.apply_one(id, &current);
            if outcome.success() {
                applied.push(id);
                current = outcome.buffer;
            } else {
                failed_ids.push(id);
            }
        }

        if failed_ids.is_empty() {
            info!("Applied all {} corrections", applied.len());
        } else {
            warn!(
                "Applied {} corrections, {} could not be located: {:?}",
                applied.len(),
                failed_ids.len(),
                failed_ids
            );
        }

        BatchOutcome {
            buffer: current,
            applied,
            failed_ids,
        }
    }

    /// Drop a correction without touching the text.
    pub fn dismiss(&mut self, id: CorrectionId) -> bool {
        let removed = self.pending.remove(id).is_some();
        if removed {
            debug!("Dismissed correction {}", id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconciler_with(proposals: Vec<CorrectionProposal>) -> CorrectionReconciler {
        let mut reconciler = CorrectionReconciler::new();
        reconciler.ingest(proposals);
        reconciler
    }

    #[test]
    fn test_ingest_filters_no_ops_and_keeps_input_ids() {
        let mut perfect = CorrectionProposal::new("Fine sentence.", "Fine sentence, really.");
        perfect.marked_perfect = true;
        let reconciler = reconciler_with(vec![
            CorrectionProposal::new("Same.", "Same."),
            CorrectionProposal::new("teh", "the"),
            CorrectionProposal::new("Good.", NO_REVISION_NEEDED),
            perfect,
            CorrectionProposal::new("   ", "x"),
            CorrectionProposal::new("adn", "and"),
        ]);
        assert_eq!(reconciler.pending().ids(), vec![1, 5]);
    }

    #[test]
    fn test_ingest_replaces_previous_set() {
        let mut reconciler = reconciler_with(vec![CorrectionProposal::new("a1", "b1")]);
        reconciler.ingest(vec![
            CorrectionProposal::new("c1", "d1"),
            CorrectionProposal::new("e1", "f1"),
        ]);
        assert_eq!(reconciler.pending().len(), 2);
        assert_eq!(reconciler.get(0).unwrap().original_text, "c1");
    }

    #[test]
    fn test_custom_sentinel() {
        let mut reconciler = CorrectionReconciler::with_sentinel("KEEP");
        let kept = reconciler.ingest(vec![
            CorrectionProposal::new("x", "KEEP"),
            CorrectionProposal::new("y", NO_REVISION_NEEDED),
        ]);
        assert_eq!(kept, 1);
        assert!(reconciler.get(1).is_some());
    }

    #[test]
    fn test_apply_one_by_position() {
        let buffer = "Their are many features.";
        let mut reconciler =
            reconciler_with(vec![CorrectionProposal::new("Their are", "There are").at(0, 9)]);

        let outcome = reconciler.apply_one(0, buffer);

        assert!(outcome.success());
        assert_eq!(outcome.buffer, "There are many features.");
        assert_eq!(
            outcome.status,
            ApplyStatus::Applied {
                strategy: MatchStrategy::Position,
                span: Span::new(0, 9)
            }
        );
        assert!(reconciler.pending().is_empty());
    }

    #[test]
    fn test_apply_one_length_changes_by_difference() {
        let buffer = "I recieve teh mesage with thier help.";
        let original = "mesage";
        let improved = "message";
        let start = offsets::find_chars(buffer, original).unwrap();
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new(original, improved).at(start, start + original.len())
        ]);

        let outcome = reconciler.apply_one(0, buffer);

        assert!(outcome.success());
        assert_eq!(
            offsets::char_len(&outcome.buffer),
            offsets::char_len(buffer) - original.len() + improved.len()
        );
    }

    #[test]
    fn test_apply_one_stale_position_uses_search() {
        let buffer = "Welcome! Their are many features.";
        let mut reconciler =
            reconciler_with(vec![CorrectionProposal::new("Their are", "There are").at(0, 9)]);

        let outcome = reconciler.apply_one(0, buffer);

        assert_eq!(outcome.buffer, "Welcome! There are many features.");
        assert!(matches!(
            outcome.status,
            ApplyStatus::Applied {
                strategy: MatchStrategy::ExactSearch,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_one_not_found_leaves_buffer_and_keeps_pending() {
        let buffer = "Completely different text.";
        let mut reconciler =
            reconciler_with(vec![CorrectionProposal::new("Their are", "There are").at(0, 9)]);

        let outcome = reconciler.apply_one(0, buffer);

        assert!(!outcome.success());
        assert_eq!(outcome.status, ApplyStatus::NotFound);
        assert_eq!(outcome.buffer, buffer);
        assert!(reconciler.get(0).is_some());
    }

    #[test]
    fn test_apply_one_unknown_id() {
        let mut reconciler = CorrectionReconciler::new();
        let outcome = reconciler.apply_one(7, "text");
        assert_eq!(outcome.status, ApplyStatus::UnknownId);
        assert_eq!(outcome.buffer, "text");
    }

    #[test]
    fn test_apply_one_shifts_later_corrections() {
        // 30 characters: "Hello" [0,5) and "World" [20,25)
        let buffer = format!("Hello{}World{}", "-".repeat(15), ".".repeat(5));
        assert_eq!(buffer.len(), 30);
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("Hello", "Hi").at(0, 5),
            CorrectionProposal::new("World", "Earth").at(20, 25),
        ]);

        let outcome = reconciler.apply_one(0, &buffer);

        assert!(outcome.success());
        assert_eq!(reconciler.get(1).unwrap().position, Some(Span::new(17, 22)));
        assert_eq!(reconciler.get(1).unwrap().span_text(&outcome.buffer), Some("World"));
    }

    #[test]
    fn test_apply_one_survivors_point_at_their_text() {
        let buffer = "teh cat adn thier dog recieve a mesage";
        let targets = [
            ("teh", "the"),
            ("adn", "and also"),
            ("thier", "their"),
            ("recieve", "receive"),
            ("mesage", "message"),
        ];
        let proposals = targets
            .iter()
            .map(|(from, to)| {
                let start = offsets::find_chars(buffer, from).unwrap();
                CorrectionProposal::new(*from, *to).at(start, start + from.len())
            })
            .collect::<Vec<_>>();
        let mut reconciler = reconciler_with(proposals);

        let outcome = reconciler.apply_one(1, buffer);

        assert!(outcome.success());
        for survivor in reconciler.pending().iter() {
            assert_eq!(
                survivor.span_text(&outcome.buffer),
                Some(survivor.original_text.as_str()),
                "correction {} drifted",
                survivor.id
            );
        }
    }

    #[test]
    fn test_apply_one_leaves_overlapping_corrections_for_search() {
        let buffer = "the big bad wolf";
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("big bad", "large").at(4, 11),
            CorrectionProposal::new("bad wolf", "evil wolf").at(8, 16),
        ]);

        let first = reconciler.apply_one(0, buffer);
        assert_eq!(first.buffer, "the large wolf");
        // straddles the edit, so its span is left alone
        assert_eq!(reconciler.get(1).unwrap().position, Some(Span::new(8, 16)));

        let second = reconciler.apply_one(1, &first.buffer);
        assert_eq!(second.status, ApplyStatus::NotFound);
    }

    #[test]
    fn test_apply_all_descending_positions() {
        let buffer = "teh cat adn thier dog";
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("teh", "the").at(0, 3),
            CorrectionProposal::new("adn", "and").at(8, 11),
            CorrectionProposal::new("thier", "their").at(12, 17),
        ]);

        let outcome = reconciler.apply_all(buffer);

        assert_eq!(outcome.buffer, "the cat and their dog");
        assert_eq!(outcome.applied, vec![2, 1, 0]);
        assert_eq!(outcome.applied_count(), 3);
        assert!(outcome.failed_ids.is_empty());
        assert!(reconciler.pending().is_empty());
    }

    #[test]
    fn test_apply_all_matches_sequential_apply_one() {
        let buffer = "Their are many feature. It help you write. Weather you like it.";
        let proposals = vec![
            CorrectionProposal::new("Their are", "There are").at(0, 9),
            CorrectionProposal::new("feature", "features").at(15, 22),
            CorrectionProposal::new("It help", "It helps").at(24, 31),
            CorrectionProposal::new("Weather", "Whether").at(43, 50),
        ];

        let mut batch = reconciler_with(proposals.clone());
        let batch_outcome = batch.apply_all(buffer);

        let mut sequential = reconciler_with(proposals);
        let mut current = buffer.to_string();
        for id in sequential.pending().ids() {
            let outcome = sequential.apply_one(id, &current);
            // shifted positions keep resolving without a search
            assert!(matches!(
                outcome.status,
                ApplyStatus::Applied {
                    strategy: MatchStrategy::Position,
                    ..
                }
            ));
            current = outcome.buffer;
        }

        assert_eq!(batch_outcome.buffer, current);
        assert_eq!(
            current,
            "There are many features. It helps you write. Whether you like it."
        );
    }

    #[test]
    fn test_apply_all_positionless_after_positioned() {
        let buffer = "one two three";
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("one", "1"),
            CorrectionProposal::new("three", "3").at(8, 13),
            CorrectionProposal::new("two", "2"),
        ]);

        let outcome = reconciler.apply_all(buffer);

        assert_eq!(outcome.buffer, "1 2 3");
        assert_eq!(outcome.applied, vec![1, 0, 2]);
    }

    #[test]
    fn test_apply_all_reports_failures_and_keeps_them_pending() {
        let buffer = "teh cat sat";
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("teh", "the").at(0, 3),
            CorrectionProposal::new("dgo", "dog").at(20, 23),
        ]);

        let outcome = reconciler.apply_all(buffer);

        assert_eq!(outcome.buffer, "the cat sat");
        assert_eq!(outcome.applied, vec![0]);
        assert_eq!(outcome.failed_ids, vec![1]);
        assert_eq!(reconciler.pending().ids(), vec![1]);
    }

    #[test]
    fn test_apply_all_empty_set() {
        let mut reconciler = CorrectionReconciler::new();
        let outcome = reconciler.apply_all("unchanged");
        assert_eq!(outcome.buffer, "unchanged");
        assert_eq!(outcome.applied_count(), 0);
        assert!(outcome.failed_ids.is_empty());
    }

    #[test]
    fn test_dismiss_and_clear() {
        let mut reconciler = reconciler_with(vec![
            CorrectionProposal::new("teh", "the"),
            CorrectionProposal::new("adn", "and"),
        ]);
        assert!(reconciler.dismiss(0));
        assert!(!reconciler.dismiss(0));
        assert_eq!(reconciler.pending().ids(), vec![1]);

        reconciler.clear();
        assert!(reconciler.pending().is_empty());
    }
}
