//! A writing session ties one text surface to its pending corrections.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::AnalysisResponse;
use crate::metrics::{MetricsBundle, MetricsEngine};
use crate::reconcile::{ApplyStatus, CorrectionId, CorrectionReconciler, CorrectionSet};
use crate::surface::{SurfaceError, TextSurface};

/// Shortest text worth sending for analysis, in characters.
pub const MIN_ANALYSIS_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

pub struct WritingSession<S: TextSurface> {
    surface: S,
    reconciler: CorrectionReconciler,
    engine: MetricsEngine,
}

impl<S: TextSurface> WritingSession<S> {
    pub fn new(surface: S) -> Self {
        Self::with_parts(surface, CorrectionReconciler::new(), MetricsEngine::default())
    }

    pub fn with_parts(surface: S, reconciler: CorrectionReconciler, engine: MetricsEngine) -> Self {
        Self {
            surface,
            reconciler,
            engine,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn pending(&self) -> &CorrectionSet {
        self.reconciler.pending()
    }

    /// Warn when the surface holds too little text to analyze.
    pub fn check_ready(&self) -> Result<Option<Notice>, SurfaceError> {
        let text = self.surface.read_text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Some(Notice::new(
                NoticeLevel::Error,
                "No Text",
                "Please enter some text to analyze.",
            )));
        }
        if trimmed.chars().count() < MIN_ANALYSIS_CHARS {
            return Ok(Some(Notice::new(
                NoticeLevel::Warning,
                "Text Too Short",
                format!(
                    "Please enter at least {} characters for meaningful analysis.",
                    MIN_ANALYSIS_CHARS
                ),
            )));
        }
        Ok(None)
    }

    /// Replace the pending corrections with those in `response`.
    pub fn load_analysis(&mut self, response: AnalysisResponse) -> usize {
        let kept = self.reconciler.ingest(response.into_proposals());
        info!("Session loaded {} pending corrections", kept);
        kept
    }

    /// Write `buffer` to the surface, rolling the pending set back to
    /// `snapshot` when the write fails.
    fn commit(&mut self, snapshot: CorrectionReconciler, buffer: &str) -> Result<(), SurfaceError> {
        if let Err(e) = self.surface.write_text(buffer) {
            warn!("Write failed, keeping corrections pending: {}", e);
            self.reconciler = snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Apply one correction to the surface. The surface is only written
    /// when the correction was located, and the correction only leaves the
    /// pending set once the write succeeds.
    pub fn accept(&mut self, id: CorrectionId) -> Result<Notice, SurfaceError> {
        let text = self.surface.read_text()?;
        let snapshot = self.reconciler.clone();
        let outcome = self.reconciler.apply_one(id, &text);

        let notice = match outcome.status {
            ApplyStatus::Applied { .. } => {
                self.commit(snapshot, &outcome.buffer)?;
                Notice::new(
                    NoticeLevel::Success,
                    "Correction Applied",
                    "The correction has been applied successfully.",
                )
            }
            ApplyStatus::NotFound => Notice::new(
                NoticeLevel::Error,
                "Correction Failed",
                "Could not locate the original text. The text may have been modified.",
            ),
            ApplyStatus::UnknownId => Notice::new(
                NoticeLevel::Error,
                "Correction Unavailable",
                format!("Suggestion {} is no longer pending.", id),
            ),
        };
        Ok(notice)
    }

    /// Apply every pending correction in one write.
    pub fn accept_all(&mut self) -> Result<Notice, SurfaceError> {
        if self.reconciler.pending().is_empty() {
            return Ok(Notice::new(
                NoticeLevel::Info,
                "Nothing to Apply",
                "There are no pending suggestions.",
            ));
        }

        let text = self.surface.read_text()?;
        let snapshot = self.reconciler.clone();
        let outcome = self.reconciler.apply_all(&text);
        if outcome.applied_count() > 0 {
            self.commit(snapshot, &outcome.buffer)?;
        }

        if outcome.failed_ids.is_empty() {
            return Ok(Notice::new(
                NoticeLevel::Success,
                "All Applied",
                "All suggestions have been applied to your text.",
            ));
        }

        warn!("Suggestions {:?} could not be applied", outcome.failed_ids);
        Ok(Notice::new(
            NoticeLevel::Warning,
            "Some Corrections Failed",
            format!(
                "Applied {} of {} suggestions. The rest could not be located in the text.",
                outcome.applied_count(),
                outcome.applied_count() + outcome.failed_ids.len()
            ),
        ))
    }

    pub fn dismiss(&mut self, id: CorrectionId) -> bool {
        self.reconciler.dismiss(id)
    }

    pub fn metrics(&self) -> Result<MetricsBundle, SurfaceError> {
        Ok(self.engine.compute(&self.surface.read_text()?))
    }
}
