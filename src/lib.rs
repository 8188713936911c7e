//! OpenGrammar: correction reconciliation and text metrics for a writing assistant.
//!
//! The reconciler applies analysis suggestions to a caller-owned buffer and
//! keeps the remaining suggestions aligned with the edited text. The metrics
//! engine derives document statistics and readability scores.

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod reconcile;
pub mod session;
pub mod surface;
pub mod text;

pub use analysis::AnalysisResponse;
pub use config::Config;
pub use error::{AppError, Result};
pub use metrics::{compute_metrics, MetricsBundle, MetricsEngine, MetricsOptions};
pub use reconcile::{
    ApplyOutcome, ApplyStatus, BatchOutcome, Correction, CorrectionId, CorrectionProposal,
    CorrectionReconciler, CorrectionSet, Span,
};
pub use session::{Notice, NoticeLevel, WritingSession};
pub use surface::{FileSurface, MemorySurface, TextSurface};
