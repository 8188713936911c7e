//! Analysis responses from the writing-analysis service
//!
//! The service returns one entry per sentence. Each entry is turned into a
//! `CorrectionProposal`; the reconciler decides which of them are worth
//! keeping.

pub mod errors;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use errors::AnalysisError;

use crate::reconcile::{CorrectionProposal, Span};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, alias = "corrections")]
    pub sentence_analysis: Vec<SentenceAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    #[serde(default, alias = "original")]
    pub original_text: String,
    #[serde(default, alias = "suggestion")]
    pub improved_text: Option<String>,
    #[serde(default)]
    pub position: Option<TextPosition>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub identified_issues: Vec<IdentifiedIssue>,
    #[serde(default)]
    pub improvement_status: Option<ImprovementStatus>,
}

/// Character range reported by the service. Values are untrusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    pub start_char: Option<i64>,
    pub end_char: Option<i64>,
    #[serde(default)]
    pub paragraph_number: Option<i64>,
}

impl TextPosition {
    /// Usable span, or `None` when either end is missing, negative or reversed.
    pub fn to_span(&self) -> Option<Span> {
        let start = usize::try_from(self.start_char?).ok()?;
        let end = usize::try_from(self.end_char?).ok()?;
        (end >= start).then(|| Span::new(start, end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedIssue {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub severity: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementStatus {
    Perfect,
    Revised,
    NeedsAttention,
    #[serde(other)]
    Unknown,
}

impl AnalysisResponse {
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// One proposal per sentence entry, in response order.
    pub fn into_proposals(self) -> Vec<CorrectionProposal> {
        self.sentence_analysis
            .into_iter()
            .map(SentenceAnalysis::into_proposal)
            .collect()
    }
}

impl SentenceAnalysis {
    pub fn into_proposal(self) -> CorrectionProposal {
        let first_issue = self.identified_issues.into_iter().next().unwrap_or_default();
        let position = self.position.as_ref().and_then(TextPosition::to_span);
        if self.position.is_some() && position.is_none() {
            debug!("Ignoring unusable position {:?}", self.position);
        }

        // A missing suggestion means there is nothing to apply
        let marked_perfect = self.improvement_status == Some(ImprovementStatus::Perfect)
            || self.improved_text.is_none();

        CorrectionProposal {
            improved_text: self
                .improved_text
                .unwrap_or_else(|| self.original_text.clone()),
            original_text: self.original_text,
            position,
            category: self.category.or(first_issue.category),
            explanation: self.explanation.or(first_issue.explanation),
            marked_perfect,
        }
    }
}
