//! Risk scoring: a fold over the issue list

use crate::draft::ReviewDraft;
use shared_types::{AnalysisResult, Issue, ScoringWeights, SeverityCounts};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskScorer {
    weights: ScoringWeights,
}

impl RiskScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Count issues by severity
    pub fn tally(issues: &[Issue]) -> SeverityCounts {
        issues.iter().fold(SeverityCounts::default(), |mut counts, issue| {
            counts.record(issue.severity);
            counts
        })
    }

    /// Seal a draft into its final result; counts and score derive from the issues alone
    pub fn finalize(&self, draft: ReviewDraft) -> AnalysisResult {
        let severity_counts = Self::tally(&draft.issues);
        let risk_score = self.weights.score(&severity_counts);
        info!(
            issues = draft.issues.len(),
            critical = severity_counts.critical,
            warning = severity_counts.warning,
            info = severity_counts.info,
            risk_score,
            "Analysis scored"
        );

        AnalysisResult {
            issues: draft.issues,
            severity_counts,
            risk_score,
            weights: self.weights,
            llm_unavailable: draft.llm_unavailable,
            warnings: draft.warnings,
            sections_found: draft.sections_found,
        }
    }
}
