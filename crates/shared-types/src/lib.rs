pub mod analysis;
pub mod types;

pub use analysis::{AnalysisResult, ScoringWeights, SeverityCounts};
pub use types::{
    section_key, ExternalIssue, Issue, IssueKind, IssueLocation, IssueSource, Severity, TextSpan,
    UnknownIssueKind, UnknownSeverity,
};
