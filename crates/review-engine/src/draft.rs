use shared_types::Issue;

/// An analysis in progress: issues appended in detection order, not yet scored.
///
/// Only the risk scorer turns a draft into an [`shared_types::AnalysisResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub issues: Vec<Issue>,
    pub warnings: Vec<String>,
    pub llm_unavailable: bool,
    pub sections_found: Vec<String>,
}

impl ReviewDraft {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            ..Default::default()
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
