use crate::types::{Issue, IssueKind, Severity};
use serde::{Deserialize, Serialize};

/// Per-severity weights used by the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_critical")]
    pub critical: u32,
    #[serde(default = "default_warning")]
    pub warning: u32,
    #[serde(default = "default_info")]
    pub info: u32,
}

fn default_critical() -> u32 {
    10
}

fn default_warning() -> u32 {
    5
}

fn default_info() -> u32 {
    1
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            warning: default_warning(),
            info: default_info(),
        }
    }
}

impl ScoringWeights {
    pub fn new(critical: u32, warning: u32, info: u32) -> Self {
        Self {
            critical,
            warning,
            info,
        }
    }

    pub fn weight_for(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Linear weighted sum over the counts
    pub fn score(&self, counts: &SeverityCounts) -> u64 {
        Severity::ALL
            .iter()
            .map(|s| u64::from(counts.get(*s)) * u64::from(self.weight_for(*s)))
            .sum()
    }
}

/// Number of issues at each severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(rename = "Critical")]
    pub critical: u32,
    #[serde(rename = "Warning")]
    pub warning: u32,
    #[serde(rename = "Info")]
    pub info: u32,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

/// Outcome of analyzing one document.
///
/// `severity_counts` and `risk_score` are derived from `issues` by the
/// risk scorer; `weights` records what the score was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub issues: Vec<Issue>,
    pub severity_counts: SeverityCounts,
    pub risk_score: u64,
    pub weights: ScoringWeights,
    /// The advisory was requested but could not deliver
    #[serde(default)]
    pub llm_unavailable: bool,
    /// Non-fatal problems met while assembling the result
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Section headings recognized in the document, in document order
    #[serde(default)]
    pub sections_found: Vec<String>,
}

impl AnalysisResult {
    pub fn count(&self, severity: Severity) -> u32 {
        self.severity_counts.get(severity)
    }

    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Score recomputed from the stored counts and weights
    pub fn recomputed_score(&self) -> u64 {
        self.weights.score(&self.severity_counts)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
