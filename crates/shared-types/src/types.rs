use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a flagged issue. Drives the weighted risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized severity: '{0}'")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// What kind of finding an issue represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingSection,
    AmbiguousTerm,
    Contradiction,
    LlmSuggested,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::MissingSection => "Missing section",
            IssueKind::AmbiguousTerm => "Ambiguous term",
            IssueKind::Contradiction => "Contradiction",
            IssueKind::LlmSuggested => "LLM suggestion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized issue kind: '{0}'")]
pub struct UnknownIssueKind(pub String);

impl FromStr for IssueKind {
    type Err = UnknownIssueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "missing_section" | "missing" => Ok(IssueKind::MissingSection),
            "ambiguous_term" | "ambiguity" | "ambiguous" | "vague_language" => {
                Ok(IssueKind::AmbiguousTerm)
            }
            "contradiction" | "inconsistency" => Ok(IssueKind::Contradiction),
            "llm_suggested" => Ok(IssueKind::LlmSuggested),
            _ => Err(UnknownIssueKind(s.to_string())),
        }
    }
}

/// Where an issue came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    Rule,
    Llm,
}

/// Byte range in the cleaned document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Location of an issue: a section name, a span of cleaned text, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<TextSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl IssueLocation {
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            section: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn span(span: TextSpan, snippet: impl Into<String>) -> Self {
        Self {
            span: Some(span),
            snippet: Some(snippet.into()),
            ..Default::default()
        }
    }

    pub fn in_section(mut self, name: Option<String>) -> Self {
        self.section = name;
        self
    }

    /// Two locations overlap when they name the same section or their spans intersect
    pub fn overlaps(&self, other: &IssueLocation) -> bool {
        if let (Some(a), Some(b)) = (&self.span, &other.span) {
            if a.overlaps(b) {
                return true;
            }
        }
        match (&self.section, &other.section) {
            (Some(a), Some(b)) => section_key(a) == section_key(b),
            _ => false,
        }
    }
}

/// Canonical lookup key for a section name: lowercase, `_`/`-` as spaces, single-spaced
pub fn section_key(name: &str) -> String {
    name.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single flagged finding. Built once and never mutated after it joins a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub source: IssueSource,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<IssueLocation>,
}

impl Issue {
    /// Issue produced by one of the rule-based detectors
    pub fn rule(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            source: IssueSource::Rule,
            message: message.into(),
            suggestion: None,
            location: None,
        }
    }

    /// Issue supplied by the language-model advisory
    pub fn llm(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::LlmSuggested,
            severity,
            source: IssueSource::Llm,
            message: message.into(),
            suggestion: None,
            location: None,
        }
    }

    pub fn with_location(mut self, location: IssueLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_rule_based(&self) -> bool {
        self.source == IssueSource::Rule
    }
}

/// Untyped issue record as returned by an external reviewer.
///
/// `severity` is kept as text until the record is admitted into a result,
/// since nothing guarantees the external side used a recognized value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIssue {
    #[serde(alias = "issue")]
    pub message: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    /// Optional hint naming the kind of finding (e.g. "missing_section")
    #[serde(default)]
    pub category: Option<String>,
    /// Optional section the finding refers to
    #[serde(default)]
    pub section: Option<String>,
}

impl ExternalIssue {
    pub fn new(message: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: severity.into(),
            ..Default::default()
        }
    }

    pub fn severity(&self) -> Result<Severity, UnknownSeverity> {
        self.severity.parse()
    }

    /// Kind hinted by `category`, ignoring hints that don't name a known kind
    pub fn kind_hint(&self) -> Option<IssueKind> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn location(&self) -> Option<IssueLocation> {
        self.section
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| IssueLocation::section(s.trim()))
    }
}
