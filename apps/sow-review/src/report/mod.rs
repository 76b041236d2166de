//! Report rendering. The output path's extension picks the format.

mod json;
mod markdown;
mod pdf;
mod text;

use anyhow::{bail, Context, Result};
use shared_types::{AnalysisResult, Issue, Severity};
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "SOW Review Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    Text,
    Pdf,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "txt" => Ok(ReportFormat::Text),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => bail!(
                "Unsupported output format for {}. Use .json, .md, .txt or .pdf",
                path.display()
            ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Json => "JSON",
            ReportFormat::Markdown => "Markdown",
            ReportFormat::Text => "Text",
            ReportFormat::Pdf => "PDF",
        }
    }
}

/// Title block shared by the human-readable formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub title: String,
    pub document: String,
}

impl ReportHeader {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            document: document.into(),
        }
    }

    /// Use the document's own title when it has one
    pub fn with_title(mut self, title: Option<String>) -> Self {
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            self.title = format!("{}: {}", DEFAULT_TITLE, title.trim());
        }
        self
    }
}

pub fn render(
    result: &AnalysisResult,
    format: ReportFormat,
    header: &ReportHeader,
) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Json => json::render(result),
        ReportFormat::Markdown => Ok(markdown::render(result, header).into_bytes()),
        ReportFormat::Text => Ok(text::render(result, header).into_bytes()),
        ReportFormat::Pdf => pdf::render(result, header),
    }
}

pub fn write_report(
    result: &AnalysisResult,
    format: ReportFormat,
    header: &ReportHeader,
    path: &Path,
) -> Result<()> {
    let bytes = render(result, format, header)?;
    fs::write(path, bytes).with_context(|| format!("Failed to write report {}", path.display()))
}

/// One-line count of issues by severity
pub fn summary_line(result: &AnalysisResult) -> String {
    let counts: Vec<String> = Severity::ALL
        .iter()
        .map(|s| format!("{}: {}", s, result.count(*s)))
        .collect();
    format!("Summary of issues: {}", counts.join(", "))
}

/// Human-readable location: section, quoted snippet, or both
pub(crate) fn location_label(issue: &Issue) -> Option<String> {
    let location = issue.location.as_ref()?;
    match (&location.section, &location.snippet) {
        (Some(section), Some(snippet)) => Some(format!("{}: \"{}\"", section, snippet)),
        (Some(section), None) => Some(section.clone()),
        (None, Some(snippet)) => Some(format!("\"{}\"", snippet)),
        (None, None) => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_engine::ReviewEngine;

    pub(crate) fn sample_result() -> AnalysisResult {
        let engine = ReviewEngine::construction_default().unwrap();
        engine.analyze(
            "SCOPE OF WORK\nExcavation and grading, TBD.\nTIMELINE\n\
             Deadline: May 1, 2024\nDeadline: June 1, 2024",
        )
    }

    pub(crate) fn sample_header() -> ReportHeader {
        ReportHeader::new("sow.txt")
    }

    #[test]
    fn test_format_from_extension() {
        let format = |p: &str| ReportFormat::from_path(Path::new(p)).unwrap();
        assert_eq!(format("a/report.JSON"), ReportFormat::Json);
        assert_eq!(format("report.md"), ReportFormat::Markdown);
        assert_eq!(format("report.pdf"), ReportFormat::Pdf);
        assert!(ReportFormat::from_path(Path::new("report.docx")).is_err());
        assert!(ReportFormat::from_path(Path::new("report")).is_err());
    }

    #[test]
    fn test_summary_line() {
        let result = sample_result();
        assert_eq!(
            summary_line(&result),
            format!(
                "Summary of issues: Critical: {}, Warning: 1, Info: 0",
                result.count(Severity::Critical)
            )
        );
    }

    #[test]
    fn test_header_title() {
        let header = ReportHeader::new("sow.pdf").with_title(Some("Library Wing".into()));
        assert_eq!(header.title, "SOW Review Report: Library Wing");
        let header = ReportHeader::new("sow.pdf").with_title(Some("  ".into()));
        assert_eq!(header.title, DEFAULT_TITLE);
    }
}
