use super::{location_label, summary_line, ReportHeader};
use shared_types::AnalysisResult;
use std::fmt::Write;

pub(super) fn render(result: &AnalysisResult, header: &ReportHeader) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header.title);
    let _ = writeln!(out, "{}", "=".repeat(header.title.chars().count()));
    let _ = writeln!(out, "Document: {}", header.document);
    if !result.sections_found.is_empty() {
        let _ = writeln!(out, "Sections found: {}", result.sections_found.join(", "));
    }
    out.push('\n');

    if result.issues.is_empty() {
        out.push_str("No issues found.\n");
    }
    for (idx, issue) in result.issues.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {:<8} {}",
            idx + 1,
            issue.severity.as_str().to_uppercase(),
            issue.message
        );
        if let Some(location) = location_label(issue) {
            let _ = writeln!(out, "    Location: {}", location);
        }
        if let Some(suggestion) = &issue.suggestion {
            let _ = writeln!(out, "    Suggestion: {}", suggestion);
        }
    }

    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    out.push('\n');
    let _ = writeln!(out, "{}", summary_line(result));
    let _ = writeln!(out, "Risk Score: {}", result.risk_score);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{sample_header, sample_result};

    #[test]
    fn test_console_layout() {
        let result = sample_result();
        let out = render(&result, &sample_header());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "SOW Review Report");
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(out.contains("CRITICAL Missing critical section: Project Overview"));
        assert!(out.contains("    Suggestion: Replace \"TBD\" with specific details."));
        assert!(out.ends_with(&format!("Risk Score: {}\n", result.risk_score)));
    }
}
