use super::{location_label, ReportHeader};
use shared_types::{AnalysisResult, Severity};
use std::fmt::Write;

pub(super) fn render(result: &AnalysisResult, header: &ReportHeader) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", header.title);
    let _ = writeln!(out, "**Document:** {}  ", escape(&header.document));
    let _ = writeln!(out, "**Risk score:** {}\n", result.risk_score);

    out.push_str("| Severity | Count | Weight |\n|---|---:|---:|\n");
    for severity in Severity::ALL {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            severity,
            result.count(severity),
            result.weights.weight_for(severity)
        );
    }
    out.push('\n');

    if !result.sections_found.is_empty() {
        let _ = writeln!(out, "**Sections found:** {}\n", result.sections_found.join(", "));
    }
    if result.llm_unavailable {
        out.push_str("> LLM review was unavailable; only rule-based issues are listed.\n\n");
    }

    out.push_str("## Issues\n\n");
    if result.issues.is_empty() {
        out.push_str("No issues found.\n");
    } else {
        out.push_str("| # | Severity | Kind | Issue | Location | Suggestion |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for (idx, issue) in result.issues.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                idx + 1,
                issue.severity,
                issue.kind.label(),
                escape(&issue.message),
                location_label(issue).map(|l| escape(&l)).unwrap_or_default(),
                issue.suggestion.as_deref().map(escape).unwrap_or_default(),
            );
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "- {}", escape(warning));
        }
    }
    out
}

/// Keep cell text on one line and out of the table syntax
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
