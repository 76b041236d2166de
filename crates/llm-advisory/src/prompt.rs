use review_engine::AdvisoryError;
use shared_types::ExternalIssue;

pub const SYSTEM_PROMPT: &str = "You are an expert construction contract reviewer.";

const INSTRUCTIONS: &str = "Review this construction SOW and list inconsistencies, \
missing details, or vague language. \
Focus on: timelines, deliverables, materials, costs, and legal clauses. \
For each issue, suggest a fix and assign a severity (Critical/Warning/Info). \
Respond with a JSON array only, in the form \
[{\"issue\": \"...\", \"severity\": \"Critical|Warning|Info\", \"suggestion\": \"...\", \
\"category\": \"missing_section|ambiguous_term|contradiction\", \"section\": \"...\"}]. \
The category and section fields are optional.";

pub fn user_prompt(sow_text: &str) -> String {
    format!("{}\n\nSOW:\n{}", INSTRUCTIONS, sow_text)
}

/// Cut the JSON array out of a model reply and decode its records.
///
/// Models often wrap the array in prose or code fences, so everything
/// before the first `[` and after the last `]` is ignored.
pub fn parse_issue_list(content: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
    let start = content.find('[');
    let end = content.rfind(']');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(AdvisoryError::MalformedResponse(
                "no JSON array in reply".to_string(),
            ))
        }
    };
    serde_json::from_str(json).map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_array_inside_prose() {
        let reply = "Here are the issues:\n```json\n[{\"issue\": \"No warranty period\", \
            \"severity\": \"Warning\", \"suggestion\": \"State a 12-month warranty.\"}]\n```";
        let issues = parse_issue_list(reply).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "No warranty period");
        assert_eq!(issues[0].severity, "Warning");
        assert_eq!(issues[0].suggestion.as_deref(), Some("State a 12-month warranty."));
    }

    #[test]
    fn test_optional_fields() {
        let reply = r#"[{"issue": "Dates disagree", "severity": "Critical",
            "category": "contradiction", "section": "Timeline"}]"#;
        let issues = parse_issue_list(reply).unwrap();
        assert_eq!(issues[0].category.as_deref(), Some("contradiction"));
        assert_eq!(issues[0].section.as_deref(), Some("Timeline"));
        assert_eq!(issues[0].suggestion, None);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_issue_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_no_array_is_malformed() {
        assert!(matches!(
            parse_issue_list("The document looks fine."),
            Err(AdvisoryError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_issue_list("] backwards ["),
            Err(AdvisoryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_single_quoted_pseudo_json_is_malformed() {
        let reply = "[{'issue': 'Vague', 'severity': 'Info'}]";
        assert!(parse_issue_list(reply).is_err());
    }

    #[test]
    fn test_prompt_carries_document() {
        let prompt = user_prompt("TIMELINE\nStart: TBD");
        assert!(prompt.ends_with("SOW:\nTIMELINE\nStart: TBD"));
        assert!(prompt.contains("legal clauses"));
    }
}
