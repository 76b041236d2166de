//! Built-in vocabularies and text-matching helpers shared by the detectors

use lazy_static::lazy_static;
use regex::Regex;

/// Sections expected in a construction Scope of Work, in report order
pub const DEFAULT_REQUIRED_SECTIONS: &[&str] = &[
    "Project Overview",
    "Scope",
    "Timeline",
    "Materials",
    "Costs",
    "Payment Terms",
    "Deliverables",
    "Quality Standards",
    "Legal Clauses",
];

/// Heading synonyms per section key. Earlier entries are tried first.
pub const DEFAULT_SECTION_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "project overview",
        &[
            "project overview",
            "project description",
            "introduction",
            "background",
            "purpose",
        ],
    ),
    (
        "scope",
        &[
            "scope of work",
            "statement of work",
            "project scope",
            "work scope",
            "scope",
        ],
    ),
    (
        "timeline",
        &[
            "timeline",
            "project schedule",
            "schedule",
            "duration",
            "deadlines",
            "deadline",
            "milestones",
            "milestone",
            "time frame",
        ],
    ),
    (
        "materials",
        &[
            "materials",
            "material requirements",
            "equipment",
            "supplies",
            "resources",
        ],
    ),
    (
        "costs",
        &[
            "costs",
            "cost breakdown",
            "cost",
            "budget",
            "budgetary",
            "pricing",
            "estimate",
            "financial",
        ],
    ),
    (
        "payment terms",
        &[
            "payment terms",
            "payment schedule",
            "payment",
            "invoicing",
            "invoice",
            "billing",
        ],
    ),
    (
        "deliverables",
        &["deliverables", "deliverable", "delivery", "output", "result", "product"],
    ),
    (
        "quality standards",
        &[
            "quality standards",
            "quality assurance",
            "quality",
            "standards",
            "specifications",
            "specification",
            "requirements",
        ],
    ),
    (
        "legal clauses",
        &[
            "legal clauses",
            "legal",
            "terms and conditions",
            "clauses",
            "liability",
            "warranty",
            "indemnification",
        ],
    ),
];

/// Vague wording that leaves obligations open to interpretation
pub const DEFAULT_AMBIGUOUS_TERMS: &[&str] = &[
    "as per standard",
    "TBD",
    "to be determined",
    "as required",
    "if necessary",
    "subject to change",
    "etc.",
    "or equivalent",
    "as needed",
    "unless otherwise specified",
    "approximately",
];

pub const START_DATE_KEYWORDS: &[&str] = &[
    "start date",
    "commencement date",
    "commence on",
    "start on",
];

pub const COMPLETION_DATE_KEYWORDS: &[&str] = &[
    "completion date",
    "substantial completion",
    "completion expected by",
    "completed by",
    "complete by",
];

pub const DEADLINE_KEYWORDS: &[&str] = &["deadline", "due date", "due by"];

pub const TOTAL_COST_KEYWORDS: &[&str] = &[
    "total cost",
    "contract sum",
    "contract price",
    "total contract value",
    "total price",
    "budget",
];

pub const DURATION_KEYWORDS: &[&str] = &[
    "project duration",
    "duration",
    "completion in",
    "completed within",
    "phases spanning",
    "spanning",
];

lazy_static! {
    /// Full-line boilerplate commonly stamped on every page
    pub static ref BOILERPLATE_LINES: Vec<Regex> = vec![
        Regex::new(r"(?i)^page\s+\d+(?:\s+of\s+\d+)?$").unwrap(),
        Regex::new(r"^-\s*\d+\s*-$").unwrap(),
        Regex::new(r"(?i)^(?:confidential|draft|proprietary)$").unwrap(),
        Regex::new(r"(?i)^version\s+\d+(?:\.\d+)+$").unwrap(),
        Regex::new(r"(?i)^(?:©|\(c\)|copyright)\s*\d{4}\b.{0,60}$").unwrap(),
    ];

    /// Leading numbering on headings: "1.", "2.3", "Section 4:", "Article IV -"
    pub static ref HEADING_NUMBERING: Regex = Regex::new(
        r"(?i)^(?:(?:section|article|part)\s+[0-9ivxlc]+(?:\.[0-9]+)*\b\s*[:.\-–]?\s*|[0-9]+(?:\.[0-9]+)*\s*[.):\-–]?\s+|[a-z]\s*[.)]\s+)"
    )
    .unwrap();
}

/// Compile a literal phrase into a case-insensitive pattern bounded at word edges
pub fn phrase_regex(phrase: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", phrase_pattern(phrase)))
}

/// Like [`phrase_regex`], but the phrase must open the haystack
pub fn leading_phrase_regex(phrase: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i)^{}", phrase_pattern(phrase)))
}

fn phrase_pattern(phrase: &str) -> String {
    let trimmed = phrase.trim();
    let escaped = trimmed
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let starts_word = trimmed.chars().next().is_some_and(is_word_char);
    let ends_word = trimmed.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        escaped,
        if ends_word { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Extract a snippet around a byte range, widened to `radius` bytes on each side
pub fn snippet_around(text: &str, start: usize, end: usize, radius: usize) -> String {
    let from = floor_char_boundary(text, start.saturating_sub(radius));
    let to = ceil_char_boundary(text, (end + radius).min(text.len()));
    let snippet = text[from..to].split_whitespace().collect::<Vec<_>>().join(" ");
    let prefix = if from > 0 { "..." } else { "" };
    let suffix = if to < text.len() { "..." } else { "" };
    format!("{}{}{}", prefix, snippet, suffix)
}

pub(crate) fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub(crate) fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Byte offset where the line containing `pos` ends
pub(crate) fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_regex_respects_word_edges() {
        let re = phrase_regex("TBD").unwrap();
        assert!(re.is_match("Budget is TBD."));
        assert!(re.is_match("budget is tbd"));
        assert!(!re.is_match("TBDX"));

        let re = phrase_regex("etc.").unwrap();
        assert!(re.is_match("concrete, steel, etc. will be"));
        assert!(!re.is_match("etcetera"));
    }

    #[test]
    fn test_phrase_regex_tolerates_line_breaks() {
        let re = phrase_regex("as per standard").unwrap();
        assert!(re.is_match("maintained as per\nstandard"));
    }

    #[test]
    fn test_leading_phrase_regex_is_anchored() {
        let re = leading_phrase_regex("scope of work").unwrap();
        assert!(re.is_match("SCOPE OF WORK"));
        assert!(re.is_match("Scope of Work: all civil works"));
        assert!(!re.is_match("Full scope of work"));
    }

    #[test]
    fn test_snippet_around_marks_truncation() {
        let text = "The budget is TBD and subject to change later on.";
        let start = text.find("TBD").unwrap();
        let snippet = snippet_around(text, start, start + 3, 6);
        assert_eq!(snippet, "...et is TBD and s...");
    }

    #[test]
    fn test_snippet_around_handles_multibyte() {
        let text = "ééééé TBD ééééé";
        let start = text.find("TBD").unwrap();
        // Radius lands mid-character on both sides
        let snippet = snippet_around(text, start, start + 3, 4);
        assert!(snippet.contains("TBD"));
    }

    #[test]
    fn test_boilerplate_patterns() {
        let is_boiler = |l: &str| BOILERPLATE_LINES.iter().any(|re| re.is_match(l));
        assert!(is_boiler("Page 3 of 12"));
        assert!(is_boiler("CONFIDENTIAL"));
        assert!(is_boiler("Version 2.1"));
        assert!(is_boiler("© 2024 Acme Builders"));
        assert!(!is_boiler("Completion date: Jan 1, 2024"));
        assert!(!is_boiler("This draft schedule is confidential"));
    }

    #[test]
    fn test_heading_numbering() {
        assert_eq!(HEADING_NUMBERING.replace("1. Scope", ""), "Scope");
        assert_eq!(HEADING_NUMBERING.replace("2.3 Timeline", ""), "Timeline");
        assert_eq!(HEADING_NUMBERING.replace("Section 4: Costs", ""), "Costs");
        assert_eq!(HEADING_NUMBERING.replace("Article IV - Legal", ""), "Legal");
        assert_eq!(HEADING_NUMBERING.replace("Timeline", ""), "Timeline");
        assert_eq!(
            HEADING_NUMBERING.replace("Part concrete works", ""),
            "Part concrete works"
        );
    }
}
