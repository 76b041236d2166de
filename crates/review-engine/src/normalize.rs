//! Text normalizer: turns raw extracted text into clean review text.
//!
//! Pages are separated by form feeds (`\x0C`), as produced by the PDF
//! extractor. Lines repeated at the top or bottom of most pages are treated
//! as running headers/footers and dropped, as are full-line boilerplate
//! stamps. Paragraph boundaries survive as single blank lines.

use crate::extractors::dates::DATE_TOKEN;
use crate::patterns::BOILERPLATE_LINES;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Lines inspected at each end of a page when looking for running headers
const EDGE_LINES: usize = 3;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
    static ref PAGE_WORD: Regex = Regex::new(r"(?i)\bpage\b").unwrap();
    /// "7", "- 7 -", "Page 7", "7 of 12", "7/12"
    static ref PAGE_NUMBER_LINE: Regex =
        Regex::new(r"(?i)^(?:page\s*)?[-–]?\s*\d+\s*[-–]?(?:\s*(?:of|/)\s*\d+)?$").unwrap();
}

/// Normalize raw document text. Deterministic; empty input yields an empty string.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let pages: Vec<Vec<String>> = unified
        .split('\x0C')
        .map(|page| page.lines().map(clean_line).collect())
        .collect();

    let running = running_lines(&pages);
    if !running.is_empty() {
        debug!(count = running.len(), "Removing running headers/footers");
    }

    let mut out: Vec<&str> = Vec::new();
    for page in &pages {
        // Page breaks count as paragraph breaks
        if !out.is_empty() {
            out.push("");
        }
        let content = content_range(page);
        for (idx, line) in page.iter().enumerate() {
            let at_edge = is_edge(idx, &content);
            if at_edge && running.contains(&running_key(line)) {
                continue;
            }
            if is_boilerplate(line) {
                continue;
            }
            out.push(line);
        }
    }

    collapse_blank_runs(&out)
}

/// Collapse interior whitespace and strip control characters
fn clean_line(line: &str) -> String {
    line.chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_boilerplate(line: &str) -> bool {
    !line.is_empty() && BOILERPLATE_LINES.iter().any(|re| re.is_match(line))
}

/// Index range of the non-blank lines on a page
fn content_range(page: &[String]) -> std::ops::Range<usize> {
    let first = page.iter().position(|l| !l.is_empty());
    let last = page.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(f), Some(l)) => f..l + 1,
        _ => 0..0,
    }
}

/// Whether a line falls in the first or last EDGE_LINES non-blank lines
fn is_edge(idx: usize, content: &std::ops::Range<usize>) -> bool {
    content.contains(&idx)
        && (idx < content.start + EDGE_LINES || idx + EDGE_LINES >= content.end)
}

/// Comparison key for header/footer candidates.
///
/// Page-number lines vary only in their digits, so digits are masked for
/// them. Anything else has to repeat verbatim (ignoring case), so two
/// different dates or amounts never share a key.
fn running_key(line: &str) -> String {
    let lower = line.to_lowercase();
    if is_page_number_line(&lower) {
        DIGITS.replace_all(&lower, "#").into_owned()
    } else {
        lower
    }
}

fn is_page_number_line(line: &str) -> bool {
    if PAGE_NUMBER_LINE.is_match(line) {
        return true;
    }
    PAGE_WORD.is_match(line)
        && !line.contains([':', '$', '€', '£'])
        && !DATE_TOKEN.is_match(line)
}

/// Keys of lines that recur at page edges on at least two pages and at least half of them
fn running_lines(pages: &[Vec<String>]) -> HashSet<String> {
    let page_count = pages.iter().filter(|p| p.iter().any(|l| !l.is_empty())).count();
    if page_count < 2 {
        return HashSet::new();
    }

    let mut seen_on: HashMap<String, usize> = HashMap::new();
    for page in pages {
        let content = content_range(page);
        let keys: HashSet<String> = page
            .iter()
            .enumerate()
            .filter(|(idx, line)| !line.is_empty() && is_edge(*idx, &content))
            .map(|(_, line)| running_key(line))
            .collect();
        for key in keys {
            *seen_on.entry(key).or_insert(0) += 1;
        }
    }

    seen_on
        .into_iter()
        .filter(|(_, pages_with)| *pages_with >= 2 && pages_with * 2 >= page_count)
        .map(|(key, _)| key)
        .collect()
}

fn collapse_blank_runs(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut pending_blank = false;
    for line in lines {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_returns_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t\n\x0C  "), "");
    }

    #[test]
    fn test_whitespace_collapsed_and_paragraphs_kept() {
        let raw = "  SCOPE   OF WORK \r\n\tAll\t civil works.\r\n\r\n\r\n\r\nTIMELINE\n";
        assert_eq!(normalize(raw), "SCOPE OF WORK\nAll civil works.\n\nTIMELINE");
    }

    #[test]
    fn test_running_header_and_page_footer_removed() {
        let raw = "ACME Builders - Hospital SOW\nSCOPE\nAll civil works.\nPage 1 of 2\x0C\
                   ACME Builders - Hospital SOW\nTIMELINE\nCompletion date: Jan 1, 2024\nPage 2 of 2";
        let clean = normalize(raw);
        assert!(!clean.contains("ACME Builders"));
        assert!(!clean.contains("Page"));
        assert!(clean.contains("SCOPE\nAll civil works."));
        assert!(clean.contains("Completion date: Jan 1, 2024"));
    }

    #[test]
    fn test_distinct_dates_at_page_edges_survive() {
        let raw = "Completion date: Jan 1, 2024\nBody one.\x0CCompletion date: Feb 1, 2024\nBody two.";
        let clean = normalize(raw);
        assert!(clean.contains("Jan 1, 2024"));
        assert!(clean.contains("Feb 1, 2024"));
    }

    #[test]
    fn test_short_dated_lines_at_page_edges_survive() {
        let raw = "Deadline: 2024-05-01\nSCOPE OF WORK\nAll works.\x0C\
                   TIMELINE\nMore text here.\nDeadline: 2024-06-01";
        let clean = normalize(raw);
        assert!(clean.contains("Deadline: 2024-05-01"));
        assert!(clean.contains("Deadline: 2024-06-01"));
    }

    #[test]
    fn test_page_number_shapes() {
        for line in ["7", "- 7 -", "page 7", "7 of 12", "page 3 / 9", "acme sow page 3"] {
            assert!(is_page_number_line(line), "{}", line);
        }
        for line in ["deadline: 2024-05-01", "$5,000", "page 2: may 1, 2024", "rev 2"] {
            assert!(!is_page_number_line(line), "{}", line);
        }
    }

    #[test]
    fn test_boilerplate_lines_dropped_but_content_kept() {
        let raw = "CONFIDENTIAL\nPayment terms are confidential until signing.\n- 3 -\nBudget: $10,000";
        assert_eq!(
            normalize(raw),
            "Payment terms are confidential until signing.\nBudget: $10,000"
        );
    }

    #[test]
    fn test_single_page_repeats_kept() {
        // Without page breaks there are no running headers to detect
        let raw = "Deliverables\nDrawings\nDeliverables\nDrawings";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = "Header\nA  b\n\n\nc\nPage 1\x0CHeader\nd\nPage 2";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_control_characters_stripped() {
        assert_eq!(normalize("Costs\u{0007}: $5\u{0000}00"), "Costs: $500");
    }
}
