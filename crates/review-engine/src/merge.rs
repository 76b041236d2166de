//! Merging advisory issues into a rule-based draft

use crate::draft::ReviewDraft;
use crate::error::{EngineError, Result};
use shared_types::{ExternalIssue, Issue, IssueKind};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Messages at or above this token overlap count as the same finding
const NEAR_IDENTICAL_JACCARD: f64 = 0.8;

/// Turn an untyped record into an LLM-sourced issue, rejecting unknown severities
pub fn admit_external(record: &ExternalIssue) -> Result<Issue> {
    let severity = record.severity().map_err(|_| EngineError::InvalidIssue {
        message: record.message.clone(),
        severity: record.severity.clone(),
    })?;

    let mut issue = Issue::llm(severity, record.message.trim());
    if let Some(suggestion) = record.suggestion.as_deref().map(str::trim) {
        if !suggestion.is_empty() {
            issue = issue.with_suggestion(suggestion);
        }
    }
    if let Some(location) = record.location() {
        issue = issue.with_location(location);
    }
    Ok(issue)
}

/// Append advisory issues to a draft.
///
/// Records with an unrecognized severity are skipped and noted in the
/// draft's warnings. A record is dropped as a duplicate when its category
/// hint names the kind of an existing rule issue, their locations overlap
/// and their messages are near-identical.
pub fn merge_external_issues(mut draft: ReviewDraft, records: Vec<ExternalIssue>) -> ReviewDraft {
    for record in records {
        if record.message.trim().is_empty() {
            debug!("Skipping advisory record with empty message");
            continue;
        }

        let issue = match admit_external(&record) {
            Ok(issue) => issue,
            Err(e) => {
                warn!(error = %e, "Skipping advisory issue");
                draft.warn(e.to_string());
                continue;
            }
        };

        if let Some(kind) = record.kind_hint() {
            if let Some(existing) = draft
                .issues
                .iter()
                .find(|existing| duplicates_rule_issue(existing, kind, &issue))
            {
                debug!(
                    advisory = %issue.message,
                    rule = %existing.message,
                    "Dropping advisory issue already reported by a rule"
                );
                continue;
            }
        }

        draft.push(issue);
    }
    draft
}

fn duplicates_rule_issue(existing: &Issue, hint: IssueKind, candidate: &Issue) -> bool {
    if !existing.is_rule_based() || existing.kind != hint {
        return false;
    }
    let overlapping = match (&existing.location, &candidate.location) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    };
    overlapping && near_identical(&existing.message, &candidate.message)
}

fn tokens(message: &str) -> Vec<String> {
    message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Token-set Jaccard similarity, or one normalized message containing the other
pub(crate) fn near_identical(a: &str, b: &str) -> bool {
    let (ta, tb) = (tokens(a), tokens(b));
    if ta.is_empty() || tb.is_empty() {
        return false;
    }

    let (joined_a, joined_b) = (ta.join(" "), tb.join(" "));
    if joined_a.contains(&joined_b) || joined_b.contains(&joined_a) {
        return true;
    }

    let sa: HashSet<&String> = ta.iter().collect();
    let sb: HashSet<&String> = tb.iter().collect();
    let shared = sa.intersection(&sb).count() as f64;
    let union = sa.union(&sb).count() as f64;
    shared / union >= NEAR_IDENTICAL_JACCARD
}
