//! Conflicting date, amount and duration statements

use super::{ReviewRule, SNIPPET_RADIUS};
use crate::document::ReviewDocument;
use crate::error::{EngineError, Result};
use crate::extractors::{find_token, parse_value, Value, ValueError};
use crate::patterns::{line_end, phrase_regex, snippet_around};
use crate::vocabulary::{ContradictionVocabulary, ValueKind};
use regex::Regex;
use shared_types::{Issue, IssueKind, IssueLocation, Severity, TextSpan};
use tracing::{debug, warn};

/// Furthest a value may start after its keyword, in bytes
const MAX_VALUE_GAP: usize = 40;

struct Category {
    name: String,
    kind: ValueKind,
    keywords: Vec<Regex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct KeywordHit {
    start: usize,
    end: usize,
    category: usize,
}

#[derive(Debug, Clone)]
struct Observation {
    raw: String,
    span: TextSpan,
    value: Value,
}

/// Flags categories whose keyword-associated values disagree.
///
/// A value belongs to the nearest keyword before it on the same line, and
/// must start within a short distance of it. Values are normalized before
/// comparison, so "$10,000" and "10000.00" agree. One issue is emitted per
/// conflicting category.
pub struct ContradictionRule {
    categories: Vec<Category>,
}

impl ContradictionRule {
    pub fn new(vocabulary: &ContradictionVocabulary) -> Result<Self> {
        let categories = vocabulary
            .categories
            .iter()
            .map(|spec| {
                let keywords = spec
                    .keywords
                    .iter()
                    .map(|k| {
                        phrase_regex(k).map_err(|e| {
                            EngineError::config(format!(
                                "Invalid keyword '{}' in category '{}': {}",
                                k, spec.name, e
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Category {
                    name: spec.name.clone(),
                    kind: spec.value,
                    keywords,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { categories })
    }

    /// Keyword occurrences for every category, in document order
    fn keyword_hits(&self, text: &str) -> Vec<KeywordHit> {
        let mut hits: Vec<KeywordHit> = self
            .categories
            .iter()
            .enumerate()
            .flat_map(|(category, c)| {
                c.keywords.iter().flat_map(move |re| {
                    re.find_iter(text).map(move |m| KeywordHit {
                        start: m.start(),
                        end: m.end(),
                        category,
                    })
                })
            })
            .collect();
        hits.sort();
        hits
    }

    /// Values attached to one category's keywords. Fails if any of them does not normalize.
    fn observe(
        &self,
        category: usize,
        hits: &[KeywordHit],
        text: &str,
    ) -> std::result::Result<Vec<Observation>, ValueError> {
        let kind = self.categories[category].kind;
        let mut observations: Vec<Observation> = Vec::new();

        for (idx, hit) in hits.iter().enumerate() {
            if hit.category != category {
                continue;
            }
            // Stop at the line end or the next keyword, whichever is first
            let boundary = hits[idx + 1..]
                .iter()
                .find(|next| next.start >= hit.end)
                .map(|next| next.start)
                .unwrap_or(usize::MAX)
                .min(line_end(text, hit.end));
            let haystack = &text[hit.end..boundary];

            let Some((start, end)) = find_token(kind, haystack, MAX_VALUE_GAP) else {
                continue;
            };
            let span = TextSpan::new(hit.end + start, hit.end + end);
            if observations.iter().any(|o| o.span == span) {
                continue;
            }
            let raw = text[span.start..span.end].trim().to_string();
            let value = parse_value(kind, &raw)?;
            observations.push(Observation { raw, span, value });
        }
        Ok(observations)
    }

    fn evaluate(
        &self,
        category: &Category,
        observations: &[Observation],
        document: &ReviewDocument,
    ) -> Option<Issue> {
        // Index of the first value that disagrees with anything before it
        let conflict = (1..observations.len()).find(|&j| {
            observations[..j]
                .iter()
                .any(|earlier| earlier.value.conflicts_with(&observations[j].value))
        })?;

        let mut distinct: Vec<&Observation> = Vec::new();
        for obs in observations {
            if !distinct.iter().any(|d| d.value == obs.value) {
                distinct.push(obs);
            }
        }
        let values = distinct
            .iter()
            .map(|o| format!("\"{}\"", o.raw))
            .collect::<Vec<_>>()
            .join(" vs. ");

        let span = observations[conflict].span;
        let location = IssueLocation::span(
            span,
            snippet_around(document.text(), span.start, span.end, SNIPPET_RADIUS),
        )
        .in_section(document.section_at(span.start));

        Some(
            Issue::rule(
                IssueKind::Contradiction,
                Severity::Critical,
                format!("Potential contradiction in {}: {}", category.name, values),
            )
            .with_suggestion(format!(
                "Clarify the {} and ensure consistency across the document.",
                category.name
            ))
            .with_location(location),
        )
    }
}

impl ReviewRule for ContradictionRule {
    fn name(&self) -> &str {
        "contradictions"
    }

    fn check(&self, document: &ReviewDocument) -> Vec<Issue> {
        let text = document.text();
        let hits = self.keyword_hits(text);

        let mut issues = Vec::new();
        for (idx, category) in self.categories.iter().enumerate() {
            let observations = match self.observe(idx, &hits, text) {
                Ok(observations) => observations,
                Err(e) => {
                    warn!(
                        category = %category.name,
                        error = %e,
                        "Skipping category: value did not normalize"
                    );
                    continue;
                }
            };
            debug!(
                category = %category.name,
                values = observations.len(),
                "Contradiction candidates"
            );
            if observations.len() < 2 {
                continue;
            }
            issues.extend(self.evaluate(category, &observations, document));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SectionCatalog;
    use crate::template::ReferenceTemplate;
    use crate::vocabulary::SectionVocabulary;
    use pretty_assertions::assert_eq;

    fn check(text: &str) -> Vec<Issue> {
        let catalog =
            SectionCatalog::compile(&ReferenceTemplate::default(), &SectionVocabulary::default())
                .unwrap();
        let rule = ContradictionRule::new(&ContradictionVocabulary::default()).unwrap();
        rule.check(&ReviewDocument::from_raw(text, &catalog))
    }

    #[test]
    fn test_conflicting_completion_dates() {
        let issues =
            check("Completion date: Jan 1, 2024\nSome work.\nCompletion date: Feb 1, 2024");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Contradiction);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(
            issues[0].message,
            "Potential contradiction in completion date: \"Jan 1, 2024\" vs. \"Feb 1, 2024\""
        );
    }

    #[test]
    fn test_same_date_in_different_formats_agrees() {
        let issues =
            check("Completion date: 2024-01-01.\nSubstantial completion: January 1st, 2024");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_currency_formats_normalized() {
        assert!(check("Total cost: $10,000\nContract sum of 10000.00 payable").is_empty());

        let issues = check("Total cost: $10,000\nContract price: $12,500");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("total cost"));
    }

    #[test]
    fn test_scaled_amount_agrees_with_full_figure() {
        assert!(check("Total cost: $1.5M\nContract sum: $1,500,000").is_empty());
        assert_eq!(check("Total cost: $1.5M\nContract sum: $1,000,000").len(), 1);
    }

    #[test]
    fn test_duration_contradiction() {
        let issues =
            check("TIMELINE\nCompletion in 6 months.\nThe phases spanning 12 months may overlap.");
        assert_eq!(issues.len(), 1);
        let location = issues[0].location.as_ref().unwrap();
        assert_eq!(location.section.as_deref(), Some("Timeline"));
        assert!(location.snippet.as_deref().unwrap().contains("12 months"));
    }

    #[test]
    fn test_single_value_is_not_a_contradiction() {
        assert!(check("Deadline: March 3, 2025").is_empty());
    }

    #[test]
    fn test_parse_failure_skips_category_only() {
        let text = "Completion date: Feb 30, 2024\nCompletion date: Mar 1, 2024\n\
                    Total cost: $5,000\nTotal cost: $6,000";
        let issues = check(text);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("total cost"));
    }

    #[test]
    fn test_value_belongs_to_nearest_keyword() {
        // The start date must not be read as a second completion date
        let text =
            "Completion date: TBD; start date: March 1, 2024\nCompletion date: June 30, 2024";
        assert!(check(text).is_empty());
    }

    #[test]
    fn test_month_only_value_agrees_with_day() {
        assert!(check("Deadline: March 2025\nFinal deadline: March 14, 2025").is_empty());
    }

    #[test]
    fn test_values_on_other_lines_not_associated() {
        assert!(check("Total cost\n$5,000\nTotal cost: $6,000").is_empty());
    }

    #[test]
    fn test_distinct_values_listed_in_first_seen_order() {
        let text = "Deadline: May 1, 2024\nDeadline: June 1, 2024\nDeadline: 2024-05-01";
        let issues = check(text);
        assert_eq!(
            issues[0].message,
            "Potential contradiction in deadline: \"May 1, 2024\" vs. \"June 1, 2024\""
        );
    }
}
