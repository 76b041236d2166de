//! Vague-language detection

use super::{ReviewRule, SNIPPET_RADIUS};
use crate::document::ReviewDocument;
use crate::error::{EngineError, Result};
use crate::patterns::{phrase_regex, snippet_around};
use crate::vocabulary::AmbiguityVocabulary;
use regex::Regex;
use shared_types::{Issue, IssueKind, IssueLocation, Severity, TextSpan};
use std::collections::HashSet;

struct Term {
    phrase: String,
    pattern: Regex,
}

/// Flags every occurrence of a configured vague term.
///
/// Matches from all terms are reported in offset order. Different terms
/// overlapping each other are all reported; the same span found twice is
/// reported once.
pub struct AmbiguityRule {
    terms: Vec<Term>,
}

impl AmbiguityRule {
    pub fn new(vocabulary: &AmbiguityVocabulary) -> Result<Self> {
        let terms = vocabulary
            .terms
            .iter()
            .map(|phrase| {
                phrase_regex(phrase)
                    .map(|pattern| Term {
                        phrase: phrase.trim().to_string(),
                        pattern,
                    })
                    .map_err(|e| {
                        EngineError::config(format!("Invalid ambiguous term '{}': {}", phrase, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { terms })
    }
}

impl ReviewRule for AmbiguityRule {
    fn name(&self) -> &str {
        "ambiguous-terms"
    }

    fn check(&self, document: &ReviewDocument) -> Vec<Issue> {
        let text = document.text();

        // (span, term index); sorted so output follows the document
        let mut hits: Vec<(TextSpan, usize)> = self
            .terms
            .iter()
            .enumerate()
            .flat_map(|(idx, term)| {
                term.pattern
                    .find_iter(text)
                    .map(move |m| (TextSpan::new(m.start(), m.end()), idx))
            })
            .collect();
        hits.sort();

        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|(span, _)| seen.insert(*span))
            .map(|(span, idx)| {
                let term = &self.terms[idx].phrase;
                let location = IssueLocation::span(
                    span,
                    snippet_around(text, span.start, span.end, SNIPPET_RADIUS),
                )
                .in_section(document.section_at(span.start));
                Issue::rule(
                    IssueKind::AmbiguousTerm,
                    Severity::Warning,
                    format!("Ambiguous term found: \"{}\"", term),
                )
                .with_suggestion(format!("Replace \"{}\" with specific details.", term))
                .with_location(location)
            })
            .collect()
    }
}
