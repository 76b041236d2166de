//! Required-section presence check

use super::ReviewRule;
use crate::document::ReviewDocument;
use crate::outline::{HeadingCandidate, SectionCatalog, SectionEntry};
use crate::vocabulary::SectionScope;
use shared_types::{Issue, IssueKind, IssueLocation, Severity};
use tracing::debug;

/// Flags every required section none of whose synonyms can be found.
///
/// Sections are checked in template order; the first synonym that matches
/// settles the section.
pub struct SectionRule {
    scope: SectionScope,
    required: Vec<SectionEntry>,
}

impl SectionRule {
    pub fn new(catalog: &SectionCatalog, scope: SectionScope) -> Self {
        Self {
            scope,
            required: catalog.required().cloned().collect(),
        }
    }

    fn is_present(
        &self,
        entry: &SectionEntry,
        document: &ReviewDocument,
        headings: &[HeadingCandidate<'_>],
    ) -> bool {
        match self.scope {
            SectionScope::Heading => headings
                .iter()
                .any(|line| entry.heading_match(line.text).is_some()),
            SectionScope::Anywhere => entry.find_anywhere(document.text()).is_some(),
        }
    }
}

impl ReviewRule for SectionRule {
    fn name(&self) -> &str {
        "required-sections"
    }

    fn check(&self, document: &ReviewDocument) -> Vec<Issue> {
        if document.is_empty() {
            return Vec::new();
        }
        let headings = document.heading_candidates();
        self.required
            .iter()
            .filter(|entry| {
                let present = self.is_present(entry, document, &headings);
                debug!(section = %entry.name, present, "Section check");
                !present
            })
            .map(|entry| {
                Issue::rule(
                    IssueKind::MissingSection,
                    Severity::Critical,
                    format!("Missing critical section: {}", entry.name),
                )
                .with_suggestion(format!("Add a section for {}.", entry.name))
                .with_location(IssueLocation::section(entry.name.clone()))
            })
            .collect()
    }
}
