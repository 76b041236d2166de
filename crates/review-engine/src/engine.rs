use crate::config::ReviewConfig;
use crate::document::ReviewDocument;
use crate::draft::ReviewDraft;
use crate::error::Result;
use crate::outline::SectionCatalog;
use crate::rules::{AmbiguityRule, ContradictionRule, ReviewRule, SectionRule};
use crate::scoring::RiskScorer;
use crate::template::ReferenceTemplate;
use crate::vocabulary::Vocabulary;
use shared_types::{AnalysisResult, ScoringWeights};
use tracing::{debug, info};

/// Rule-based reviewer: compiled detectors plus the scorer.
///
/// Built once from configuration and shared read-only across analyses.
pub struct ReviewEngine {
    template: ReferenceTemplate,
    catalog: SectionCatalog,
    rules: Vec<Box<dyn ReviewRule>>,
    scorer: RiskScorer,
}

impl ReviewEngine {
    /// Compile the detectors. Fails with a configuration error on unusable patterns.
    pub fn new(
        template: ReferenceTemplate,
        vocabulary: &Vocabulary,
        weights: ScoringWeights,
    ) -> Result<Self> {
        let catalog = SectionCatalog::compile(&template, &vocabulary.sections)?;
        let rules: Vec<Box<dyn ReviewRule>> = vec![
            Box::new(SectionRule::new(&catalog, vocabulary.sections.scope)),
            Box::new(AmbiguityRule::new(&vocabulary.ambiguity)?),
            Box::new(ContradictionRule::new(&vocabulary.contradictions)?),
        ];
        info!(
            required_sections = template.required_sections().len(),
            ambiguous_terms = vocabulary.ambiguity.terms.len(),
            categories = vocabulary.contradictions.categories.len(),
            "Review engine ready"
        );
        Ok(Self {
            template,
            catalog,
            rules,
            scorer: RiskScorer::new(weights),
        })
    }

    /// Load template and vocabulary named by the config, falling back to built-ins
    pub fn from_config(config: &ReviewConfig) -> Result<Self> {
        let template = match &config.template {
            Some(path) => ReferenceTemplate::from_file(path)?,
            None => ReferenceTemplate::construction_sow(),
        };
        let vocabulary = match &config.vocabulary {
            Some(path) => Vocabulary::from_file(path)?,
            None => Vocabulary::default(),
        };
        Self::new(template, &vocabulary, config.weights)
    }

    /// Engine with the built-in construction template and vocabulary
    pub fn construction_default() -> Result<Self> {
        Self::new(
            ReferenceTemplate::construction_sow(),
            &Vocabulary::default(),
            ScoringWeights::default(),
        )
    }

    pub fn template(&self) -> &ReferenceTemplate {
        &self.template
    }

    pub fn weights(&self) -> ScoringWeights {
        self.scorer.weights()
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Normalize raw text and outline its sections
    pub fn prepare(&self, raw: &str) -> ReviewDocument {
        ReviewDocument::from_raw(raw, &self.catalog)
    }

    /// Run every rule in fixed order. The draft is not yet scored.
    pub fn detect(&self, document: &ReviewDocument) -> ReviewDraft {
        let mut draft = ReviewDraft::default();
        for rule in &self.rules {
            let issues = rule.check(document);
            debug!(rule = rule.name(), found = issues.len(), "Rule finished");
            draft.issues.extend(issues);
        }
        draft.sections_found = document.outline().section_names();
        draft
    }

    /// Rule-only analysis of raw text
    pub fn analyze(&self, raw: &str) -> AnalysisResult {
        let document = self.prepare(raw);
        self.scorer.finalize(self.detect(&document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{IssueKind, Severity};

    #[test]
    fn test_detectors_run_in_fixed_order() {
        let engine = ReviewEngine::new(
            ReferenceTemplate::new(["Legal Clauses"]),
            &Vocabulary::default(),
            ScoringWeights::default(),
        )
        .unwrap();
        let result = engine.analyze("Deadline: May 1, 2024. Costs TBD.\nDeadline: June 1, 2024");
        let kinds: Vec<_> = result.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MissingSection,
                IssueKind::AmbiguousTerm,
                IssueKind::Contradiction
            ]
        );
        assert_eq!(result.risk_score, 10 + 5 + 10);
    }

    #[test]
    fn test_empty_text_yields_clean_result() {
        let engine = ReviewEngine::construction_default().unwrap();
        let result = engine.analyze("");
        assert!(result.is_clean());
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn test_sections_found_reported() {
        let engine = ReviewEngine::construction_default().unwrap();
        let result = engine.analyze("1. Scope of Work\nAll works.\n2. Payment Terms\nNet 30.");
        assert_eq!(result.sections_found, vec!["Scope", "Payment Terms"]);
        assert_eq!(result.count(Severity::Critical), 7);
    }

    #[test]
    fn test_invalid_template_path_fails_fast() {
        let config = ReviewConfig {
            template: Some("/nonexistent/template.json".into()),
            ..Default::default()
        };
        assert!(ReviewEngine::from_config(&config).is_err());
    }
}
