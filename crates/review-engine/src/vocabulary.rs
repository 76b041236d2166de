//! Keyword and pattern lists used by the detectors.
//!
//! Loaded once at startup from TOML (every table optional, falling back to the
//! built-in construction vocabulary) and never mutated afterwards.
//!
//! ```toml
//! [sections]
//! scope = "heading"
//!
//! [sections.synonyms]
//! "legal clauses" = ["legal clauses", "legal", "liability"]
//!
//! [ambiguity]
//! terms = ["TBD", "as required"]
//!
//! [[contradictions.categories]]
//! name = "completion date"
//! value = "date"
//! keywords = ["completion date", "completed by"]
//! ```

use crate::error::{EngineError, Result};
use crate::patterns::{
    COMPLETION_DATE_KEYWORDS, DEADLINE_KEYWORDS, DEFAULT_AMBIGUOUS_TERMS,
    DEFAULT_SECTION_SYNONYMS, DURATION_KEYWORDS, START_DATE_KEYWORDS, TOTAL_COST_KEYWORDS,
};
use serde::{Deserialize, Serialize};
use shared_types::section_key;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub sections: SectionVocabulary,
    pub ambiguity: AmbiguityVocabulary,
    pub contradictions: ContradictionVocabulary,
}

/// Where a section name or synonym has to appear to count as present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionScope {
    /// At the start of a heading-like line
    #[default]
    Heading,
    /// As a whole word anywhere in the text
    Anywhere,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionVocabulary {
    pub scope: SectionScope,
    /// Section key -> synonyms, tried in list order
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for SectionVocabulary {
    fn default() -> Self {
        let synonyms = DEFAULT_SECTION_SYNONYMS
            .iter()
            .map(|(key, words)| {
                (
                    key.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self {
            scope: SectionScope::Heading,
            synonyms,
        }
    }
}

impl SectionVocabulary {
    /// Patterns to search for a required section: its configured synonyms,
    /// or the name itself when the vocabulary has no entry for it
    pub fn patterns_for(&self, section: &str) -> Vec<String> {
        let key = section_key(section);
        self.synonyms
            .iter()
            .find(|(k, _)| section_key(k) == key)
            .map(|(_, words)| words.clone())
            .filter(|words| !words.is_empty())
            .unwrap_or_else(|| vec![section.trim().to_string()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityVocabulary {
    pub terms: Vec<String>,
}

impl Default for AmbiguityVocabulary {
    fn default() -> Self {
        Self {
            terms: DEFAULT_AMBIGUOUS_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// How values following a contradiction keyword are read and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Date,
    Money,
    Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub value: ValueKind,
    pub keywords: Vec<String>,
}

impl CategorySpec {
    fn new(name: &str, value: ValueKind, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            value,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContradictionVocabulary {
    pub categories: Vec<CategorySpec>,
}

impl Default for ContradictionVocabulary {
    fn default() -> Self {
        Self {
            categories: vec![
                CategorySpec::new("start date", ValueKind::Date, START_DATE_KEYWORDS),
                CategorySpec::new("completion date", ValueKind::Date, COMPLETION_DATE_KEYWORDS),
                CategorySpec::new("deadline", ValueKind::Date, DEADLINE_KEYWORDS),
                CategorySpec::new("total cost", ValueKind::Money, TOTAL_COST_KEYWORDS),
                CategorySpec::new("project duration", ValueKind::Duration, DURATION_KEYWORDS),
            ],
        }
    }
}

impl Vocabulary {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let vocabulary: Vocabulary = toml::from_str(s)
            .map_err(|e| EngineError::config(format!("Invalid vocabulary: {}", e)))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!(
                "Failed to read vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        for (key, words) in &self.sections.synonyms {
            if key.trim().is_empty() || words.iter().any(|w| w.trim().is_empty()) {
                return Err(EngineError::config(format!(
                    "Invalid vocabulary: blank synonym in section '{}'",
                    key
                )));
            }
        }
        if self.ambiguity.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(EngineError::config(
                "Invalid vocabulary: blank ambiguous term",
            ));
        }
        for category in &self.contradictions.categories {
            if category.keywords.is_empty() || category.keywords.iter().any(|k| k.trim().is_empty())
            {
                return Err(EngineError::config(format!(
                    "Invalid vocabulary: category '{}' needs non-blank keywords",
                    category.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let vocab = Vocabulary::from_toml_str("").unwrap();
        assert_eq!(vocab, Vocabulary::default());
    }

    #[test]
    fn test_partial_override_keeps_other_tables() {
        let vocab = Vocabulary::from_toml_str(
            r#"
            [ambiguity]
            terms = ["TBC"]
            "#,
        )
        .unwrap();
        assert_eq!(vocab.ambiguity.terms, vec!["TBC".to_string()]);
        assert_eq!(vocab.sections, SectionVocabulary::default());
        assert_eq!(vocab.contradictions.categories.len(), 5);
    }

    #[test]
    fn test_category_parsing() {
        let vocab = Vocabulary::from_toml_str(
            r#"
            [[contradictions.categories]]
            name = "retainage"
            value = "money"
            keywords = ["retainage"]
            "#,
        )
        .unwrap();
        assert_eq!(vocab.contradictions.categories.len(), 1);
        assert_eq!(vocab.contradictions.categories[0].value, ValueKind::Money);
    }

    #[test]
    fn test_unknown_value_kind_rejected() {
        let err = Vocabulary::from_toml_str(
            r#"
            [[contradictions.categories]]
            name = "x"
            value = "colour"
            keywords = ["x"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_patterns_for_resolves_by_key() {
        let vocab = SectionVocabulary::default();
        let patterns = vocab.patterns_for("Legal_Clauses");
        assert_eq!(patterns[0], "legal clauses");
        assert!(patterns.contains(&"warranty".to_string()));
    }

    #[test]
    fn test_patterns_for_unknown_section_uses_name() {
        let vocab = SectionVocabulary::default();
        assert_eq!(
            vocab.patterns_for("Safety Plan"),
            vec!["Safety Plan".to_string()]
        );
    }

    #[test]
    fn test_scope_parses() {
        let vocab = Vocabulary::from_toml_str(
            r#"
            [sections]
            scope = "anywhere"
            "#,
        )
        .unwrap();
        assert_eq!(vocab.sections.scope, SectionScope::Anywhere);
        // synonyms table omitted -> defaults retained
        assert!(!vocab.sections.synonyms.is_empty());
    }
}
