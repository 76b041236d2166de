//! Reference template: the sections a well-formed SOW is expected to contain

use crate::error::{EngineError, Result};
use crate::patterns::DEFAULT_REQUIRED_SECTIONS;
use serde::{Deserialize, Serialize};
use shared_types::section_key;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTemplate {
    #[serde(rename = "requiredSections", alias = "required_sections")]
    required_sections: Vec<String>,
}

impl ReferenceTemplate {
    /// Build a template, dropping names that repeat an earlier one
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let required_sections = sections
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(section_key(name)))
            .collect();
        Self { required_sections }
    }

    /// The nine sections of a construction Scope of Work
    pub fn construction_sow() -> Self {
        Self::new(DEFAULT_REQUIRED_SECTIONS.iter().copied())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ReferenceTemplate = serde_json::from_str(json)
            .map_err(|e| EngineError::config(format!("Invalid reference template: {}", e)))?;

        if let Some(pos) = raw.required_sections.iter().position(|s| s.trim().is_empty()) {
            return Err(EngineError::config(format!(
                "Invalid reference template: section name at index {} is blank",
                pos
            )));
        }

        Ok(Self::new(raw.required_sections))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!(
                "Failed to read reference template {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn required_sections(&self) -> &[String] {
        &self.required_sections
    }

    pub fn is_empty(&self) -> bool {
        self.required_sections.is_empty()
    }
}

impl Default for ReferenceTemplate {
    fn default() -> Self {
        Self::construction_sow()
    }
}
