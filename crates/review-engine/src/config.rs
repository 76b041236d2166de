//! Review configuration loaded from TOML.
//!
//! ```toml
//! template = "template.json"
//! vocabulary = "vocabulary.toml"
//!
//! [weights]
//! critical = 10
//! warning = 5
//! info = 1
//!
//! [llm]
//! enabled = true
//! model = "gpt-3.5-turbo"
//! timeout_ms = 30000
//! ```
//!
//! Relative `template`/`vocabulary` paths are resolved against the
//! directory of the config file.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use shared_types::ScoringWeights;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub weights: ScoringWeights,
    pub llm: LlmSettings,
    /// Reference template JSON; the built-in construction template when absent
    pub template: Option<PathBuf>,
    /// Vocabulary TOML; the built-in vocabulary when absent
    pub vocabulary: Option<PathBuf>,
}

/// Settings for the language-model advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    pub retry_once: bool,
    /// Characters of cleaned text sent with the prompt
    pub excerpt_chars: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 2000,
            temperature: 0.3,
            timeout_ms: 30_000,
            retry_once: true,
            excerpt_chars: 12_000,
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ReviewConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.template = config.template.map(|p| base.join(p));
            config.vocabulary = config.vocabulary.map(|p| base.join(p));
        }
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ReviewConfig =
            toml::from_str(s).map_err(|e| EngineError::config(format!("Invalid config: {}", e)))?;
        if config.llm.timeout_ms == 0 {
            return Err(EngineError::config("llm.timeout_ms must be positive"));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReviewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(config.weights, ScoringWeights::new(10, 5, 1));
        assert_eq!(config.llm.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_weights() {
        let config = ReviewConfig::from_toml_str(
            r#"
            [weights]
            critical = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.weights, ScoringWeights::new(25, 5, 1));
    }

    #[test]
    fn test_llm_section() {
        let config = ReviewConfig::from_toml_str(
            r#"
            [llm]
            enabled = true
            model = "gpt-4o-mini"
            retry_once = false
            "#,
        )
        .unwrap();
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(!config.llm.retry_once);
        assert_eq!(config.llm.max_tokens, 2000);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = ReviewConfig::from_toml_str("[weights]\ncritical = -1").unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ReviewConfig::from_toml_str("[llm]\ntimeout_ms = 0").is_err());
    }

    #[test]
    fn test_relative_paths_resolved_against_config_dir() {
        let dir = std::env::temp_dir().join(format!("review-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("review.toml");
        fs::write(&path, "template = \"template.json\"\n").unwrap();

        let config = ReviewConfig::from_file(&path).unwrap();
        assert_eq!(config.template, Some(dir.join("template.json")));

        fs::remove_dir_all(&dir).ok();
    }
}
