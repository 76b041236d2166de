use crate::client::OpenAiAdvisor;
use review_engine::{Advisor, LlmSettings, NoopAdvisor};
use std::sync::Arc;
use tracing::{info, warn};

/// Live advisor when the advisory is enabled and a key is present, otherwise the no-op
pub fn select_advisor(settings: &LlmSettings, api_key: Option<&str>) -> Arc<dyn Advisor> {
    let key = api_key.map(str::trim).filter(|k| !k.is_empty());
    match key {
        Some(key) if settings.enabled => {
            info!(model = %settings.model, "LLM advisory enabled");
            Arc::new(OpenAiAdvisor::new(settings, key))
        }
        None if settings.enabled => {
            warn!("LLM advisory requested but OPENAI_API_KEY is not set; continuing without it");
            Arc::new(NoopAdvisor)
        }
        _ => Arc::new(NoopAdvisor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_needs_flag_and_key() {
        let mut settings = LlmSettings::default();
        assert!(!select_advisor(&settings, Some("sk-test")).is_live());

        settings.enabled = true;
        assert!(!select_advisor(&settings, None).is_live());
        assert!(!select_advisor(&settings, Some("  ")).is_live());

        let live = select_advisor(&settings, Some(" sk-test "));
        assert!(live.is_live());
        assert_eq!(live.name(), "openai");
    }
}
