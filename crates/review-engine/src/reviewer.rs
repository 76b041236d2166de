//! Full review pipeline: rules, optional advisory, scoring

use crate::advisory::{Advisor, AdvisoryError};
use crate::config::LlmSettings;
use crate::engine::ReviewEngine;
use crate::merge::merge_external_issues;
use shared_types::{AnalysisResult, ExternalIssue};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How the advisory call is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryPolicy {
    pub timeout: Duration,
    pub retry_once: bool,
    pub excerpt_chars: usize,
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self::from(&LlmSettings::default())
    }
}

impl From<&LlmSettings> for AdvisoryPolicy {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            retry_once: settings.retry_once,
            excerpt_chars: settings.excerpt_chars,
        }
    }
}

/// Runs the rule engine and, when the advisor is live, folds in its findings.
///
/// Advisory failure is never fatal: the result then carries the rule issues
/// alone with `llm_unavailable` set.
#[derive(Clone)]
pub struct Reviewer {
    engine: Arc<ReviewEngine>,
    advisor: Arc<dyn Advisor>,
    policy: AdvisoryPolicy,
}

impl Reviewer {
    pub fn new(engine: Arc<ReviewEngine>, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            engine,
            advisor,
            policy: AdvisoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AdvisoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn engine(&self) -> &ReviewEngine {
        &self.engine
    }

    pub fn advisor_name(&self) -> &str {
        self.advisor.name()
    }

    pub fn advisor_is_live(&self) -> bool {
        self.advisor.is_live()
    }

    /// Review raw document text, consulting the advisor if it is live
    pub async fn review(&self, raw: &str) -> AnalysisResult {
        self.review_with(raw, true).await
    }

    /// Review raw document text; `consult` switches the advisory off for this call
    pub async fn review_with(&self, raw: &str, consult: bool) -> AnalysisResult {
        let document = self.engine.prepare(raw);
        let mut draft = self.engine.detect(&document);

        if consult && self.advisor.is_live() && !document.is_empty() {
            let sample = excerpt(document.text(), self.policy.excerpt_chars);
            match self.consult(sample).await {
                Ok(records) => {
                    info!(
                        advisor = self.advisor.name(),
                        records = records.len(),
                        "Advisory received"
                    );
                    draft = merge_external_issues(draft, records);
                }
                Err(e) => {
                    warn!(
                        advisor = self.advisor.name(),
                        error = %e,
                        "Advisory unavailable, using rule-based issues only"
                    );
                    draft.llm_unavailable = true;
                    draft.warn(format!("LLM advisory unavailable: {}", e));
                }
            }
        }

        self.engine.scorer().finalize(draft)
    }

    /// Call the advisor under the timeout, retrying once if allowed
    async fn consult(&self, text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
        let attempts = if self.policy.retry_once { 2 } else { 1 };
        let mut attempt = 1;
        loop {
            let outcome = match tokio::time::timeout(self.policy.timeout, self.advisor.advise(text))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(AdvisoryError::Timeout(self.policy.timeout)),
            };
            match outcome {
                Ok(records) => return Ok(records),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    warn!(attempt, error = %e, "Advisory attempt failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Leading `max_chars` characters of the text, cut on a char boundary
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::NoopAdvisor;
    use async_trait::async_trait;
    use shared_types::{IssueSource, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails a fixed number of times, then answers
    struct FlakyAdvisor {
        failures: usize,
        calls: AtomicUsize,
        error: AdvisoryError,
    }

    impl FlakyAdvisor {
        fn new(failures: usize, error: AdvisoryError) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
                error,
            }
        }
    }

    #[async_trait]
    impl Advisor for FlakyAdvisor {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn advise(&self, _text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(self.error.clone());
            }
            Ok(vec![ExternalIssue::new(
                "Warranty period is not stated",
                "Warning",
            )])
        }
    }

    struct SlowAdvisor;

    #[async_trait]
    impl Advisor for SlowAdvisor {
        fn name(&self) -> &str {
            "slow"
        }

        async fn advise(&self, _text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    fn reviewer(advisor: Arc<dyn Advisor>) -> Reviewer {
        let engine = Arc::new(ReviewEngine::construction_default().unwrap());
        Reviewer::new(engine, advisor).with_policy(AdvisoryPolicy {
            timeout: Duration::from_millis(50),
            retry_once: true,
            excerpt_chars: 1_000,
        })
    }

    const TEXT: &str = "SCOPE OF WORK\nAll civil works, TBD.";

    #[tokio::test]
    async fn test_noop_advisor_does_not_flag_unavailable() {
        let result = reviewer(Arc::new(NoopAdvisor)).review(TEXT).await;
        assert!(!result.llm_unavailable);
        assert!(result.issues.iter().all(|i| i.is_rule_based()));
    }

    #[tokio::test]
    async fn test_live_advisor_issues_appended_last() {
        let result = reviewer(Arc::new(FlakyAdvisor::new(0, AdvisoryError::QuotaExceeded)))
            .review(TEXT)
            .await;
        let last = result.issues.last().unwrap();
        assert_eq!(last.source, IssueSource::Llm);
        assert_eq!(result.risk_score, result.recomputed_score());
    }

    #[tokio::test]
    async fn test_transient_failure_retried_once() {
        let advisor = Arc::new(FlakyAdvisor::new(
            1,
            AdvisoryError::Transport("connection reset".into()),
        ));
        let result = reviewer(advisor.clone()).review(TEXT).await;
        assert!(!result.llm_unavailable);
        assert_eq!(advisor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_quota_exceeded_falls_back_to_rules() {
        let advisor = Arc::new(FlakyAdvisor::new(5, AdvisoryError::QuotaExceeded));
        let rules_only = reviewer(Arc::new(NoopAdvisor)).review(TEXT).await;
        let result = reviewer(advisor.clone()).review(TEXT).await;

        assert!(result.llm_unavailable);
        assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.issues, rules_only.issues);
        assert_eq!(result.risk_score, rules_only.risk_score);
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_marks_unavailable() {
        let result = reviewer(Arc::new(SlowAdvisor)).review(TEXT).await;
        assert!(result.llm_unavailable);
        assert!(result.warnings[0].contains("timed out"));
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[tokio::test]
    async fn test_consult_switch_skips_advisor() {
        let advisor = Arc::new(FlakyAdvisor::new(0, AdvisoryError::QuotaExceeded));
        let result = reviewer(advisor.clone()).review_with(TEXT, false).await;
        assert!(!result.llm_unavailable);
        assert_eq!(advisor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_excerpt_respects_char_count() {
        assert_eq!(excerpt("ééé", 2), "éé");
        assert_eq!(excerpt("abc", 10), "abc");
    }
}
