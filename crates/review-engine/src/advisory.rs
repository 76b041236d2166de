//! Language-model advisory capability.
//!
//! The pipeline never checks whether an API key is configured: it holds an
//! [`Advisor`] chosen at startup, either [`NoopAdvisor`] or a live client.

use async_trait::async_trait;
use shared_types::ExternalIssue;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("Advisory request failed: {0}")]
    Transport(String),

    #[error("Advisory service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Advisory quota exceeded")]
    QuotaExceeded,

    #[error("Advisory response could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("Advisory call timed out after {0:?}")]
    Timeout(Duration),
}

impl AdvisoryError {
    /// Whether a second attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AdvisoryError::Transport(_) | AdvisoryError::Timeout(_) => true,
            AdvisoryError::Status { status, .. } => *status >= 500,
            AdvisoryError::QuotaExceeded | AdvisoryError::MalformedResponse(_) => false,
        }
    }
}

/// Source of supplementary issue suggestions
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// False for the no-op variant, whose silence is not a failure
    fn is_live(&self) -> bool {
        true
    }

    /// Review cleaned document text and return candidate issue records
    async fn advise(&self, text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError>;
}

/// Advisor used when no language model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdvisor;

#[async_trait]
impl Advisor for NoopAdvisor {
    fn name(&self) -> &str {
        "noop"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn advise(&self, _text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
        Ok(Vec::new())
    }
}
