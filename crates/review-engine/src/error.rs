use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Template, vocabulary or settings could not be loaded. Raised before any analysis runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An issue record carried a severity outside Critical/Warning/Info
    #[error("Invalid issue '{message}': unrecognized severity '{severity}'")]
    InvalidIssue { message: String, severity: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }
}
