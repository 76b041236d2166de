//! Rule-based Scope-of-Work review.
//!
//! Raw text flows through the normalizer, then the section, ambiguity and
//! contradiction detectors in that order. Advisory findings from a language
//! model may be merged in before the risk scorer seals the result.

pub mod advisory;
pub mod config;
pub mod document;
pub mod draft;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod merge;
pub mod normalize;
pub mod outline;
pub mod patterns;
pub mod reviewer;
pub mod rules;
pub mod scoring;
pub mod template;
pub mod vocabulary;

pub use advisory::{Advisor, AdvisoryError, NoopAdvisor};
pub use config::{LlmSettings, ReviewConfig};
pub use document::ReviewDocument;
pub use draft::ReviewDraft;
pub use engine::ReviewEngine;
pub use error::{EngineError, Result};
pub use merge::{admit_external, merge_external_issues};
pub use normalize::normalize;
pub use outline::{Heading, Outline};
pub use reviewer::{AdvisoryPolicy, Reviewer};
pub use scoring::RiskScorer;
pub use template::ReferenceTemplate;
pub use vocabulary::{SectionScope, ValueKind, Vocabulary};
