//! Rule-based detectors
//!
//! Each detector reads the same immutable [`ReviewDocument`] and returns the
//! issues it found in detection order. The engine runs them in a fixed order
//! (sections, ambiguity, contradictions) so output is stable.

pub mod ambiguity;
pub mod contradictions;
pub mod sections;

pub use ambiguity::AmbiguityRule;
pub use contradictions::ContradictionRule;
pub use sections::SectionRule;

use crate::document::ReviewDocument;
use shared_types::Issue;

/// Context radius (bytes) for snippets attached to issue locations
pub(crate) const SNIPPET_RADIUS: usize = 40;

/// A single rule-based check
pub trait ReviewRule: Send + Sync {
    /// Human-readable name of the rule
    fn name(&self) -> &str;

    /// Run the check against a document
    fn check(&self, document: &ReviewDocument) -> Vec<Issue>;
}
