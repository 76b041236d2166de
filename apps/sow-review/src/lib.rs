//! Scope-of-Work reviewer CLI
//!
//! Extracts text from a PDF or text file, runs the rule-based review with an
//! optional language-model advisory, and writes a JSON, Markdown, text or
//! PDF report chosen by the output file's extension.

pub mod args;
pub mod report;
pub mod runner;

pub use args::Args;
pub use report::{summary_line, ReportFormat};
pub use runner::{run, settings_from_args, RunOutcome};
