//! Live advisor for the SOW reviewer.
//!
//! Sends the cleaned document to an OpenAI-compatible chat-completions
//! endpoint and reads back a JSON array of issue records. Timeouts and the
//! retry policy belong to the caller (`review_engine::Reviewer`).

mod client;
mod prompt;
mod select;

pub use client::OpenAiAdvisor;
pub use prompt::{parse_issue_list, user_prompt, SYSTEM_PROMPT};
pub use select::select_advisor;
