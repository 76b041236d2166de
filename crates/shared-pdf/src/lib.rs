//! Text extraction for documents under review
//!
//! PDFs are read page by page so page boundaries survive as form feeds,
//! which the normalizer relies on to spot running headers and footers.
//! Plain-text inputs pass through unchanged.

pub mod error;
pub mod extract;
pub mod source;

pub use error::ExtractError;
pub use extract::{ExtractedDocument, PageContent, PdfExtractor, PdfMetadata};
pub use source::load_document;
