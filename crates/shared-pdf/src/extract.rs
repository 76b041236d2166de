//! PDF text extraction
//!
//! Text is pulled page by page with `lopdf` and the pages are joined with
//! form feeds, so the normalizer can see page boundaries. When `lopdf`
//! yields next to nothing (unusual font encodings, Type3 glyphs) the whole
//! document is retried through `pdf-extract`.
//!
//! ```no_run
//! use shared_pdf::{ExtractError, PdfExtractor};
//!
//! fn page_count(pdf_bytes: &[u8]) -> Result<usize, ExtractError> {
//!     let document = PdfExtractor::extract_text(pdf_bytes)?;
//!     Ok(document.metadata.page_count)
//! }
//! ```

use crate::error::ExtractError;
use lopdf::{Document, Object};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Page separator in extracted text
pub const PAGE_BREAK: char = '\x0C';

/// Below this many trimmed characters the PDF is treated as scanned
const MIN_TEXT_CHARS: usize = 50;
/// Below this many non-whitespace characters the PDF is treated as scanned
const MIN_VISIBLE_CHARS: usize = 20;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from PDF bytes, keeping page boundaries.
    ///
    /// # Errors
    /// - `ExtractError::InvalidPdf` - the bytes are not a readable PDF
    /// - `ExtractError::PasswordProtected` - the PDF is encrypted
    /// - `ExtractError::ScannedPdfNeedsOcr` - too little text to review
    /// - `ExtractError::ExtractionError` - any other extraction failure
    pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
        let document = Document::load_mem(pdf_bytes).map_err(|e| classify(&e.to_string()))?;
        if document.is_encrypted() {
            return Err(ExtractError::PasswordProtected);
        }

        let title = document_title(&document);
        let mut raw_text = Self::text_by_page(&document);
        if visible_chars(&raw_text) < MIN_VISIBLE_CHARS {
            debug!("lopdf returned little text, retrying with pdf-extract");
            raw_text = pdf_extract::extract_text_from_mem(pdf_bytes)
                .map_err(|e| classify(&e.to_string()))?;
        }

        let trimmed = raw_text.trim();
        if trimmed.len() < MIN_TEXT_CHARS || visible_chars(trimmed) < MIN_VISIBLE_CHARS {
            return Err(ExtractError::ScannedPdfNeedsOcr);
        }

        let mut extracted = ExtractedDocument::from_text(raw_text);
        if extracted.pages.is_empty() {
            return Err(ExtractError::ExtractionError(
                "No pages could be extracted from PDF".to_string(),
            ));
        }
        extracted.metadata.title = title;
        Ok(extracted)
    }

    /// Per-page text joined with form feeds. Pages that fail to decode are left empty.
    fn text_by_page(document: &Document) -> String {
        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        let mut texts = Vec::with_capacity(pages.len());
        for number in pages {
            match document.extract_text(&[number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!(page = number, error = %e, "Failed to extract page text");
                    texts.push(String::new());
                }
            }
        }
        texts.join(&PAGE_BREAK.to_string())
    }

    /// Split text on form feeds into numbered pages; blank pages are dropped
    fn split_pages(text: &str) -> Vec<PageContent> {
        text.split(PAGE_BREAK)
            .enumerate()
            .filter(|(_, page)| !page.trim().is_empty())
            .map(|(idx, page)| PageContent {
                page_number: idx + 1,
                text: page.to_string(),
            })
            .collect()
    }
}

fn visible_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn classify(message: &str) -> ExtractError {
    let lower = message.to_lowercase();
    if lower.contains("encrypted") || lower.contains("password") || lower.contains("decrypt") {
        ExtractError::PasswordProtected
    } else if lower.contains("invalid")
        || lower.contains("malformed")
        || lower.contains("corrupt")
        || lower.contains("header")
        || lower.contains("xref")
        || lower.contains("parse")
    {
        ExtractError::InvalidPdf(message.to_string())
    } else {
        ExtractError::ExtractionError(message.to_string())
    }
}

/// `/Title` from the trailer's Info dictionary, if present and non-blank
fn document_title(document: &Document) -> Option<String> {
    let info = match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    let raw = info.get(b"Title").ok()?.as_str().ok()?;
    let title = String::from_utf8_lossy(raw).trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Text of a whole document with its page breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Full text, pages separated by form feeds
    pub raw_text: String,
    pub pages: Vec<PageContent>,
    pub metadata: PdfMetadata,
}

impl ExtractedDocument {
    /// Wrap already-extracted text (form feeds mark page breaks)
    pub fn from_text(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let pages = PdfExtractor::split_pages(&raw_text);
        let metadata = PdfMetadata {
            page_count: pages.len(),
            title: None,
        };
        Self {
            raw_text,
            pages,
            metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-indexed
    pub page_number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub page_count: usize,
    pub title: Option<String>,
}
