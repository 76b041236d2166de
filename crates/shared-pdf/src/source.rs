//! Loading review input from disk

use crate::error::ExtractError;
use crate::extract::{ExtractedDocument, PdfExtractor};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a document for review. `.pdf` files go through the PDF extractor,
/// anything else is read as UTF-8 text.
pub fn load_document(path: impl AsRef<Path>) -> Result<ExtractedDocument, ExtractError> {
    let path = path.as_ref();
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let document = if is_pdf {
        let bytes = fs::read(path).map_err(io_err)?;
        PdfExtractor::extract_text(&bytes)?
    } else {
        ExtractedDocument::from_text(fs::read_to_string(path).map_err(io_err)?)
    };

    info!(
        path = %path.display(),
        pages = document.metadata.page_count,
        chars = document.raw_text.len(),
        "Document loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::create_test_pdf;

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("shared-pdf-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_text_file_read_verbatim() {
        let path = scratch("sow.txt");
        fs::write(&path, "TIMELINE\nStart date: March 1, 2024\x0CLEGAL CLAUSES").unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.metadata.page_count, 2);
        assert!(document.raw_text.starts_with("TIMELINE"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        let path = scratch("SOW.PDF");
        let pdf = create_test_pdf(
            &[&["SCOPE OF WORK", "Demolition of the existing annex and site clearing."]],
            None,
        );
        fs::write(&path, pdf).unwrap();

        let document = load_document(&path).unwrap();
        assert!(document.raw_text.contains("SCOPE OF WORK"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_document("/nonexistent/sow.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sow.txt"));
    }
}
