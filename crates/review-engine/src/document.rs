use crate::normalize::normalize;
use crate::outline::{heading_candidates, HeadingCandidate, Outline, SectionCatalog};

/// Cleaned document text with its section outline. Read-only input to every rule.
#[derive(Debug, Clone)]
pub struct ReviewDocument {
    text: String,
    outline: Outline,
}

impl ReviewDocument {
    /// Normalize raw extracted text and outline it
    pub fn from_raw(raw: &str, catalog: &SectionCatalog) -> Self {
        Self::from_clean(normalize(raw), catalog)
    }

    /// Wrap text that is already normalized
    pub fn from_clean(text: String, catalog: &SectionCatalog) -> Self {
        let outline = Outline::extract(&text, catalog);
        Self { text, outline }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn heading_candidates(&self) -> Vec<HeadingCandidate<'_>> {
        heading_candidates(&self.text)
    }

    /// Section name governing a byte offset, if any heading precedes it
    pub fn section_at(&self, offset: usize) -> Option<String> {
        self.outline.section_at(offset).map(str::to_string)
    }
}
