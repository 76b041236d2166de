//! Section outline: which heading governs each part of the cleaned text.

use crate::error::{EngineError, Result};
use crate::patterns::{leading_phrase_regex, phrase_regex, HEADING_NUMBERING};
use crate::template::ReferenceTemplate;
use crate::vocabulary::SectionVocabulary;
use regex::Regex;
use serde::Serialize;
use shared_types::{section_key, TextSpan};

/// Longest line (in words) accepted as a bare heading without a `:` separator
const MAX_HEADING_WORDS: usize = 6;

/// One section of the catalog with its compiled synonym patterns
#[derive(Debug, Clone)]
pub struct SectionEntry {
    /// Display name: the template's spelling when the section is required
    pub name: String,
    pub key: String,
    pub required: bool,
    leading: Vec<Regex>,
    anywhere: Vec<Regex>,
}

impl SectionEntry {
    fn compile(name: String, required: bool, synonyms: Vec<String>) -> Result<Self> {
        let compile_all = |f: fn(&str) -> std::result::Result<Regex, regex::Error>| {
            synonyms
                .iter()
                .map(|s| {
                    f(s).map_err(|e| {
                        EngineError::config(format!("Invalid section synonym '{}': {}", s, e))
                    })
                })
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            key: section_key(&name),
            leading: compile_all(leading_phrase_regex)?,
            anywhere: compile_all(phrase_regex)?,
            name,
            required,
        })
    }

    /// Length of the longest synonym opening `line` when the line reads as a heading
    pub fn heading_match(&self, line: &str) -> Option<usize> {
        self.leading
            .iter()
            .filter_map(|re| re.find(line))
            .filter(|m| reads_as_heading(line, m.end()))
            .map(|m| m.end())
            .max()
    }

    /// First occurrence of any synonym anywhere in the text
    pub fn find_anywhere(&self, text: &str) -> Option<TextSpan> {
        self.anywhere
            .iter()
            .filter_map(|re| re.find(text))
            .map(|m| TextSpan::new(m.start(), m.end()))
            .min()
    }
}

/// A heading matched a synonym: the line is short, or the synonym is followed by `:` or a dash
fn reads_as_heading(line: &str, synonym_end: usize) -> bool {
    let rest = line[synonym_end..].trim_start();
    if rest.is_empty() || rest.starts_with([':', '-', '–', '—']) {
        return true;
    }
    line.split_whitespace().count() <= MAX_HEADING_WORDS && !line.ends_with('.')
}

/// Every section the detectors know about: required sections first in
/// template order, then vocabulary-only sections used for outlining.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    entries: Vec<SectionEntry>,
}

impl SectionCatalog {
    pub fn compile(template: &ReferenceTemplate, vocabulary: &SectionVocabulary) -> Result<Self> {
        let mut entries = Vec::new();
        for name in template.required_sections() {
            let synonyms = vocabulary.patterns_for(name);
            entries.push(SectionEntry::compile(name.trim().to_string(), true, synonyms)?);
        }
        for (key, synonyms) in &vocabulary.synonyms {
            let key = section_key(key);
            if synonyms.is_empty() || entries.iter().any(|e| e.key == key) {
                continue;
            }
            entries.push(SectionEntry::compile(title_case(&key), false, synonyms.clone())?);
        }
        Ok(Self { entries })
    }

    pub fn required(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.iter().filter(|e| e.required)
    }

    /// Classify a heading line by its longest matching synonym. Ties go to the earlier entry.
    pub fn classify(&self, line: &str) -> Option<&SectionEntry> {
        let mut best: Option<(&SectionEntry, usize)> = None;
        for entry in &self.entries {
            if let Some(len) = entry.heading_match(line) {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((entry, len));
                }
            }
        }
        best.map(|(entry, _)| entry)
    }
}

fn title_case(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A non-blank line with heading decorations and numbering removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingCandidate<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// Lines of `text` stripped of bullets and numbering ("1.", "2.3", "Section 4:")
pub fn heading_candidates(text: &str) -> Vec<HeadingCandidate<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        let trimmed = line.trim_start_matches(['#', '*', '•', ' ']);
        let stripped = match HEADING_NUMBERING.find(trimmed) {
            Some(m) => &trimmed[m.end()..],
            None => trimmed,
        };
        let stripped = stripped.trim();
        if stripped.is_empty() {
            continue;
        }
        out.push(HeadingCandidate {
            offset: line_start + (stripped.as_ptr() as usize - line.as_ptr() as usize),
            text: stripped,
        });
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Catalog name of the section this heading opens
    pub section: String,
    /// Heading as written, without numbering
    pub title: String,
    pub span: TextSpan,
}

/// Headings in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    headings: Vec<Heading>,
}

impl Outline {
    pub fn extract(text: &str, catalog: &SectionCatalog) -> Self {
        let headings = heading_candidates(text)
            .into_iter()
            .filter_map(|candidate| {
                catalog.classify(candidate.text).map(|entry| Heading {
                    section: entry.name.clone(),
                    title: heading_title(candidate.text),
                    span: TextSpan::new(candidate.offset, candidate.offset + candidate.text.len()),
                })
            })
            .collect();
        Self { headings }
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Section governing a byte offset: the closest heading at or before it
    pub fn section_at(&self, offset: usize) -> Option<&str> {
        self.headings
            .iter()
            .take_while(|h| h.span.start <= offset)
            .last()
            .map(|h| h.section.as_str())
    }

    /// Distinct section names in the order their first heading appears
    pub fn section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for heading in &self.headings {
            if !names.contains(&heading.section) {
                names.push(heading.section.clone());
            }
        }
        names
    }
}

/// Heading text up to an inline `:` body
fn heading_title(line: &str) -> String {
    line.split(':').next().unwrap_or(line).trim().to_string()
}
