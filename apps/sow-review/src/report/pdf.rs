//! Single-font PDF report: title block, severity summary, issue table

use super::ReportHeader;
use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use shared_types::{AnalysisResult, Issue, Severity};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: f32 = 50.0;
const BODY_SIZE: i64 = 9;
const LEADING: f32 = 12.0;
const CELL_PAD: f32 = 4.0;

/// Left edge and width of each table column
const COLUMNS: [(f32, f32); 4] = [(50.0, 25.0), (75.0, 60.0), (135.0, 255.0), (390.0, 172.0)];
const COLUMN_TITLES: [&str; 4] = ["#", "Severity", "Issue", "Suggestion"];

pub(super) fn render(result: &AnalysisResult, header: &ReportHeader) -> Result<Vec<u8>> {
    let mut layout = Layout::new();

    layout.line("F2", 16, &header.title);
    layout.gap(4.0);
    layout.line("F1", 10, &format!("Document: {}", header.document));
    let counts: Vec<String> = Severity::ALL
        .iter()
        .map(|s| format!("{}: {}", s, result.count(*s)))
        .collect();
    layout.line(
        "F1",
        10,
        &format!("Risk score: {}    {}", result.risk_score, counts.join("   ")),
    );
    if result.llm_unavailable {
        layout.line("F1", 10, "LLM review unavailable; rule-based issues only.");
    }
    layout.gap(10.0);

    if result.issues.is_empty() {
        layout.line("F1", 10, "No issues found.");
    } else {
        layout.header_row();
        for (idx, issue) in result.issues.iter().enumerate() {
            layout.issue_row(idx + 1, issue);
        }
    }

    if !result.warnings.is_empty() {
        layout.gap(10.0);
        layout.line("F2", 10, "Warnings");
        for warning in &result.warnings {
            for line in wrap(warning, chars_for(PAGE_WIDTH as f32 - 2.0 * MARGIN)) {
                layout.line("F1", BODY_SIZE, &line);
            }
        }
    }

    assemble(layout.finish())
}

/// Top-down page layout; starts a new page when the next block does not fit
struct Layout {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT as f32 - MARGIN,
        }
    }

    fn ensure(&mut self, height: f32) -> bool {
        if self.y - height < MARGIN {
            self.pages.push(std::mem::take(&mut self.ops));
            self.y = PAGE_HEIGHT as f32 - MARGIN;
            return true;
        }
        false
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn line(&mut self, font: &str, size: i64, text: &str) {
        let height = size as f32 + 4.0;
        self.ensure(height);
        self.y -= height;
        text_at(&mut self.ops, font, size, MARGIN, self.y, text);
    }

    fn header_row(&mut self) {
        let height = LEADING + 2.0 * CELL_PAD;
        self.ensure(height);
        let top = self.y;
        fill_rect(&mut self.ops, MARGIN, top - height, table_width(), height, 0.8);
        for ((x, _), title) in COLUMNS.iter().zip(COLUMN_TITLES) {
            text_at(
                &mut self.ops,
                "F2",
                BODY_SIZE,
                x + CELL_PAD,
                top - CELL_PAD - LEADING + 3.0,
                title,
            );
        }
        self.y = top - height;
        rule(&mut self.ops, MARGIN, self.y, MARGIN + table_width());
    }

    fn issue_row(&mut self, number: usize, issue: &Issue) {
        let mut issue_text = issue.message.clone();
        if let Some(section) = issue.location.as_ref().and_then(|l| l.section.as_deref()) {
            issue_text.push_str(&format!(" [{}]", section));
        }
        let cells = [
            number.to_string(),
            issue.severity.to_string(),
            issue_text,
            issue.suggestion.clone().unwrap_or_default(),
        ];
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(COLUMNS)
            .map(|(cell, (_, width))| wrap(cell, chars_for(width - 2.0 * CELL_PAD)))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = lines as f32 * LEADING + 2.0 * CELL_PAD;

        if self.ensure(height) {
            self.header_row();
        }
        let top = self.y;
        for (cell, (x, _)) in wrapped.iter().zip(COLUMNS) {
            for (n, line) in cell.iter().enumerate() {
                let baseline = top - CELL_PAD - LEADING * (n as f32 + 1.0) + 3.0;
                text_at(&mut self.ops, "F1", BODY_SIZE, x + CELL_PAD, baseline, line);
            }
        }
        self.y = top - height;
        rule(&mut self.ops, MARGIN, self.y, MARGIN + table_width());
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.ops);
        }
        self.pages
    }
}

fn table_width() -> f32 {
    let (x, w) = COLUMNS[COLUMNS.len() - 1];
    x + w - MARGIN
}

/// Rough Helvetica capacity of a column at body size
fn chars_for(width: f32) -> usize {
    ((width / (BODY_SIZE as f32 * 0.5)) as usize).max(1)
}

fn text_at(ops: &mut Vec<Operation>, font: &str, size: i64, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn rule(ops: &mut Vec<Operation>, x1: f32, y: f32, x2: f32) {
    ops.push(Operation::new("w", vec![Object::Real(0.5)]));
    ops.push(Operation::new("m", vec![Object::Real(x1), Object::Real(y)]));
    ops.push(Operation::new("l", vec![Object::Real(x2), Object::Real(y)]));
    ops.push(Operation::new("S", vec![]));
}

fn fill_rect(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32, gray: f32) {
    ops.push(Operation::new("g", vec![Object::Real(gray)]));
    ops.push(Operation::new(
        "re",
        vec![Object::Real(x), Object::Real(y), Object::Real(w), Object::Real(h)],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("g", vec![Object::Integer(0)]));
}

/// Greedy word wrap; words longer than a line are split
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Bytes for a WinAnsi-encoded standard font; unmapped characters become '?'
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() && !c.is_ascii_control() => c as u8,
            '\u{2018}' | '\u{2019}' => b'\'',
            '\u{201C}' | '\u{201D}' => b'"',
            '\u{2013}' | '\u{2014}' => b'-',
            '\u{00A9}' => 0xA9,
            _ => b'?',
        })
        .collect()
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            ("F1", Object::Reference(regular)),
            ("F2", Object::Reference(bold)),
        ])),
    )]));

    let mut page_ids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content.encode().context("Failed to encode report page")?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let kids = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(kids));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).context("Failed to write PDF report")?;
    Ok(buf)
}

fn font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]))
}
