//! Rebuilt-document mode: discards the original and lays the rewritten text out fresh.
//!
//! Each line is classified as title, heading, body, or spacer, then flowed down
//! US Letter pages. Unlike overlay mode, overflow continues on a new page.

use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::docx::{build_docx, DocxParagraph};
use crate::render::font_metrics::{get_metrics, StandardFont};
use crate::render::pdf_ops::{font_dictionary, text_operations, PlacedLine};
use crate::render::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive substrings that mark a line as a section heading.
pub const SECTION_KEYWORDS: &[&str] = &[
    "summary",
    "objective",
    "experience",
    "employment",
    "education",
    "skills",
    "competencies",
    "projects",
    "certifications",
    "awards",
    "achievements",
    "publications",
    "languages",
    "volunteer",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Title,
    Heading,
    Body,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Trimmed line text; empty for spacers.
    pub text: String,
}

pub fn contains_section_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// True when the line has at least one cased character and none is lowercase.
pub fn is_all_uppercase(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

pub fn is_heading(line: &str) -> bool {
    contains_section_keyword(line) || is_all_uppercase(line)
}

/// Classifies every line of the rewritten resume.
///
/// Blank lines before the first text line are dropped so the first non-blank
/// line is always the title, whatever it says.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine> {
    let mut out: Vec<ClassifiedLine> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            if !out.is_empty() {
                out.push(ClassifiedLine {
                    kind: LineKind::Spacer,
                    text: String::new(),
                });
            }
            continue;
        }

        let kind = if out.is_empty() {
            LineKind::Title
        } else if is_heading(line) {
            LineKind::Heading
        } else {
            LineKind::Body
        };
        out.push(ClassifiedLine {
            kind,
            text: line.to_string(),
        });
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Styles and page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ParagraphStyle {
    pub font: StandardFont,
    pub size_pt: f32,
    pub leading_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    pub centered: bool,
}

pub const TITLE_STYLE: ParagraphStyle = ParagraphStyle {
    font: StandardFont::HelveticaBold,
    size_pt: 18.0,
    leading_pt: 22.0,
    space_before_pt: 0.0,
    space_after_pt: 12.0,
    centered: true,
};

pub const HEADING_STYLE: ParagraphStyle = ParagraphStyle {
    font: StandardFont::HelveticaBold,
    size_pt: 14.0,
    leading_pt: 18.0,
    space_before_pt: 12.0,
    space_after_pt: 6.0,
    centered: false,
};

pub const BODY_STYLE: ParagraphStyle = ParagraphStyle {
    font: StandardFont::Helvetica,
    size_pt: 10.0,
    leading_pt: 12.0,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
    centered: false,
};

pub const SPACER_HEIGHT_PT: f32 = 12.0;

pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;
pub const MARGIN_PT: f32 = 72.0;

fn style_for(kind: LineKind) -> ParagraphStyle {
    match kind {
        LineKind::Title => TITLE_STYLE,
        LineKind::Heading => HEADING_STYLE,
        LineKind::Body | LineKind::Spacer => BODY_STYLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

/// Flows classified lines down pages. `cursor` is the top of the next line box.
struct PageFlow {
    pages: Vec<Vec<PlacedLine>>,
    cursor: f32,
}

impl PageFlow {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT_PT - MARGIN_PT,
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= PAGE_HEIGHT_PT - MARGIN_PT
    }

    fn remaining(&self) -> f32 {
        self.cursor - MARGIN_PT
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = PAGE_HEIGHT_PT - MARGIN_PT;
    }

    /// Vertical space that is discarded at a page break rather than carried over.
    fn skip(&mut self, height: f32) {
        if self.at_page_top() {
            return;
        }
        if height > self.remaining() {
            self.break_page();
        } else {
            self.cursor -= height;
        }
    }

    fn place_paragraph(&mut self, text: &str, style: ParagraphStyle) {
        let metrics = get_metrics(style.font);
        let frame_width = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;

        self.skip(style.space_before_pt);
        for line in metrics.wrap_line(text, style.size_pt, frame_width) {
            if style.leading_pt > self.remaining() && !self.at_page_top() {
                self.break_page();
            }
            let x = if style.centered {
                MARGIN_PT + (frame_width - metrics.measure_str(&line, style.size_pt)) / 2.0
            } else {
                MARGIN_PT
            };
            let placed = PlacedLine {
                text: line,
                font: style.font,
                size_pt: style.size_pt,
                x,
                y: self.cursor - style.size_pt,
            };
            if let Some(page) = self.pages.last_mut() {
                page.push(placed);
            }
            self.cursor -= style.leading_pt;
        }
        self.skip(style.space_after_pt);
    }
}

/// Lays classified lines out onto pages. Always returns at least one page.
pub fn paginate(lines: &[ClassifiedLine]) -> Vec<Vec<PlacedLine>> {
    let mut flow = PageFlow::new();
    for line in lines {
        match line.kind {
            LineKind::Spacer => flow.skip(SPACER_HEIGHT_PT),
            kind => flow.place_paragraph(&line.text, style_for(kind)),
        }
    }
    flow.pages
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// Builds a fresh, paginated PDF from the rewritten text.
pub fn render_rebuilt_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    let pages = paginate(&classify_lines(text));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary(StandardFont::Helvetica));
    let bold_id = doc.add_object(font_dictionary(StandardFont::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            StandardFont::Helvetica.resource_name() => regular_id,
            StandardFont::HelveticaBold.resource_name() => bold_id,
        },
    });

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        PAGE_WIDTH_PT.into(),
        PAGE_HEIGHT_PT.into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = Content {
            operations: text_operations(lines),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(kids.len() as i64),
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    debug!("Rebuilt PDF laid out on {} pages", pages.len());

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(output)
}

/// Builds a DOCX with one paragraph per classified line.
pub fn render_rebuilt_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let lines = classify_lines(text);
    let paragraphs: Vec<DocxParagraph<'_>> = lines
        .iter()
        .map(|line| match line.kind {
            LineKind::Spacer => DocxParagraph::empty(),
            kind => {
                let style = style_for(kind);
                DocxParagraph {
                    text: &line.text,
                    bold: style.font == StandardFont::HelveticaBold,
                    size_pt: style.size_pt,
                    centered: style.centered,
                }
            }
        })
        .collect();
    build_docx(&paragraphs)
}
