//! DOCX paragraph text, read straight from `word/document.xml`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::resume::extract::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns every paragraph's text in document order, joined with `\n`.
///
/// Only `w:t` run text is collected, so deleted-revision text (`w:delText`) and
/// field instructions are skipped. Inside a run, `w:tab` becomes a tab and
/// `w:br`/`w:cr` a newline; tab-stop definitions in `w:pPr` contribute nothing.
/// Paragraphs nested in text boxes are emitted before the paragraph that
/// anchors them.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Parse(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs = collect_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn collect_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    // Open paragraphs, innermost last.
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"r" => run_depth += 1,
                b"t" => in_text_run = run_depth > 0,
                name => push_run_break(&mut open, run_depth, name),
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                name => push_run_break(&mut open, run_depth, name),
            },
            Event::Text(ref e) if in_text_run => {
                let text = e.unescape()?;
                if let Some(p) = open.last_mut() {
                    p.push_str(&text);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"p" => {
                    if let Some(p) = open.pop() {
                        paragraphs.push(p);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Tabs and line breaks count only inside a run.
fn push_run_break(open: &mut [String], run_depth: usize, name: &[u8]) {
    if run_depth == 0 {
        return;
    }
    let c = match name {
        b"tab" => '\t',
        b"br" | b"cr" => '\n',
        _ => return,
    };
    if let Some(p) = open.last_mut() {
        p.push(c);
    }
}
