//! Minimal WordprocessingML writer.
//!
//! Produces the three parts Word needs to open a document:
//! `[Content_Types].xml`, `_rels/.rels` and `word/document.xml`.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::RenderError;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

// Letter, 1in margins (twentieths of a point).
const DOCUMENT_CLOSE: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#;

/// One output paragraph. An empty `text` yields an empty paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocxParagraph<'a> {
    pub text: &'a str,
    pub bold: bool,
    pub size_pt: f32,
    pub centered: bool,
}

impl DocxParagraph<'_> {
    pub fn empty() -> Self {
        DocxParagraph {
            text: "",
            bold: false,
            size_pt: 10.0,
            centered: false,
        }
    }
}

pub fn build_docx(paragraphs: &[DocxParagraph<'_>]) -> Result<Vec<u8>, RenderError> {
    let mut body = String::from(DOCUMENT_OPEN);
    for paragraph in paragraphs {
        write_paragraph(&mut body, paragraph);
    }
    body.push_str(DOCUMENT_CLOSE);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS_XML.as_bytes())?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(body.as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn write_paragraph(out: &mut String, paragraph: &DocxParagraph<'_>) {
    let text = xml_safe(paragraph.text);
    if text.is_empty() {
        out.push_str("<w:p/>");
        return;
    }

    out.push_str("<w:p>");
    if paragraph.centered {
        out.push_str(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#);
    }

    // w:sz is in half-points
    let half_points = (paragraph.size_pt * 2.0).round() as u32;
    let run_props = format!(
        r#"<w:rPr>{}<w:sz w:val="{half_points}"/></w:rPr>"#,
        if paragraph.bold { "<w:b/>" } else { "" }
    );

    out.push_str("<w:r>");
    out.push_str(&run_props);
    for (i, segment) in text.split('\t').enumerate() {
        if i > 0 {
            out.push_str("<w:tab/>");
        }
        if !segment.is_empty() {
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape(segment));
            out.push_str("</w:t>");
        }
    }
    out.push_str("</w:r></w:p>");
}

/// Drops control characters XML 1.0 cannot carry.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn document_xml(docx: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_package_has_required_parts() {
        let docx = build_docx(&[DocxParagraph::empty()]).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let docx = build_docx(&[DocxParagraph {
            text: "R&D <lead>",
            bold: false,
            size_pt: 10.0,
            centered: false,
        }])
        .unwrap();
        assert!(document_xml(&docx).contains("R&amp;D &lt;lead&gt;"));
    }

    #[test]
    fn test_title_style_is_bold_centered_18pt() {
        let docx = build_docx(&[DocxParagraph {
            text: "Jane Doe",
            bold: true,
            size_pt: 18.0,
            centered: true,
        }])
        .unwrap();
        let xml = document_xml(&docx);
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains(r#"<w:sz w:val="36"/>"#));
    }

    #[test]
    fn test_empty_paragraph_is_self_closing() {
        let docx = build_docx(&[DocxParagraph::empty()]).unwrap();
        assert!(document_xml(&docx).contains("<w:body><w:p/>"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let docx = build_docx(&[DocxParagraph {
            text: "Page\u{0C}Break",
            bold: false,
            size_pt: 10.0,
            centered: false,
        }])
        .unwrap();
        assert!(document_xml(&docx).contains(">PageBreak<"));
    }
}
