//! Document Text Extractor: flattens an uploaded PDF or DOCX into plain text.
//!
//! Output carries no structure: no fonts, positions, or section boundaries survive.

use thiserror::Error;
use tracing::debug;

use crate::models::document::{MediaType, UploadedDocument};
use crate::resume::{docx_text, pdf_text};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("could not parse document: {0}")]
    Parse(String),

    #[error("could not open DOCX container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("could not read DOCX body: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Extracts newline-joined text from an uploaded document.
///
/// Pure function of the input bytes; CPU-bound, so handlers call it inside
/// `tokio::task::spawn_blocking`.
pub fn extract_text(doc: &UploadedDocument) -> Result<String, ExtractError> {
    let text = match doc.media_type {
        MediaType::Pdf => pdf_text::extract_pdf_text(&doc.bytes)?,
        MediaType::Docx => docx_text::extract_docx_text(&doc.bytes)?,
        MediaType::PlainText => {
            return Err(ExtractError::UnsupportedFormat(
                doc.media_type.mime().to_string(),
            ))
        }
    };

    debug!(
        "Extracted {} chars from {:?} ({} bytes)",
        text.len(),
        doc.media_type,
        doc.bytes.len()
    );
    Ok(text)
}
