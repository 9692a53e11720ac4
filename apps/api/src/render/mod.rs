//! Resume Renderer: turns rewritten text into a downloadable document.
//!
//! Two independent strategies:
//! - `overlay`: write into a stripped copy of the original PDF (fixed box, clipped).
//! - `rebuilt`: classify lines and flow them through a fresh paginated PDF or DOCX.
//!
//! Neither ties the output layout back to the original document's layout.

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod overlay;
pub mod pdf_ops;
pub mod rebuilt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::document::{MediaType, RenderedDocument, UploadedDocument};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("could not write document: {0}")]
    Write(String),

    #[error("DOCX packaging error: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("original PDF has no pages")]
    NoPages,

    #[error("overlay mode needs the original resume to be a PDF")]
    OverlayNeedsPdf,

    #[error("overlay mode only produces PDF output")]
    OverlayOutputMustBePdf,
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Write(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Overlay,
    #[default]
    Rebuilt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Docx,
    Txt,
}

impl OutputFormat {
    pub fn media_type(&self) -> MediaType {
        match self {
            OutputFormat::Pdf => MediaType::Pdf,
            OutputFormat::Docx => MediaType::Docx,
            OutputFormat::Txt => MediaType::PlainText,
        }
    }
}

/// Renders `text` with the selected strategy.
///
/// Plain-text output ignores the mode. Overlay needs the original upload and
/// that upload must be a PDF.
pub fn render(
    text: &str,
    mode: RenderMode,
    format: OutputFormat,
    original: Option<&UploadedDocument>,
) -> Result<RenderedDocument, RenderError> {
    let bytes = match (format, mode) {
        (OutputFormat::Txt, _) => text.as_bytes().to_vec(),
        (OutputFormat::Docx, RenderMode::Overlay) => {
            return Err(RenderError::OverlayOutputMustBePdf)
        }
        (OutputFormat::Pdf, RenderMode::Overlay) => {
            let original = original
                .filter(|doc| doc.media_type == MediaType::Pdf)
                .ok_or(RenderError::OverlayNeedsPdf)?;
            overlay::render_overlay(&original.bytes, text)?
        }
        (OutputFormat::Pdf, RenderMode::Rebuilt) => rebuilt::render_rebuilt_pdf(text)?,
        (OutputFormat::Docx, RenderMode::Rebuilt) => rebuilt::render_rebuilt_docx(text)?,
    };

    Ok(RenderedDocument {
        bytes,
        media_type: format.media_type(),
    })
}
