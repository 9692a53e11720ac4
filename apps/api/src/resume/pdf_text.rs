use std::panic;

use crate::resume::extract::ExtractError;

/// Extracts text page by page, in page order, with a trailing newline per page.
///
/// pdf-extract panics on some malformed inputs; those panics are contained and
/// reported like any other parse failure.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractError::Parse("PDF parser aborted on malformed input".to_string()))?
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}
