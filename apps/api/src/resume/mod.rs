// Resume intake: text extraction from uploaded documents and the advisory
// completeness report shown next to the extracted text.

pub mod completeness;
pub mod docx_text;
pub mod extract;
pub mod handlers;
pub mod pdf_text;
