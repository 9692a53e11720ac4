use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

/// Document formats the pipeline can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    Docx,
    PlainText,
}

impl MediaType {
    /// Resolves a declared MIME type, falling back to the file extension when the
    /// upload mechanism declared nothing useful.
    pub fn detect(declared: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let declared = declared
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty() && m != "application/octet-stream");

        match declared {
            Some(mime) => Self::from_mime(&mime),
            None => file_name.and_then(Self::from_file_name),
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(MediaType::Pdf),
            DOCX_MIME => Some(MediaType::Docx),
            TEXT_MIME => Some(MediaType::PlainText),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(MediaType::Pdf),
            "docx" => Some(MediaType::Docx),
            "txt" => Some(MediaType::PlainText),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => PDF_MIME,
            MediaType::Docx => DOCX_MIME,
            MediaType::PlainText => TEXT_MIME,
        }
    }

    /// Fixed download name for a rendered resume of this type.
    pub fn output_file_name(&self) -> &'static str {
        match self {
            MediaType::Pdf => "optimized_resume.pdf",
            MediaType::Docx => "optimized_resume.docx",
            MediaType::PlainText => "optimized_resume.txt",
        }
    }
}

/// A user upload. Consumed by the extractor; kept in the session only so overlay
/// rendering can reopen the original PDF.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
    pub file_name: Option<String>,
}

/// Output of a renderer, ready to be served as a download.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl RenderedDocument {
    pub fn file_name(&self) -> &'static str {
        self.media_type.output_file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_mime_wins_over_extension() {
        assert_eq!(
            MediaType::detect(Some("application/pdf"), Some("resume.docx")),
            Some(MediaType::Pdf)
        );
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        assert_eq!(
            MediaType::detect(Some("application/octet-stream"), Some("Resume.DOCX")),
            Some(MediaType::Docx)
        );
    }

    #[test]
    fn test_mime_parameters_are_ignored() {
        assert_eq!(
            MediaType::detect(Some("text/plain; charset=utf-8"), None),
            Some(MediaType::PlainText)
        );
    }

    #[test]
    fn test_unknown_mime_is_unsupported() {
        assert_eq!(MediaType::detect(Some("image/png"), Some("resume.pdf")), None);
    }

    #[test]
    fn test_output_file_names_are_fixed() {
        assert_eq!(MediaType::Pdf.output_file_name(), "optimized_resume.pdf");
        assert_eq!(MediaType::PlainText.output_file_name(), "optimized_resume.txt");
        assert_eq!(MediaType::PlainText.mime(), "text/plain");
    }
}
