use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::debug;

use crate::resume::ResumeError;

/// Turns a document on disk into raw text, pages concatenated in order.
pub trait DocumentSource: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ResumeError>;
}

/// PDF text extraction via `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentSource;

impl DocumentSource for PdfDocumentSource {
    fn extract_text(&self, path: &Path) -> Result<String, ResumeError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ResumeError::unavailable(path, format!("cannot open file: {e}")))?;

        // pdf-extract panics on some malformed streams instead of returning an error.
        let decoded = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }))
        .map_err(|_| ResumeError::unavailable(path, "PDF decoder aborted on malformed input"))?;

        let text = decoded
            .map_err(|e| ResumeError::unavailable(path, format!("cannot decode PDF: {e}")))?;

        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

/// Reads UTF-8 text files as-is. Used for `.txt` résumés.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl DocumentSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> Result<String, ResumeError> {
        std::fs::read_to_string(path)
            .map_err(|e| ResumeError::unavailable(path, format!("cannot read text file: {e}")))
    }
}

/// Dispatches on file extension: `.txt` goes to [`PlainTextSource`],
/// everything else is treated as a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionRouter {
    pdf: PdfDocumentSource,
    text: PlainTextSource,
}

impl DocumentSource for ExtensionRouter {
    fn extract_text(&self, path: &Path) -> Result<String, ResumeError> {
        let is_text = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);

        if is_text {
            self.text.extract_text(path)
        } else {
            self.pdf.extract_text(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_pdf_is_unavailable() {
        let err = PdfDocumentSource
            .extract_text(Path::new("/nonexistent/resume.pdf"))
            .unwrap_err();
        assert!(matches!(err, ResumeError::DocumentUnavailable { .. }));
    }

    #[test]
    fn test_garbage_pdf_is_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let err = PdfDocumentSource.extract_text(file.path()).unwrap_err();
        assert!(matches!(err, ResumeError::DocumentUnavailable { .. }));
    }

    #[test]
    fn test_router_reads_txt_files_directly() {
        let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        file.write_all(b"jane@example.com\nPython").unwrap();

        let text = ExtensionRouter::default().extract_text(file.path()).unwrap();
        assert_eq!(text, "jane@example.com\nPython");
    }

    #[test]
    fn test_router_sends_other_extensions_to_pdf() {
        let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        file.write_all(b"PK not a pdf").unwrap();

        let err = ExtensionRouter::default().extract_text(file.path()).unwrap_err();
        assert!(matches!(err, ResumeError::DocumentUnavailable { .. }));
    }
}
