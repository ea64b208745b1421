//! Text Extractor — turns an uploaded document into plain text.
//!
//! PDFs go through `pdf-extract`; UTF-8 text payloads pass straight through. Failures
//! never escape: [`extract_text`] logs and returns an empty string, which the engine
//! reports as an unreadable document.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("PDF parser panicked")]
    PdfPanic,

    #[error("document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document is empty")]
    Empty,
}

/// Format guessed from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
    Unknown,
}

impl DocumentKind {
    pub fn sniff(bytes: &[u8]) -> Self {
        let trimmed = trim_leading_whitespace(bytes);
        if trimmed.starts_with(PDF_MAGIC) {
            DocumentKind::Pdf
        } else if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() {
            DocumentKind::Text
        } else {
            DocumentKind::Unknown
        }
    }
}

fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
            Err(_) => Err(ExtractionError::PdfPanic),
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(std::str::from_utf8(bytes)?.to_string())
    }
}

/// Dispatches on [`DocumentKind`]. Unknown binary content is handed to the PDF parser,
/// which is the format the upload form asks for.
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        let kind = DocumentKind::sniff(bytes);
        debug!(?kind, size = bytes.len(), "Extracting document text");
        match kind {
            DocumentKind::Text => PlainTextExtractor.extract(bytes),
            DocumentKind::Pdf | DocumentKind::Unknown => PdfExtractor.extract(bytes),
        }
    }
}

/// Extracted text, or `""` when the document cannot be read.
pub fn extract_text(bytes: &[u8]) -> String {
    match DocumentExtractor.extract(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not extract document text: {e}");
            String::new()
        }
    }
}

/// Minimal documents for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    /// A one-page PDF showing `text` in Helvetica, with a correct cross-reference table.
    pub fn single_page_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_start = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }
}
