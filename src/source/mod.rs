//! Document bytes → plain text.
//!
//! Extraction never fails loudly: unreadable input yields an empty string, which the
//! pipeline treats as "no questions". With the `ocr` feature, scanned PDF pages are read
//! through [`ocr`].

pub mod ocr;

#[cfg(test)]
mod tests;

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Turns an uploaded document into text.
pub trait TextSource: Send + Sync {
    /// Returns the document text, or an empty string if nothing could be read.
    fn extract_text(&self, document: &[u8]) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Unknown,
}

impl DocumentKind {
    pub fn sniff(document: &[u8]) -> Self {
        if document.starts_with(PDF_MAGIC) {
            DocumentKind::Pdf
        } else if std::str::from_utf8(document).is_ok() {
            DocumentKind::PlainText
        } else {
            DocumentKind::Unknown
        }
    }
}

/// PDF text layer via `pdf-extract`, UTF-8 passthrough for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextSource;

impl TextSource for DocumentTextSource {
    fn extract_text(&self, document: &[u8]) -> String {
        if document.is_empty() {
            return String::new();
        }

        let kind = DocumentKind::sniff(document);
        let text = match kind {
            DocumentKind::Pdf => extract_pdf_text(document),
            DocumentKind::PlainText => String::from_utf8_lossy(document).into_owned(),
            DocumentKind::Unknown => {
                warn!(bytes = document.len(), "Unrecognized document format");
                String::new()
            }
        };

        debug!(
            kind = ?kind,
            bytes = document.len(),
            chars = text.chars().count(),
            "Document text extracted"
        );
        text
    }
}

#[cfg(feature = "ocr")]
fn extract_pdf_text(document: &[u8]) -> String {
    match catch_unwind(AssertUnwindSafe(|| ocr::extract_with_ocr(document))) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, "OCR unavailable, using PDF text layer only");
            extract_text_layer(document)
        }
        Err(_) => {
            warn!("OCR panicked, using PDF text layer only");
            extract_text_layer(document)
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn extract_pdf_text(document: &[u8]) -> String {
    extract_text_layer(document)
}

fn extract_text_layer(document: &[u8]) -> String {
    // pdf-extract panics on some malformed files
    let result = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(document)
    }));

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, "PDF extraction failed");
            String::new()
        }
        Err(_) => {
            warn!("PDF extraction panicked (malformed PDF)");
            String::new()
        }
    }
}
