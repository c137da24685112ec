//! Text extraction from invoice PDFs using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;
use crate::mail::ValidatedPdf;

/// A structurally checked invoice PDF ready for text extraction.
pub struct PdfText {
    raw_data: Vec<u8>,
    page_count: u32,
}

impl PdfText {
    /// Load a validated PDF and check its structure.
    ///
    /// Invoices occasionally arrive encrypted with an empty password;
    /// those are decrypted in place. Anything else encrypted is rejected.
    pub fn load(pdf: &ValidatedPdf) -> Result<Self> {
        let mut doc =
            Document::load_mem(pdf.bytes()).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!(filename = pdf.filename(), "decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            pdf.bytes().to_vec()
        };

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!(filename = pdf.filename(), pages = page_count, "loaded PDF");

        Ok(Self {
            raw_data,
            page_count,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Concatenated text of all pages, page order preserved, pages joined
    /// by newline.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage_with_pdf_magic() {
        // Passed signature validation but is not a parsable document.
        let pdf = ValidatedPdf::for_tests("broken.pdf", b"%PDF-1.4 truncated".to_vec());
        assert!(matches!(PdfText::load(&pdf), Err(PdfError::Parse(_))));
    }
}
