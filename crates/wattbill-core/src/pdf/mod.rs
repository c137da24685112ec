//! PDF text extraction.

mod extractor;

pub use extractor::PdfText;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
