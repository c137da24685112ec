//! PDF attachment validation.

use base64::prelude::{Engine, BASE64_STANDARD};
use tracing::{debug, warn};

use super::{Attachment, AttachmentPayload};

/// Leading bytes every well-formed PDF starts with.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// MIME type an invoice attachment must declare.
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A PDF attachment that passed signature validation.
///
/// The only way to obtain one is [`validate_attachment`]; the byte field
/// is private so unvalidated bytes cannot be smuggled in.
#[derive(Debug, Clone)]
pub struct ValidatedPdf {
    filename: String,
    bytes: Vec<u8>,
}

impl ValidatedPdf {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(test)]
    pub(crate) fn for_tests(filename: &str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            bytes,
        }
    }
}

/// Validate a single attachment.
///
/// Returns `None` for anything that is not a usable PDF: wrong declared
/// content type, a text payload that is not valid base64 (undecodable
/// payloads are skipped, not reinterpreted as raw bytes), or bytes missing
/// the `%PDF` signature. All rejections are per-attachment conditions and
/// only logged; the caller moves on to the next attachment.
pub fn validate_attachment(attachment: &Attachment) -> Option<ValidatedPdf> {
    if attachment.content_type != PDF_CONTENT_TYPE {
        debug!(
            filename = %attachment.filename,
            content_type = %attachment.content_type,
            "skipping non-PDF attachment"
        );
        return None;
    }

    let bytes = match &attachment.payload {
        AttachmentPayload::Binary(bytes) => bytes.clone(),
        AttachmentPayload::Text(text) => {
            // MIME bodies wrap base64 across lines; strip all whitespace first.
            let compact: String = text.split_whitespace().collect();
            match BASE64_STANDARD.decode(compact) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(
                        filename = %attachment.filename,
                        %err,
                        "could not decode attachment as base64, skipping"
                    );
                    return None;
                }
            }
        }
    };

    if !bytes.starts_with(PDF_MAGIC) {
        warn!(filename = %attachment.filename, "attachment is not a valid PDF, skipping");
        return None;
    }

    Some(ValidatedPdf {
        filename: attachment.filename.clone(),
        bytes,
    })
}
