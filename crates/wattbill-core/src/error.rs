//! Error types for the wattbill-core library.

use thiserror::Error;

/// Main error type for the wattbill library.
#[derive(Error, Debug)]
pub enum WattbillError {
    /// Mailbox access error.
    #[error("mailbox error: {0}")]
    Mail(#[from] MailError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Time-series write error.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// Object-storage upload error.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while talking to the IMAP server. Connect and login
/// failures are fatal for the run; everything per-message is handled by
/// the scanner.
#[derive(Error, Debug)]
pub enum MailError {
    /// Protocol or transport failure reported by the IMAP client.
    #[error("IMAP error: {0}")]
    Imap(#[from] imap::Error),

    /// TLS connector could not be built.
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// The server rejected the credentials.
    #[error("login failed for {user}: {reason}")]
    Login { user: String, reason: String },

    /// The fetched message could not be parsed as RFC822.
    #[error("message {uid} could not be parsed")]
    UnparsableMessage { uid: u32 },

    /// The fetch response carried no message body.
    #[error("message {uid} has no RFC822 body")]
    EmptyFetch { uid: u32 },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to invoice field extraction. Any of these aborts the
/// run; partial records are never produced.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Required field did not match anywhere in the invoice text.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A matched value could not be converted to its typed form.
    #[error("failed to parse {field}: {value}")]
    Parse { field: &'static str, value: String },
}

/// Errors raised by the InfluxDB write client.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The write request did not complete.
    #[error("write request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The write API answered with a non-success status.
    #[error("InfluxDB returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Errors raised by the WebDAV uploader.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The upload request did not complete.
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("WebDAV returned {status} for {filename}")]
    Status {
        status: reqwest::StatusCode,
        filename: String,
    },
}

/// Result type for the wattbill library.
pub type Result<T> = std::result::Result<T, WattbillError>;
