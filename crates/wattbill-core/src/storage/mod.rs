//! Object-storage archival for invoice PDFs.

mod webdav;

pub use webdav::WebdavUploader;

use crate::error::UploadError;

/// Result type for upload operations.
pub type Result<T> = std::result::Result<T, UploadError>;
