//! Nextcloud WebDAV upload.

use reqwest::blocking::Client;
use tracing::info;

use super::Result;
use crate::error::UploadError;
use crate::mail::ValidatedPdf;
use crate::models::config::NextcloudConfig;

/// Uploads invoice PDFs to a Nextcloud WebDAV folder.
pub struct WebdavUploader {
    http: Client,
    base_url: String,
    user: String,
    password: String,
    remote_path: String,
}

impl WebdavUploader {
    pub fn new(config: &NextcloudConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            password: config.password.clone(),
            remote_path: config.file_path.trim_matches('/').to_string(),
        }
    }

    /// PUT the PDF under the configured remote folder. A non-success
    /// response is fatal for the run.
    pub fn upload(&self, pdf: &ValidatedPdf) -> Result<()> {
        let url = format!(
            "{}/remote.php/dav/files/{}/{}/{}",
            self.base_url,
            self.user,
            self.remote_path,
            pdf.filename()
        );

        let response = self
            .http
            .put(&url)
            .basic_auth(&self.user, Some(&self.password))
            .body(pdf.bytes().to_vec())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status {
                status,
                filename: pdf.filename().to_string(),
            });
        }

        info!(filename = pdf.filename(), "PDF archived to Nextcloud");
        Ok(())
    }
}
