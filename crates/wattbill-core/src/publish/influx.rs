//! Blocking InfluxDB v2 write client.

use reqwest::blocking::Client;
use tracing::{debug, info};

use super::{Point, Result};
use crate::error::PublishError;
use crate::models::config::InfluxConfig;

/// Writes line-protocol points to the InfluxDB v2 write API.
pub struct InfluxWriter {
    http: Client,
    url: String,
    token: String,
    org: String,
}

impl InfluxWriter {
    pub fn new(config: &InfluxConfig) -> Self {
        Self {
            http: Client::new(),
            url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            org: config.org.clone(),
        }
    }

    /// Synchronously write one point. A failure is fatal for the run; the
    /// write is not retried.
    pub fn write(&self, bucket: &str, point: &Point) -> Result<()> {
        let line = point.to_line_protocol();
        debug!(%line, "writing point to InfluxDB");

        let response = self
            .http
            .post(format!("{}/api/v2/write", self.url))
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", bucket),
                ("precision", "ns"),
            ])
            .header("Authorization", format!("Token {}", self.token))
            .body(line)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PublishError::Api { status, body });
        }

        info!(bucket, "invoice point written");
        Ok(())
    }
}
