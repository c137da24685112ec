//! Configuration for the import pipeline.
//!
//! All connection parameters come from the environment; an optional TOML
//! file named by `WATTBILL_CONFIG` overrides individual keys. The loaded
//! configuration is immutable and passed by reference to each component.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, WattbillError};

/// Environment variable naming the optional override file.
const CONFIG_FILE_VAR: &str = "WATTBILL_CONFIG";

/// Complete pipeline configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub imap: ImapConfig,
    pub nextcloud: NextcloudConfig,
    pub influx: InfluxConfig,
}

/// Mailbox connection and folder settings.
#[derive(Debug, Clone)]
pub struct ImapConfig {
    pub server: String,
    pub user: String,
    pub password: String,
    /// Folder scanned for unseen invoice mail.
    pub source_folder: String,
    /// Folder a message is moved to once its PDF is validated.
    pub destination_folder: String,
}

/// Nextcloud WebDAV settings for PDF archival.
#[derive(Debug, Clone)]
pub struct NextcloudConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Remote folder the PDFs are uploaded into.
    pub file_path: String,
}

/// InfluxDB v2 connection settings.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

impl Config {
    /// Build the configuration from the environment, applying the override
    /// file if `WATTBILL_CONFIG` points at one.
    pub fn load() -> Result<Self> {
        let overrides = match env::var(CONFIG_FILE_VAR) {
            Ok(path) if !path.is_empty() => FileOverrides::from_file(Path::new(&path))?,
            _ => FileOverrides::default(),
        };
        Self::from_env_with(overrides)
    }

    fn from_env_with(file: FileOverrides) -> Result<Self> {
        Ok(Config {
            imap: ImapConfig {
                server: required("IMAP_SERVER", file.imap.server)?,
                user: required("EMAIL_USER", file.imap.user)?,
                password: required("EMAIL_PASS", file.imap.password)?,
                source_folder: defaulted("EMAIL_SOURCE_FOLDER", file.imap.source_folder, "INBOX"),
                destination_folder: defaulted(
                    "EMAIL_DESTINATION_FOLDER",
                    file.imap.destination_folder,
                    "Processed",
                ),
            },
            nextcloud: NextcloudConfig {
                url: required("NEXTCLOUD_URL", file.nextcloud.url)?,
                user: required("NEXTCLOUD_USER", file.nextcloud.user)?,
                password: required("NEXTCLOUD_PASS", file.nextcloud.password)?,
                file_path: required("NEXTCLOUD_FILE_PATH", file.nextcloud.file_path)?,
            },
            influx: InfluxConfig {
                url: required("INFLUXDB_URL", file.influxdb.url)?,
                token: required("INFLUXDB_TOKEN", file.influxdb.token)?,
                org: required("INFLUXDB_ORG", file.influxdb.org)?,
                bucket: required("INFLUXDB_BUCKET", file.influxdb.bucket)?,
            },
        })
    }
}

fn required(key: &str, file_value: Option<String>) -> Result<String> {
    resolve(file_value, env::var(key).ok())
        .ok_or_else(|| WattbillError::Config(format!("missing required setting {}", key)))
}

fn defaulted(key: &str, file_value: Option<String>, default: &str) -> String {
    resolve(file_value, env::var(key).ok()).unwrap_or_else(|| default.to_string())
}

/// The override file wins over the environment; empty values count as unset.
fn resolve(file_value: Option<String>, env_value: Option<String>) -> Option<String> {
    file_value
        .filter(|v| !v.is_empty())
        .or(env_value.filter(|v| !v.is_empty()))
}

/// Per-key overrides loaded from the TOML file. Every key is optional;
/// sections may be absent entirely.
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    #[serde(default)]
    imap: ImapOverrides,
    #[serde(default)]
    nextcloud: NextcloudOverrides,
    #[serde(default)]
    influxdb: InfluxOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct ImapOverrides {
    server: Option<String>,
    user: Option<String>,
    password: Option<String>,
    source_folder: Option<String>,
    destination_folder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NextcloudOverrides {
    url: Option<String>,
    user: Option<String>,
    password: Option<String>,
    file_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct InfluxOverrides {
    url: Option<String>,
    token: Option<String>,
    org: Option<String>,
    bucket: Option<String>,
}

impl FileOverrides {
    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            WattbillError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            WattbillError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }
}
