//! Core library for the Electrohold invoice importer.
//!
//! This crate provides:
//! - Mailbox scanning over IMAP (unseen invoice mail, subject filtering,
//!   move-on-success processing)
//! - MIME header decoding and PDF attachment validation
//! - Bulgarian invoice field extraction (billing period, day/night tariff
//!   readings, amount due)
//! - Line-protocol publishing to InfluxDB and WebDAV archival

pub mod error;
pub mod invoice;
pub mod mail;
pub mod models;
pub mod pdf;
pub mod publish;
pub mod storage;

pub use error::{Result, WattbillError};
pub use invoice::{ElectroholdParser, InvoiceParser};
pub use mail::{MailSession, MailboxScanner, ScanMode, TlsImapSession, ValidatedPdf};
pub use models::config::Config;
pub use models::invoice::InvoiceRecord;
pub use pdf::PdfText;
pub use publish::{InfluxWriter, Point};
pub use storage::WebdavUploader;
