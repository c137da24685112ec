//! IMAP mailbox session.

use std::net::TcpStream;

use native_tls::{TlsConnector, TlsStream};
use tracing::info;

use super::Result;
use crate::error::MailError;
use crate::models::config::ImapConfig;

/// IMAPS port; the mailbox collaborator requires TLS.
const IMAPS_PORT: u16 = 993;

/// Minimal mailbox operations the scanner needs. Implemented by the real
/// TLS session and by in-memory fakes in tests.
pub trait MailSession {
    /// Uids of unseen messages in the selected source folder, in mailbox
    /// order.
    fn search_unseen(&mut self) -> Result<Vec<u32>>;

    /// Raw RFC822 bytes of one message.
    fn fetch_raw(&mut self, uid: u32) -> Result<Vec<u8>>;

    /// Move a message to `folder`. This is the sole mark-as-processed
    /// step in the pipeline.
    fn move_to(&mut self, uid: u32, folder: &str) -> Result<()>;
}

/// IMAP-over-TLS session against the configured server.
pub struct TlsImapSession {
    session: imap::Session<TlsStream<TcpStream>>,
}

impl TlsImapSession {
    /// Connect, log in and select the source folder.
    pub fn connect(config: &ImapConfig) -> Result<Self> {
        let tls = TlsConnector::builder().build()?;

        info!(server = %config.server, "connecting to IMAP server");
        let client = imap::connect((config.server.as_str(), IMAPS_PORT), &config.server, &tls)?;

        let mut session = client
            .login(&config.user, &config.password)
            .map_err(|(err, _)| MailError::Login {
                user: config.user.clone(),
                reason: err.to_string(),
            })?;
        info!(user = %config.user, "logged in");

        session.select(&config.source_folder)?;
        info!(folder = %config.source_folder, "mailbox selected");

        Ok(Self { session })
    }

    /// Log out, releasing the connection. A failed logout is not worth
    /// surfacing after the scan has finished.
    pub fn logout(mut self) {
        let _ = self.session.logout();
    }
}

impl MailSession for TlsImapSession {
    fn search_unseen(&mut self) -> Result<Vec<u32>> {
        let uids = self.session.uid_search("UNSEEN")?;
        let mut uids: Vec<u32> = uids.into_iter().collect();
        uids.sort_unstable();
        Ok(uids)
    }

    fn fetch_raw(&mut self, uid: u32) -> Result<Vec<u8>> {
        let fetches = self.session.uid_fetch(uid.to_string(), "RFC822")?;
        let body = fetches
            .iter()
            .next()
            .and_then(|fetch| fetch.body())
            .ok_or(MailError::EmptyFetch { uid })?;
        Ok(body.to_vec())
    }

    fn move_to(&mut self, uid: u32, folder: &str) -> Result<()> {
        self.session.uid_mv(uid.to_string(), folder)?;
        Ok(())
    }
}
