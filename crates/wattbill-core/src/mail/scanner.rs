//! Unseen-invoice mailbox scanner.

use mail_parser::{MessageParser, MimeHeaders, PartType};
use tracing::{debug, info, warn};

use super::{
    decode_header, validate_attachment, Attachment, AttachmentPayload, MailMessage, MailSession,
    Result, ValidatedPdf,
};
use crate::error::MailError;

/// Subject substring identifying an Electrohold invoice email.
pub const SUBJECT_MARKER: &str = "Електрохолд Продажби - Фактура";

/// How many matching messages one scan drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Stop after the first message that yields a valid PDF.
    FirstBill,
    /// Process every matching unseen message in one run.
    AllBills,
}

/// Scans a mailbox folder for unseen invoice mails and extracts their PDFs.
pub struct MailboxScanner<'a, S: MailSession> {
    session: &'a mut S,
    destination_folder: &'a str,
    mode: ScanMode,
}

impl<'a, S: MailSession> MailboxScanner<'a, S> {
    pub fn new(session: &'a mut S, destination_folder: &'a str, mode: ScanMode) -> Self {
        Self {
            session,
            destination_folder,
            mode,
        }
    }

    /// Fetch unseen messages, keep those whose subject contains
    /// [`SUBJECT_MARKER`], and run their attachments through validation.
    ///
    /// A matching message is moved to the destination folder once its
    /// first valid PDF is found; every valid PDF of the message is
    /// collected. Matching messages without a valid PDF stay unseen for
    /// manual inspection. An empty mailbox is a normal empty result.
    pub fn scan(&mut self) -> Result<Vec<ValidatedPdf>> {
        let uids = self.session.search_unseen()?;
        info!(count = uids.len(), "unseen messages found");

        let mut bills = Vec::new();
        for uid in uids {
            let message = self.fetch_message(uid)?;

            if !message.subject.contains(SUBJECT_MARKER) {
                debug!(uid, subject = %message.subject, "skipping message, subject does not match");
                continue;
            }

            let mut moved = false;
            for attachment in &message.attachments {
                let Some(pdf) = validate_attachment(attachment) else {
                    continue;
                };

                if !moved {
                    self.session.move_to(uid, self.destination_folder)?;
                    info!(
                        uid,
                        folder = self.destination_folder,
                        filename = pdf.filename(),
                        "message moved, PDF ready"
                    );
                    moved = true;
                }
                bills.push(pdf);
            }

            if !moved {
                warn!(uid, "no valid PDF found in matching message");
            } else if self.mode == ScanMode::FirstBill {
                break;
            }
        }

        Ok(bills)
    }

    fn fetch_message(&mut self, uid: u32) -> Result<MailMessage> {
        let raw = self.session.fetch_raw(uid)?;
        parse_message(uid, &raw)
    }
}

/// Parse raw RFC822 bytes into the scanner's message model.
fn parse_message(uid: u32, raw: &[u8]) -> Result<MailMessage> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or(MailError::UnparsableMessage { uid })?;

    // mail-parser decodes well-formed subjects itself; the fallback path
    // catches encoded words it passed through verbatim.
    let subject = decode_header(parsed.subject().unwrap_or_default());

    let attachments = parsed
        .attachments()
        .map(|part| {
            let filename = part
                .attachment_name()
                .unwrap_or("attachment.bin")
                .to_string();
            let content_type = part
                .content_type()
                .map(|ct| match ct.subtype() {
                    Some(subtype) => format!("{}/{}", ct.ctype(), subtype),
                    None => ct.ctype().to_string(),
                })
                .unwrap_or_default();
            let payload = match &part.body {
                PartType::Text(text) => AttachmentPayload::Text(text.to_string()),
                _ => AttachmentPayload::Binary(part.contents().to_vec()),
            };
            Attachment {
                filename,
                content_type,
                payload,
            }
        })
        .collect();

    Ok(MailMessage {
        uid,
        subject,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory mailbox recording every move.
    struct FakeSession {
        messages: Vec<(u32, Vec<u8>)>,
        moved: Vec<(u32, String)>,
    }

    impl FakeSession {
        fn new(messages: Vec<(u32, Vec<u8>)>) -> Self {
            Self {
                messages,
                moved: Vec::new(),
            }
        }
    }

    impl MailSession for FakeSession {
        fn search_unseen(&mut self) -> Result<Vec<u32>> {
            Ok(self.messages.iter().map(|(uid, _)| *uid).collect())
        }

        fn fetch_raw(&mut self, uid: u32) -> Result<Vec<u8>> {
            Ok(self
                .messages
                .iter()
                .find(|(candidate, _)| *candidate == uid)
                .map(|(_, raw)| raw.clone())
                .expect("fetch of unknown uid"))
        }

        fn move_to(&mut self, uid: u32, folder: &str) -> Result<()> {
            self.moved.push((uid, folder.to_string()));
            Ok(())
        }
    }

    /// base64 of "%PDF-1.4 fake electrohold invoice body".
    const PDF_B64: &str = "JVBERi0xLjQgZmFrZSBlbGVjdHJvaG9sZCBpbnZvaWNlIGJvZHk=";

    fn invoice_message(subject: &str, attachment_b64: &str) -> Vec<u8> {
        format!(
            "From: billing@electrohold.bg\r\n\
             To: home@example.com\r\n\
             Subject: {subject}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/mixed; boundary=\"frontier\"\r\n\
             \r\n\
             --frontier\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             \r\n\
             Your invoice is attached.\r\n\
             --frontier\r\n\
             Content-Type: application/pdf; name=\"invoice.pdf\"\r\n\
             Content-Disposition: attachment; filename=\"invoice.pdf\"\r\n\
             Content-Transfer-Encoding: base64\r\n\
             \r\n\
             {attachment_b64}\r\n\
             --frontier--\r\n"
        )
        .into_bytes()
    }

    #[test]
    fn test_empty_mailbox_is_a_normal_empty_result() {
        let mut session = FakeSession::new(Vec::new());
        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert!(bills.is_empty());
        assert!(session.moved.is_empty());
    }

    #[test]
    fn test_matching_message_yields_pdf_and_is_moved() {
        let raw = invoice_message("Електрохолд Продажби - Фактура 0123456789", PDF_B64);
        let mut session = FakeSession::new(vec![(7, raw)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].filename(), "invoice.pdf");
        assert!(bills[0].bytes().starts_with(b"%PDF-1.4"));
        assert_eq!(session.moved, vec![(7, "Processed".to_string())]);
    }

    #[test]
    fn test_non_matching_subject_is_left_unseen() {
        let raw = invoice_message("Totally unrelated newsletter", PDF_B64);
        let mut session = FakeSession::new(vec![(3, raw)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert!(bills.is_empty());
        assert!(session.moved.is_empty());
    }

    #[test]
    fn test_matching_message_without_valid_pdf_is_not_moved() {
        // base64 of "not a pdf at all"
        let raw = invoice_message(
            "Електрохолд Продажби - Фактура 0123456789",
            "bm90IGEgcGRmIGF0IGFsbA==",
        );
        let mut session = FakeSession::new(vec![(11, raw)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert!(bills.is_empty());
        assert!(session.moved.is_empty());
    }

    #[test]
    fn test_first_bill_mode_stops_after_first_match() {
        let matching = invoice_message("Електрохолд Продажби - Фактура 0123456789", PDF_B64);
        let mut session = FakeSession::new(vec![(1, matching.clone()), (2, matching)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::FirstBill)
            .scan()
            .unwrap();

        assert_eq!(bills.len(), 1);
        assert_eq!(session.moved, vec![(1, "Processed".to_string())]);
    }

    #[test]
    fn test_all_bills_mode_drains_every_match() {
        let matching = invoice_message("Електрохолд Продажби - Фактура 0123456789", PDF_B64);
        let other = invoice_message("Some other mail", PDF_B64);
        let mut session =
            FakeSession::new(vec![(1, matching.clone()), (2, other), (3, matching)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert_eq!(bills.len(), 2);
        assert_eq!(
            session.moved,
            vec![(1, "Processed".to_string()), (3, "Processed".to_string())]
        );
    }

    #[test]
    fn test_encoded_subject_is_decoded_before_matching() {
        // base64 of "Електрохолд Продажби - Фактура 0123456789"
        let encoded =
            "=?UTF-8?B?0JXQu9C10LrRgtGA0L7RhdC+0LvQtCDQn9GA0L7QtNCw0LbQsdC4IC0g0KTQsNC60YLRg9GA0LAg?=\r\n =?UTF-8?B?MDEyMzQ1Njc4OQ==?=";
        let raw = invoice_message(encoded, PDF_B64);
        let mut session = FakeSession::new(vec![(5, raw)]);

        let bills = MailboxScanner::new(&mut session, "Processed", ScanMode::AllBills)
            .scan()
            .unwrap();

        assert_eq!(bills.len(), 1);
        assert_eq!(session.moved.len(), 1);
    }
}
