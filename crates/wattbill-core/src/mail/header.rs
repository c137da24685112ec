//! MIME encoded-word decoding for mail headers.

use base64::prelude::{Engine, BASE64_STANDARD};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    /// RFC 2047 encoded-word: `=?charset?B|Q?payload?=`.
    static ref ENCODED_WORD: Regex = Regex::new(r"=\?([^?]+)\?([bBqQ])\?([^?]*)\?=").unwrap();

    /// Whitespace between two adjacent encoded words is not part of the text.
    static ref WORD_SEPARATOR: Regex = Regex::new(r"\?=\s+=\?").unwrap();
}

/// Decode a possibly RFC 2047 encoded header value to plain text.
///
/// Falls back to the raw value unchanged when any encoded word fails to
/// decode; header problems are never fatal.
pub fn decode_header(raw: &str) -> String {
    if !raw.contains("=?") {
        return raw.to_string();
    }

    let joined = WORD_SEPARATOR.replace_all(raw, "?==?");

    let mut failed = false;
    let decoded = ENCODED_WORD.replace_all(&joined, |caps: &regex::Captures<'_>| {
        match decode_word(&caps[1], &caps[2], &caps[3]) {
            Some(text) => text,
            None => {
                failed = true;
                caps[0].to_string()
            }
        }
    });

    if failed {
        warn!(header = raw, "failed to decode header, using raw value");
        return raw.to_string();
    }

    decoded.into_owned()
}

fn decode_word(charset: &str, encoding: &str, payload: &str) -> Option<String> {
    let bytes = match encoding {
        "B" | "b" => BASE64_STANDARD.decode(payload).ok()?,
        "Q" | "q" => decode_q(payload)?,
        _ => return None,
    };

    match charset.to_ascii_lowercase().as_str() {
        "utf-8" | "us-ascii" => String::from_utf8(bytes).ok(),
        // Other charsets are rare on these mails; decode lossily rather
        // than drop the subject.
        _ => Some(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Q-encoding: quoted-printable for headers, with `_` standing for space.
fn decode_q(payload: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len());
    let mut bytes = payload.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'_' => out.push(b' '),
            b'=' => {
                let hex = [bytes.next()?, bytes.next()?];
                let hex = std::str::from_utf8(&hex).ok()?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
            }
            other => out.push(other),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_header_passes_through() {
        assert_eq!(decode_header("Invoice 2024-01"), "Invoice 2024-01");
    }

    #[test]
    fn test_base64_encoded_word() {
        assert_eq!(decode_header("=?UTF-8?B?0KTQsNC60YLRg9GA0LA=?="), "Фактура");
    }

    #[test]
    fn test_q_encoded_word() {
        assert_eq!(decode_header("=?UTF-8?Q?Hello_World?="), "Hello World");
        assert_eq!(decode_header("=?UTF-8?Q?a=3Db?="), "a=b");
    }

    #[test]
    fn test_mixed_plain_and_encoded() {
        assert_eq!(
            decode_header("=?UTF-8?B?0KTQsNC60YLRg9GA0LA=?= 123/2024"),
            "Фактура 123/2024"
        );
    }

    #[test]
    fn test_adjacent_words_join_without_separator() {
        assert_eq!(
            decode_header("=?UTF-8?Q?Hello?= =?UTF-8?Q?_World?="),
            "Hello World"
        );
    }

    #[test]
    fn test_undecodable_word_falls_back_to_raw() {
        let raw = "=?UTF-8?B?not!!base64?=";
        assert_eq!(decode_header(raw), raw);

        let truncated = "=?UTF-8?Q?ab=4?=";
        assert_eq!(decode_header(truncated), truncated);
    }
}
