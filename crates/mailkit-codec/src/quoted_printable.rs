//! Quoted-Printable transfer encoding (RFC 2045 section 6.7).
//!
//! Body content is encoded line by line with soft line breaks keeping every
//! output line within 76 characters. Header values are delegated to the
//! RFC 2047 encoded-word rules in [`crate::encoded_word`].
//!
//! Decoding never fails: malformed escapes are passed through literally.

use std::fmt::Write as _;

use crate::charset;
use crate::codec::{Codec, Context};
use crate::encoded_word;
use crate::error::Result;

/// Visible characters allowed on a line before the soft break marker.
const MAX_COLUMN: usize = 75;

/// Quoted-Printable codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotedPrintable;

/// Shared quoted-printable codec instance.
pub static QUOTED_PRINTABLE: QuotedPrintable = QuotedPrintable;

impl Codec for QuotedPrintable {
    fn encode(&self, charset: Option<&str>, text: &str, context: Context) -> String {
        match context {
            Context::Body => encode_lines(&charset::encode_text(charset, text)),
            Context::Header => encoded_word::encode(charset, text),
        }
    }

    fn encode_bytes(&self, charset: Option<&str>, bytes: &[u8], context: Context) -> String {
        match context {
            Context::Body => encode_lines(bytes),
            Context::Header => {
                encoded_word::encode(charset, &charset::decode_bytes(charset, bytes))
            }
        }
    }

    fn decode(&self, charset: Option<&str>, text: &str, context: Context) -> Result<String> {
        Ok(match context {
            Context::Body => unescape(charset, &join_soft_breaks(text)),
            Context::Header => encoded_word::decode(text),
        })
    }

    fn decode_to_bytes(
        &self,
        charset: Option<&str>,
        text: &str,
        context: Context,
    ) -> Result<Vec<u8>> {
        Ok(match context {
            Context::Body => unescape_bytes(&join_soft_breaks(text)),
            Context::Header => {
                charset::encode_text(charset, &encoded_word::decode(text)).into_owned()
            }
        })
    }
}

/// Returns true if a body byte must be written as `=XX`.
const fn needs_escape(byte: u8) -> bool {
    (byte < 0x20 && byte != b'\t') || byte == b'=' || byte >= 0x7F
}

/// Encodes bytes, preserving the line structure of the source.
fn encode_lines(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() + bytes.len() / 2);

    for (index, line) in bytes.split(|&b| b == b'\n').enumerate() {
        if index > 0 {
            result.push_str("\r\n");
        }
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        encode_line(line, &mut result);
    }

    result
}

fn encode_line(line: &[u8], result: &mut String) {
    // Trailing blanks are escaped so transports that strip them can't.
    let content_end = line
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t'))
        .map_or(0, |pos| pos + 1);
    let mut column = 0;

    for (index, &byte) in line.iter().enumerate() {
        let escape = index >= content_end || needs_escape(byte);
        let width = if escape { 3 } else { 1 };

        if column + width > MAX_COLUMN {
            result.push_str("=\r\n");
            column = 0;
        }

        if escape {
            let _ = write!(result, "={byte:02X}");
        } else {
            result.push(char::from(byte));
        }
        column += width;
    }
}

/// Removes soft line breaks and normalizes hard ones to CRLF.
///
/// Trailing whitespace is trimmed from every line first, so a soft break
/// followed by padding is still recognized.
fn join_soft_breaks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        let line = line.trim_end();
        if let Some(joined) = line.strip_suffix('=') {
            result.push_str(joined);
        } else {
            result.push_str(line);
            if lines.peek().is_some() {
                result.push_str("\r\n");
            }
        }
    }

    result
}

/// Replaces `=XX` escapes, decoding each run of escaped bytes through the
/// charset in one go so multi-byte sequences survive.
pub(crate) fn unescape(charset: Option<&str>, text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending = Vec::new();

    for token in Tokens::new(text) {
        match token {
            Token::Byte(byte) => pending.push(byte),
            Token::Literal(literal) => {
                flush(charset, &mut pending, &mut result);
                result.push_str(literal);
            }
        }
    }
    flush(charset, &mut pending, &mut result);

    result
}

fn flush(charset: Option<&str>, pending: &mut Vec<u8>, result: &mut String) {
    if !pending.is_empty() {
        result.push_str(&charset::decode_bytes(charset, pending));
        pending.clear();
    }
}

fn unescape_bytes(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len());
    for token in Tokens::new(text) {
        match token {
            Token::Byte(byte) => result.push(byte),
            Token::Literal(literal) => result.extend_from_slice(literal.as_bytes()),
        }
    }
    result
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Byte(u8),
}

/// Splits quoted-printable text into literal runs and escaped bytes.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(tail) = self.rest.strip_prefix('=') {
            if let Some(byte) = hex_byte(tail) {
                self.rest = &tail[2..];
                return Some(Token::Byte(byte));
            }
            // Malformed escape, keep the '=' as text
            let (literal, rest) = self.rest.split_at(1);
            self.rest = rest;
            return Some(Token::Literal(literal));
        }

        let end = self.rest.find('=').unwrap_or(self.rest.len());
        let (literal, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token::Literal(literal))
    }
}

fn hex_byte(text: &str) -> Option<u8> {
    let digits = text.as_bytes().get(..2)?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u8::from_str_radix(text.get(..2)?, 16).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode(text: &str) -> String {
        QUOTED_PRINTABLE.encode(None, text, Context::Body)
    }

    fn decode(charset: Option<&str>, text: &str) -> String {
        QUOTED_PRINTABLE.decode(charset, text, Context::Body).unwrap()
    }

    #[test]
    fn test_plain_ascii_unchanged() {
        assert_eq!(encode("Hello, World!"), "Hello, World!");
        assert_eq!(decode(None, "Hello, World!"), "Hello, World!");
    }

    #[test]
    fn test_encode_escapes() {
        assert_eq!(encode("a=b"), "a=3Db");
        assert_eq!(encode("Café"), "Caf=C3=A9");
        assert_eq!(encode("tab\there"), "tab\there");
        assert_eq!(encode("bell\u{7}"), "bell=07");
    }

    #[test]
    fn test_encode_charset() {
        let encoded = QUOTED_PRINTABLE.encode(Some("iso-8859-1"), "Café", Context::Body);
        assert_eq!(encoded, "Caf=E9");
    }

    #[test]
    fn test_encode_trailing_whitespace() {
        assert_eq!(encode("end  "), "end=20=20");
        assert_eq!(encode("end\t\r\nnext"), "end=09\r\nnext");
        assert_eq!(encode("in between"), "in between");
    }

    #[test]
    fn test_encode_preserves_line_breaks() {
        assert_eq!(encode("one\r\ntwo\nthree"), "one\r\ntwo\r\nthree");
        assert_eq!(encode("last\r\n"), "last\r\n");
    }

    #[test]
    fn test_encode_soft_breaks() {
        let text = "x".repeat(200);
        let encoded = encode(&text);
        let lines: Vec<&str> = encoded.split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{}=", "x".repeat(75)));
        assert!(lines.iter().all(|l| l.len() <= 76));
        assert_eq!(decode(None, &encoded), text);
    }

    #[test]
    fn test_soft_break_never_splits_escape() {
        let text = format!("{}é", "x".repeat(74));
        let encoded = encode(&text);
        assert!(encoded.starts_with(&format!("{}=\r\n=C3=A9", "x".repeat(74))));
        assert_eq!(decode(Some("utf-8"), &encoded), text);
    }

    #[test]
    fn test_decode_soft_line_break() {
        assert_eq!(decode(None, "Hello=\r\nWorld"), "HelloWorld");
        assert_eq!(decode(None, "Hello=  \nWorld"), "HelloWorld");
        assert_eq!(decode(None, "Hello   \r\nWorld"), "Hello\r\nWorld");
    }

    #[test]
    fn test_decode_utf8_sequences() {
        assert_eq!(decode(Some("utf-8"), "Caf=C3=A9"), "Café");
        // Three and four byte sequences
        assert_eq!(decode(Some("UTF-8"), "=E2=82=AC"), "€");
        assert_eq!(decode(Some("utf-8"), "smile =F0=9F=98=80!"), "smile 😀!");
        // Sequence split by a soft break
        assert_eq!(decode(Some("utf-8"), "Caf=C3=\r\n=A9"), "Café");
        // Lowercase hex
        assert_eq!(decode(Some("utf-8"), "caf=c3=a9"), "café");
    }

    #[test]
    fn test_decode_single_byte_charset() {
        assert_eq!(decode(Some("iso-8859-1"), "Caf=E9"), "Café");
        assert_eq!(decode(Some("iso-8859-15"), "=A4"), "€");
    }

    #[test]
    fn test_decode_malformed_escape() {
        assert_eq!(decode(None, "a=ZZb"), "a=ZZb");
        assert_eq!(decode(None, "a=4"), "a=4");
        assert_eq!(decode(None, "100=%"), "100=%");
    }

    #[test]
    fn test_decode_to_bytes() {
        let bytes = QUOTED_PRINTABLE
            .decode_to_bytes(None, "=FF=00a=\r\nb", Context::Body)
            .unwrap();
        assert_eq!(bytes, b"\xff\x00ab");
    }

    #[test]
    fn test_header_context_delegates() {
        let encoded = QUOTED_PRINTABLE.encode(Some("utf-8"), "Café", Context::Header);
        assert_eq!(encoded, "=?utf-8?Q?Caf=C3=A9?=");
        let decoded = QUOTED_PRINTABLE
            .decode(None, &encoded, Context::Header)
            .unwrap();
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn test_tokens() {
        let tokens: Vec<Token<'_>> = Tokens::new("ab=41=zz").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("ab"),
                Token::Byte(0x41),
                Token::Literal("="),
                Token::Literal("zz"),
            ]
        );
    }

    proptest! {
        #[test]
        fn qp_round_trips_ascii(s in "[ -<>-~]{0,300}(\r\n[ -<>-~]{0,120}){0,4}") {
            // Lines must not end in whitespace for an exact round trip
            let s: String = s.split("\r\n").map(str::trim_end).collect::<Vec<_>>().join("\r\n");
            let encoded = encode(&s);
            prop_assert_eq!(decode(None, &encoded), s);
        }

        #[test]
        fn qp_lines_fit(s in "\\PC{0,400}") {
            let encoded = encode(&s);
            for line in encoded.split("\r\n") {
                prop_assert!(line.len() <= 76, "line too long: {:?}", line);
            }
        }

        #[test]
        fn qp_round_trips_unicode(s in "[^\r\n]{0,200}") {
            let s = s.trim_end().to_string();
            let encoded = encode(&s);
            prop_assert_eq!(decode(Some("utf-8"), &encoded), s);
        }
    }
}
