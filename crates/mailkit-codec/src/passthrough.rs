//! Identity, 7bit and 8bit transfer encodings.
//!
//! None of them transform the content; they differ only in the charset
//! assumed when converting between text and bytes.

use crate::charset;
use crate::codec::{Codec, Context};
use crate::error::Result;

/// Passthrough codec parameterized by an assumed charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passthrough {
    assumed_charset: &'static str,
}

/// No declared transfer encoding.
pub static IDENTITY: Passthrough = Passthrough::new(charset::DEFAULT_CHARSET);

/// `7bit`: content is plain ASCII.
pub static SEVEN_BIT: Passthrough = Passthrough::new("us-ascii");

/// `8bit`: content is raw text in its declared charset.
pub static EIGHT_BIT: Passthrough = Passthrough::new(charset::DEFAULT_CHARSET);

impl Passthrough {
    /// Creates a passthrough codec that assumes `assumed_charset` when the
    /// caller does not declare one.
    #[must_use]
    pub const fn new(assumed_charset: &'static str) -> Self {
        Self { assumed_charset }
    }

    /// Returns the charset assumed when none is declared.
    #[must_use]
    pub const fn assumed_charset(&self) -> &'static str {
        self.assumed_charset
    }

    fn charset<'a>(&self, declared: Option<&'a str>) -> &'a str {
        declared
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.assumed_charset)
    }
}

impl Codec for Passthrough {
    fn encode(&self, _charset: Option<&str>, text: &str, _context: Context) -> String {
        text.to_string()
    }

    fn encode_bytes(&self, charset: Option<&str>, bytes: &[u8], _context: Context) -> String {
        charset::decode_bytes(Some(self.charset(charset)), bytes).into_owned()
    }

    fn decode(&self, _charset: Option<&str>, text: &str, _context: Context) -> Result<String> {
        Ok(text.to_string())
    }

    fn decode_to_bytes(
        &self,
        charset: Option<&str>,
        text: &str,
        _context: Context,
    ) -> Result<Vec<u8>> {
        Ok(charset::encode_text(Some(self.charset(charset)), text).into_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_unchanged() {
        let text = "Line one\r\n=41 stays =41";
        assert_eq!(IDENTITY.encode(None, text, Context::Body), text);
        assert_eq!(IDENTITY.decode(None, text, Context::Body).unwrap(), text);
        assert_eq!(SEVEN_BIT.decode(None, text, Context::Header).unwrap(), text);
    }

    #[test]
    fn test_seven_bit_assumes_single_byte() {
        assert_eq!(SEVEN_BIT.assumed_charset(), "us-ascii");
        let bytes = SEVEN_BIT.decode_to_bytes(None, "hello", Context::Body).unwrap();
        assert_eq!(bytes, b"hello");
        // us-ascii resolves to windows-1252, one byte per character
        let bytes = SEVEN_BIT.decode_to_bytes(None, "é", Context::Body).unwrap();
        assert_eq!(bytes, b"\xe9");
    }

    #[test]
    fn test_declared_charset_wins() {
        let bytes = SEVEN_BIT
            .decode_to_bytes(Some("utf-8"), "é", Context::Body)
            .unwrap();
        assert_eq!(bytes, "é".as_bytes());

        let text = EIGHT_BIT.encode_bytes(Some("iso-8859-1"), b"caf\xe9", Context::Body);
        assert_eq!(text, "café");
    }
}
