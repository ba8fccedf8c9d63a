//! Base64 transfer encoding (RFC 2045 section 6.8).

use ::base64::Engine;
use ::base64::engine::general_purpose::STANDARD;

use crate::charset;
use crate::codec::{Codec, Context};
use crate::error::Result;

/// Maximum encoded line length.
pub const LINE_LENGTH: usize = 76;

/// Base64 codec.
///
/// Encoded output is broken into CRLF-separated lines of [`LINE_LENGTH`]
/// characters. Decoding skips ASCII whitespace and rejects anything else
/// outside the standard alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base64;

/// Shared base64 codec instance.
pub static BASE64: Base64 = Base64;

impl Codec for Base64 {
    fn encode(&self, charset: Option<&str>, text: &str, context: Context) -> String {
        self.encode_bytes(charset, &charset::encode_text(charset, text), context)
    }

    fn encode_bytes(&self, _charset: Option<&str>, bytes: &[u8], _context: Context) -> String {
        wrap(&STANDARD.encode(bytes), LINE_LENGTH)
    }

    fn decode(&self, charset: Option<&str>, text: &str, context: Context) -> Result<String> {
        let bytes = self.decode_to_bytes(charset, text, context)?;
        Ok(charset::decode_bytes(charset, &bytes).into_owned())
    }

    fn decode_to_bytes(
        &self,
        _charset: Option<&str>,
        text: &str,
        _context: Context,
    ) -> Result<Vec<u8>> {
        let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        Ok(STANDARD.decode(cleaned)?)
    }
}

/// Hard-wraps text every `width` characters with CRLF.
///
/// No line break is added after the last line. A `width` of zero leaves the
/// text unchanged.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + (text.len() / width + 1) * 2);
    for (index, ch) in text.chars().enumerate() {
        if index > 0 && index % width == 0 {
            result.push_str("\r\n");
        }
        result.push(ch);
    }
    result
}
