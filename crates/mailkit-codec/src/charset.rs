//! Charset conversion between Rust strings and wire bytes.
//!
//! Labels are resolved through `encoding_rs` (WHATWG label set). A missing
//! label means UTF-8; an unknown one falls back to UTF-8 as well.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

/// Charset used when none is declared.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Resolves a charset label to an encoding.
#[must_use]
pub fn resolve(label: Option<&str>) -> &'static Encoding {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return UTF_8;
    };

    Encoding::for_label_no_replacement(label.as_bytes()).unwrap_or_else(|| {
        tracing::warn!(charset = label, "Unknown charset, falling back to UTF-8");
        UTF_8
    })
}

/// Converts text into bytes of the given charset.
///
/// Characters the charset cannot represent become numeric character
/// references, as `encoding_rs` does for legacy encoders.
#[must_use]
pub fn encode_text<'a>(label: Option<&str>, text: &'a str) -> Cow<'a, [u8]> {
    let (bytes, _, _) = resolve(label).encode(text);
    bytes
}

/// Converts bytes in the given charset into text.
///
/// Malformed sequences are replaced with U+FFFD.
#[must_use]
pub fn decode_bytes<'a>(label: Option<&str>, bytes: &'a [u8]) -> Cow<'a, str> {
    let (text, _) = resolve(label).decode_without_bom_handling(bytes);
    text
}
