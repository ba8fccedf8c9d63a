//! # mailkit-codec
//!
//! Content-transfer-encoding codecs for email.
//!
//! ## Features
//!
//! - **Quoted-Printable**: RFC 2045 bodies with soft line breaks
//! - **Base64**: wrapped at 76 characters, whitespace-tolerant decoding
//! - **Encoded words**: RFC 2047 `Q` encoding and `Q`/`B` decoding for headers
//! - **Passthrough**: identity, `7bit` and `8bit`
//! - **Charsets**: any label known to `encoding_rs`
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailkit_codec::{Context, EncoderKind};
//!
//! let codec = EncoderKind::from_token("quoted-printable").codec();
//! let encoded = codec.encode(Some("utf-8"), "Café", Context::Body);
//! assert_eq!(encoded, "Caf=C3=A9");
//!
//! let subject = codec.encode(Some("utf-8"), "Café", Context::Header);
//! assert_eq!(subject, "=?utf-8?Q?Caf=C3=A9?=");
//! ```
//!
//! ### Attachments
//!
//! ```ignore
//! use mailkit_codec::{file, EncoderKind};
//!
//! let encoded = file::encode_file_to_base64("report.pdf")?;
//! file::decode_to_file(EncoderKind::Base64, None, &encoded, "copy.pdf")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod base64;
mod codec;
mod error;
mod kind;
mod passthrough;
mod quoted_printable;

pub mod charset;
pub mod encoded_word;
pub mod file;

pub use crate::base64::{BASE64, Base64, LINE_LENGTH, wrap};
pub use codec::{Codec, Context};
pub use error::{Error, Result};
pub use kind::EncoderKind;
pub use passthrough::{EIGHT_BIT, IDENTITY, Passthrough, SEVEN_BIT};
pub use quoted_printable::{QUOTED_PRINTABLE, QuotedPrintable};

/// Encodes text with the codec for `kind`.
#[must_use]
pub fn encode(kind: EncoderKind, charset: Option<&str>, text: &str, context: Context) -> String {
    kind.codec().encode(charset, text, context)
}

/// Decodes text with the codec for `kind`.
///
/// # Errors
///
/// Returns an error if the input is not valid for the codec.
pub fn decode(
    kind: EncoderKind,
    charset: Option<&str>,
    text: &str,
    context: Context,
) -> Result<String> {
    kind.codec().decode(charset, text, context)
}

/// Decodes text into raw bytes with the codec for `kind`.
///
/// # Errors
///
/// Returns an error if the input is not valid for the codec.
pub fn decode_to_bytes(
    kind: EncoderKind,
    charset: Option<&str>,
    text: &str,
    context: Context,
) -> Result<Vec<u8>> {
    kind.codec().decode_to_bytes(charset, text, context)
}
