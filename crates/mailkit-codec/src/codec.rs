//! The codec contract shared by every transfer encoding.

use crate::error::Result;

/// Where an encoded value lives.
///
/// Header values (Subject, display names, file names) follow RFC 2047
/// encoded-word rules for quoted-printable; body content follows RFC 2045.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Context {
    /// Body content.
    #[default]
    Body,
    /// A header field value.
    Header,
}

impl Context {
    /// Returns true for header values.
    #[must_use]
    pub const fn is_header(self) -> bool {
        matches!(self, Self::Header)
    }
}

/// A content-transfer-encoding implementation.
///
/// `charset` names the character set of the decoded text (`None` means
/// UTF-8). Encoding never fails; decoding fails only where the encoding is
/// strict (base64).
pub trait Codec: Send + Sync {
    /// Encodes text.
    fn encode(&self, charset: Option<&str>, text: &str, context: Context) -> String;

    /// Encodes raw bytes.
    fn encode_bytes(&self, charset: Option<&str>, bytes: &[u8], context: Context) -> String;

    /// Decodes encoded text into text.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid for this encoding.
    fn decode(&self, charset: Option<&str>, text: &str, context: Context) -> Result<String>;

    /// Decodes encoded text into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid for this encoding.
    fn decode_to_bytes(&self, charset: Option<&str>, text: &str, context: Context)
    -> Result<Vec<u8>>;
}
