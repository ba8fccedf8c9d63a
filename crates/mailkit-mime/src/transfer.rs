//! Content-Transfer-Encoding header values.

use std::fmt;

use mailkit_codec::EncoderKind;

/// Transfer encoding declared by a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransferEncoding {
    /// `quoted-printable`.
    QuotedPrintable,
    /// `base64`.
    Base64,
    /// `8Bit`.
    EightBit,
    /// `7Bit`.
    SevenBit,
    /// Missing or unrecognized; the raw token is kept.
    Unknown(String),
}

impl Default for TransferEncoding {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl TransferEncoding {
    /// Parses a transfer encoding token, case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("quoted-printable") {
            Self::QuotedPrintable
        } else if token.eq_ignore_ascii_case("base64") {
            Self::Base64
        } else if token.eq_ignore_ascii_case("8bit") {
            Self::EightBit
        } else if token.eq_ignore_ascii_case("7bit") {
            Self::SevenBit
        } else {
            Self::Unknown(token.to_string())
        }
    }

    /// Returns the canonical token, or the raw one for unknown encodings.
    #[must_use]
    pub fn definition(&self) -> &str {
        match self {
            Self::QuotedPrintable => "quoted-printable",
            Self::Base64 => "base64",
            Self::EightBit => "8Bit",
            Self::SevenBit => "7Bit",
            Self::Unknown(token) => token,
        }
    }

    /// Returns the codec kind that decodes this encoding.
    #[must_use]
    pub fn encoder_kind(&self) -> EncoderKind {
        EncoderKind::from_token(self.definition())
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition())
    }
}
