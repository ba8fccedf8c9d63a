//! Codec selection by transfer-encoding token.

use std::fmt;

use crate::base64::BASE64;
use crate::codec::Codec;
use crate::passthrough::{EIGHT_BIT, IDENTITY, SEVEN_BIT};
use crate::quoted_printable::QUOTED_PRINTABLE;

/// Available codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncoderKind {
    /// No transformation.
    #[default]
    Identity,
    /// `7bit`.
    SevenBit,
    /// `8bit`.
    EightBit,
    /// `base64`.
    Base64,
    /// `quoted-printable`.
    QuotedPrintable,
    /// An unrecognized token.
    Unknown,
}

impl EncoderKind {
    /// Maps a transfer-encoding token to a codec kind.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. An
    /// empty token means no encoding; `QP` is accepted as a short form.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            Self::Identity
        } else if token.eq_ignore_ascii_case("7bit") {
            Self::SevenBit
        } else if token.eq_ignore_ascii_case("8bit") {
            Self::EightBit
        } else if token.eq_ignore_ascii_case("quoted-printable") || token.eq_ignore_ascii_case("qp")
        {
            Self::QuotedPrintable
        } else if token.eq_ignore_ascii_case("base64") {
            Self::Base64
        } else {
            Self::Unknown
        }
    }

    /// Returns the codec for this kind.
    ///
    /// Unknown kinds fall back to the identity codec.
    #[must_use]
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Identity => &IDENTITY,
            Self::SevenBit => &SEVEN_BIT,
            Self::EightBit => &EIGHT_BIT,
            Self::Base64 => &BASE64,
            Self::QuotedPrintable => &QUOTED_PRINTABLE,
            Self::Unknown => {
                tracing::warn!("Unknown transfer encoding, content left unchanged");
                &IDENTITY
            }
        }
    }

    /// Returns the canonical token, empty for identity and unknown.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity | Self::Unknown => "",
            Self::SevenBit => "7bit",
            Self::EightBit => "8bit",
            Self::Base64 => "base64",
            Self::QuotedPrintable => "quoted-printable",
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
