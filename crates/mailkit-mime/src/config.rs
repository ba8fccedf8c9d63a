//! Options for serializing messages.

use mailkit_codec::charset::DEFAULT_CHARSET;

/// Product name written to the `X-Mailer` header by default.
pub const DEFAULT_MAILER: &str = "mailkit";

/// Options used by [`crate::MimeMessage::to_mime_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CreateOptions {
    /// Charset for text parts and attachment parameters.
    pub charset: String,
    /// Value of the `X-Mailer` header.
    pub mailer: String,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            mailer: DEFAULT_MAILER.to_string(),
        }
    }
}

impl CreateOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Sets the `X-Mailer` value.
    #[must_use]
    pub fn with_mailer(mut self, mailer: impl Into<String>) -> Self {
        self.mailer = mailer.into();
        self
    }
}
