//! MIME message structure.

use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::address::{Address, Addresses};
use crate::config::CreateOptions;
use crate::content_type::{ContentType, MediaKind};
use crate::creator;
use crate::error::Result;
use crate::header::Headers;
use crate::parser;
use crate::section::{Section, Sections};
use crate::token;
use crate::transfer::TransferEncoding;

/// An email message.
///
/// Parsed messages keep the full section tree in [`MimeMessage::root`] and
/// expose the first plain text part, the first HTML part and every
/// attachment as views over it. Text and HTML bodies hold decoded content;
/// attachments keep their content encoded.
///
/// Outbound messages set `body`, `body_html` and `attachments` directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeMessage {
    /// Message identifier (`Message-ID` when parsed).
    pub id: String,
    /// Sender.
    pub from: Option<Address>,
    /// Reply address.
    pub reply_to: Option<Address>,
    /// Primary recipients.
    pub to: Addresses,
    /// Carbon copy recipients.
    pub cc: Addresses,
    /// Blind carbon copy recipients.
    pub bcc: Addresses,
    /// Subject, decoded.
    pub subject: String,
    /// `MIME-Version` header value.
    pub mime_version: Option<String>,
    /// Date the message was written.
    pub date: Option<DateTime<FixedOffset>>,
    /// Top-level content type.
    pub content_type: ContentType,
    /// Top-level transfer encoding.
    pub transfer_encoding: TransferEncoding,
    /// Top-level charset.
    pub charset: Option<String>,
    /// Every top-level header, in order. When serializing, headers the
    /// creator writes itself are skipped and the rest are emitted as extra
    /// headers.
    pub headers: Headers,
    /// Plain text body.
    pub body: Section,
    /// HTML body.
    pub body_html: Section,
    /// Attachments.
    pub attachments: Sections,
    /// Parsed section tree.
    pub root: Section,
}

impl MimeMessage {
    /// Creates an empty message with a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: token::unique_id(),
            ..Self::default()
        }
    }

    /// Parses a raw message.
    ///
    /// # Errors
    ///
    /// Returns a structural error for malformed multipart boundaries or a
    /// codec error if the body cannot be decoded.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// Serializes the message with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if an attachment cannot be read or decoded.
    pub fn to_mime(&self) -> Result<String> {
        self.to_mime_with(&CreateOptions::default())
    }

    /// Serializes the message.
    ///
    /// # Errors
    ///
    /// Returns an error if an attachment cannot be read or decoded.
    pub fn to_mime_with(&self, options: &CreateOptions) -> Result<String> {
        creator::create(self, options)
    }

    /// Sets the plain text body.
    pub fn set_body_text(&mut self, text: impl Into<String>) {
        self.body = Section::with_content(MediaKind::Text, text);
    }

    /// Sets the HTML body.
    pub fn set_body_html(&mut self, html: impl Into<String>) {
        self.body_html = Section::with_content(MediaKind::Html, html);
    }

    /// Adds a file attachment. The file is read when serializing.
    pub fn attach(&mut self, path: impl AsRef<Path>) {
        self.attachments.add_file(path);
    }

    /// Returns the plain text body.
    #[must_use]
    pub fn body_text(&self) -> &str {
        &self.body.content
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn body_html_text(&self) -> &str {
        &self.body_html.content
    }

    /// Checks if the message has attachments.
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_id() {
        let message = MimeMessage::new();
        assert!(!message.id.is_empty());
        assert_ne!(MimeMessage::new().id, message.id);
    }

    #[test]
    fn test_setters() {
        let mut message = MimeMessage::new();
        message.set_body_text("plain");
        message.set_body_html("<p>html</p>");
        message.attach("files/report.pdf");

        assert_eq!(message.body_text(), "plain");
        assert_eq!(message.body.content_type.kind, MediaKind::Text);
        assert_eq!(message.body_html_text(), "<p>html</p>");
        assert_eq!(message.body_html.content_type.kind, MediaKind::Html);
        assert!(message.has_attachments());
        assert_eq!(
            message.attachments.get(0).and_then(|a| a.disposition.base_name()),
            Some("report.pdf")
        );
    }
}
