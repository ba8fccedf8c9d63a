//! MIME sections (body parts) and section lists.

use std::path::Path;
use std::sync::OnceLock;

use mailkit_codec::{Context, file};

use crate::content_type::{ContentType, MediaKind};
use crate::disposition::ContentDisposition;
use crate::error::Result;
use crate::header::Headers;
use crate::token;
use crate::transfer::TransferEncoding;

/// One MIME body part.
///
/// Multipart sections own their children in [`Section::sections`]; leaf
/// sections carry their still-encoded `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    id: OnceLock<String>,
    /// Content type.
    pub content_type: ContentType,
    /// Content disposition.
    pub disposition: ContentDisposition,
    /// Transfer encoding of `content`.
    pub transfer_encoding: TransferEncoding,
    /// Raw content, lines joined with CRLF.
    pub content: String,
    /// Headers as read from the wire.
    pub headers: Headers,
    /// Child sections, in order.
    pub sections: Sections,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text section of the given kind with unencoded content.
    #[must_use]
    pub fn with_content(kind: MediaKind, content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::new(kind),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Creates an outbound attachment for a file.
    ///
    /// The file is read when the message is serialized.
    #[must_use]
    pub fn attachment(path: impl AsRef<Path>) -> Self {
        let disposition = ContentDisposition::attachment(path.as_ref().to_string_lossy());
        let mut content_type = ContentType::new(MediaKind::parse(disposition.media_type()));
        content_type.name = disposition.base_name().map(ToString::to_string);

        Self {
            content_type,
            disposition,
            transfer_encoding: TransferEncoding::Base64,
            ..Self::default()
        }
    }

    /// Returns the section identifier, generating one on first use.
    pub fn id(&self) -> &str {
        self.id.get_or_init(token::unique_id)
    }

    /// Overrides the section identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = OnceLock::from(id.into());
    }

    /// Returns the declared charset, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.content_type.charset()
    }

    /// Checks if the section has no content and no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.sections.is_empty()
    }

    /// Decodes the content into raw bytes through its transfer encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is invalid for its encoding.
    pub fn decode_to_bytes(&self) -> Result<Vec<u8>> {
        let codec = self.transfer_encoding.encoder_kind().codec();
        Ok(codec.decode_to_bytes(self.charset(), &self.content, Context::Body)?)
    }

    /// Decodes the content into text through its transfer encoding and
    /// charset.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is invalid for its encoding.
    pub fn decoded_text(&self) -> Result<String> {
        let codec = self.transfer_encoding.encoder_kind().codec();
        Ok(codec.decode(self.charset(), &self.content, Context::Body)?)
    }

    /// Writes the decoded content to a new file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists, the content cannot be
    /// decoded, or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        file::decode_to_file(
            self.transfer_encoding.encoder_kind(),
            self.charset(),
            &self.content,
            path,
        )?;
        Ok(())
    }
}

/// Ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) {
        self.0.push(section);
    }

    /// Appends an attachment section for a file.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.0.push(Section::attachment(path));
    }

    /// Finds every section of a kind, depth-first, children included.
    #[must_use]
    pub fn search_kind(&self, kind: &MediaKind) -> Vec<&Section> {
        let mut found = Vec::new();
        self.collect_kind(kind, &mut found);
        found
    }

    fn collect_kind<'a>(&'a self, kind: &MediaKind, found: &mut Vec<&'a Section>) {
        for section in &self.0 {
            if section.content_type.kind == *kind {
                found.push(section);
            }
            section.sections.collect_kind(kind, found);
        }
    }

    /// Finds a section by identifier, case-insensitively, depth-first.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Section> {
        self.0.iter().find_map(|section| {
            if section.id().eq_ignore_ascii_case(id) {
                Some(section)
            } else {
                section.sections.find(id)
            }
        })
    }

    /// Returns the section at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.0.get(index)
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the sections.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }
}

impl Extend<Section> for Sections {
    fn extend<I: IntoIterator<Item = Section>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Section> for Sections {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Sections {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn encoded(encoding: TransferEncoding, charset: Option<&str>, content: &str) -> Section {
        let mut section = Section::with_content(MediaKind::Text, content);
        section.transfer_encoding = encoding;
        section.content_type.charset = charset.map(ToString::to_string);
        section
    }

    #[test]
    fn test_id_is_stable() {
        let section = Section::new();
        let id = section.id().to_string();
        assert!(!id.is_empty());
        assert_eq!(section.id(), id);
        assert_ne!(Section::new().id(), id);
    }

    #[test]
    fn test_set_id() {
        let mut section = Section::new();
        section.set_id("part-1@example.com");
        assert_eq!(section.id(), "part-1@example.com");
    }

    #[test]
    fn test_attachment() {
        let section = Section::attachment("/tmp/files/report.pdf");
        assert!(section.disposition.is_attachment());
        assert_eq!(section.transfer_encoding, TransferEncoding::Base64);
        assert_eq!(section.content_type.definition(), "application/pdf");
        assert_eq!(section.content_type.name.as_deref(), Some("report.pdf"));
        assert!(section.content.is_empty());
    }

    #[test]
    fn test_decoded_text() {
        let section = encoded(TransferEncoding::QuotedPrintable, Some("utf-8"), "Caf=C3=A9");
        assert_eq!(section.decoded_text().unwrap(), "Café");

        let section = encoded(TransferEncoding::Base64, None, "SGVsbG8=");
        assert_eq!(section.decode_to_bytes().unwrap(), b"Hello");

        let section = encoded(TransferEncoding::default(), None, "as is =41");
        assert_eq!(section.decoded_text().unwrap(), "as is =41");
    }

    #[test]
    fn test_decode_invalid_base64() {
        let section = encoded(TransferEncoding::Base64, None, "@@@");
        assert!(matches!(section.decode_to_bytes(), Err(Error::Codec(_))));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.bin");

        let section = encoded(TransferEncoding::Base64, None, "AAEC\r\n/w==");
        section.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0, 1, 2, 255]);

        // Never overwrites
        let result = section.save(&path);
        assert!(matches!(
            result,
            Err(Error::Codec(mailkit_codec::Error::AlreadyExists(_)))
        ));
    }

    #[test]
    fn test_save_passthrough_uses_charset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");

        let section = encoded(TransferEncoding::EightBit, Some("iso-8859-1"), "Café");
        section.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"Caf\xe9");
    }

    #[test]
    fn test_search_kind_recursive() {
        let mut inner = Section::with_content(MediaKind::MultipartAlternative, "");
        inner.sections.push(Section::with_content(MediaKind::Text, "plain"));
        inner.sections.push(Section::with_content(MediaKind::Html, "<p>html</p>"));

        let mut sections = Sections::new();
        sections.push(Section::with_content(MediaKind::Text, "first"));
        sections.push(inner);

        let texts = sections.search_kind(&MediaKind::Text);
        let contents: Vec<&str> = texts.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "plain"]);
        assert_eq!(sections.search_kind(&MediaKind::Html).len(), 1);
    }

    #[test]
    fn test_find() {
        let mut child = Section::new();
        child.set_id("Child-Id");
        let mut parent = Section::new();
        parent.set_id("parent");
        parent.sections.push(child);

        let mut sections = Sections::new();
        sections.push(parent);
        sections.add_file("a.txt");

        assert_eq!(sections.find("child-id").unwrap().id(), "Child-Id");
        assert!(sections.find("parent").is_some());
        assert!(sections.find("missing").is_none());
        assert!(sections.get(1).unwrap().disposition.is_attachment());
    }
}
