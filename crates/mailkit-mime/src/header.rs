//! MIME header handling.

use std::fmt;

use crate::parser::{LineReader, read_headers};

/// Well-known header and parameter names.
pub mod names {
    /// Placeholder name for a parameter without `=`.
    pub const UNDEFINED: &str = "Undefined";
    /// `From`.
    pub const FROM: &str = "From";
    /// `Reply-To`.
    pub const REPLY_TO: &str = "Reply-To";
    /// `To`.
    pub const TO: &str = "To";
    /// `CC`.
    pub const CC: &str = "CC";
    /// `BCC`.
    pub const BCC: &str = "BCC";
    /// `Subject`.
    pub const SUBJECT: &str = "Subject";
    /// `Date`.
    pub const DATE: &str = "Date";
    /// `MIME-Version`.
    pub const MIME_VERSION: &str = "MIME-Version";
    /// `Message-ID`.
    pub const MESSAGE_ID: &str = "Message-ID";
    /// `Content-Type`.
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// `Content-Transfer-Encoding`.
    pub const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";
    /// `Content-Disposition`.
    pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
    /// `Content-ID`.
    pub const CONTENT_ID: &str = "Content-ID";
    /// `X-Mailer`.
    pub const X_MAILER: &str = "X-Mailer";
    /// `boundary` parameter.
    pub const BOUNDARY: &str = "boundary";
    /// `charset` parameter.
    pub const CHARSET: &str = "charset";
    /// `name` parameter.
    pub const NAME: &str = "name";
    /// `filename` parameter.
    pub const FILENAME: &str = "filename";
}

/// A header field with its `;`-separated parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Field name.
    pub name: String,
    /// Field value, without parameters.
    pub value: String,
    /// Parameters as sub-headers, in order.
    pub params: Headers,
}

impl Header {
    /// Creates a header without parameters. Name and value are trimmed.
    #[must_use]
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            value: value.as_ref().trim().to_string(),
            params: Headers::new(),
        }
    }

    /// Looks up a value by name, case-insensitively.
    ///
    /// Returns the header's own value if its name matches, otherwise the
    /// value of the first matching parameter.
    #[must_use]
    pub fn search_value(&self, name: &str) -> Option<&str> {
        if self.name.eq_ignore_ascii_case(name) {
            Some(&self.value)
        } else {
            self.params.get(name)
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        for param in &self.params {
            write!(f, "; {}={}", param.name, param.value)?;
        }
        Ok(())
    }
}

/// Ordered collection of headers.
///
/// Lookups are case-insensitive and return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<Header>);

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a header without parameters.
    pub fn add(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        self.0.push(Header::new(name, value));
    }

    /// Appends a header.
    pub fn push(&mut self, header: Header) {
        self.0.push(header);
    }

    /// Returns the first header with this name.
    #[must_use]
    pub fn search(&self, name: &str) -> Option<&Header> {
        self.0.iter().find(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if a header with this name exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.search(name).is_some()
    }

    /// Gets the value of the first header with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.search(name).map(|h| h.value.as_str())
    }

    /// Gets the values of every header with this name.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
            .collect()
    }

    /// Removes every header with this name.
    pub fn remove(&mut self, name: &str) {
        self.0.retain(|h| !h.name.eq_ignore_ascii_case(name));
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the headers.
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.0.iter()
    }

    /// Parses a standalone header block.
    ///
    /// Folded lines are joined, parameters are split into sub-headers and
    /// parsing stops at the first blank line.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        read_headers(&mut LineReader::new(text))
    }
}

impl Extend<Header> for Headers {
    fn extend<I: IntoIterator<Item = Header>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
