//! MIME content type handling.

use std::fmt;

/// Kind of content carried by a section.
///
/// Unrecognized types keep their original definition string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    /// No content type declared.
    #[default]
    Unknown,
    /// Legacy `base64` pseudo type used for attachments.
    Base64,
    /// `text/html`.
    Html,
    /// `multipart/alternative`.
    MultipartAlternative,
    /// `multipart/mixed`.
    MultipartMixed,
    /// `multipart/related`.
    MultipartRelated,
    /// `multipart/report`.
    MultipartReport,
    /// Any other `multipart/*` type.
    Multipart(String),
    /// `application/octet-stream`.
    OctetStream,
    /// `text/plain`.
    Text,
    /// Anything else.
    Other(String),
}

impl MediaKind {
    /// Maps a type definition (e.g. `text/plain`) to a kind.
    #[must_use]
    pub fn parse(definition: &str) -> Self {
        let definition = definition.trim();
        let is = |token: &str| definition.eq_ignore_ascii_case(token);

        if definition.is_empty() {
            Self::Unknown
        } else if is("base64") {
            Self::Base64
        } else if is("text/html") {
            Self::Html
        } else if is("multipart/alternative") {
            Self::MultipartAlternative
        } else if is("multipart/mixed") {
            Self::MultipartMixed
        } else if is("multipart/related") {
            Self::MultipartRelated
        } else if is("multipart/report") {
            Self::MultipartReport
        } else if definition
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("multipart"))
        {
            Self::Multipart(definition.to_string())
        } else if is("application/octet-stream") {
            Self::OctetStream
        } else if is("text/plain") {
            Self::Text
        } else {
            Self::Other(definition.to_string())
        }
    }

    /// Returns the canonical token, or the preserved original definition.
    #[must_use]
    pub fn definition(&self) -> &str {
        match self {
            Self::Unknown => "",
            Self::Base64 => "base64",
            Self::Html => "text/html",
            Self::MultipartAlternative => "multipart/alternative",
            Self::MultipartMixed => "multipart/mixed",
            Self::MultipartRelated => "multipart/related",
            Self::MultipartReport => "multipart/report",
            Self::OctetStream => "application/octet-stream",
            Self::Text => "text/plain",
            Self::Multipart(definition) | Self::Other(definition) => definition,
        }
    }

    /// Checks if this is any multipart kind.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(
            self,
            Self::MultipartAlternative
                | Self::MultipartMixed
                | Self::MultipartRelated
                | Self::MultipartReport
                | Self::Multipart(_)
        )
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition())
    }
}

/// MIME content type with its common parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentType {
    /// Media kind.
    pub kind: MediaKind,
    /// `charset` parameter.
    pub charset: Option<String>,
    /// `boundary` parameter.
    pub boundary: Option<String>,
    /// `name` parameter.
    pub name: Option<String>,
}

impl ContentType {
    /// Creates a content type without parameters.
    #[must_use]
    pub const fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            charset: None,
            boundary: None,
            name: None,
        }
    }

    /// Sets the charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the boundary.
    #[must_use]
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Returns the type definition string.
    #[must_use]
    pub fn definition(&self) -> &str {
        self.kind.definition()
    }

    /// Checks if this is a multipart content type.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        self.kind.is_multipart()
    }

    /// Returns the charset parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition())?;
        if let Some(charset) = &self.charset {
            write!(f, "; charset={charset}")?;
        }
        if let Some(boundary) = &self.boundary {
            write!(f, "; boundary=\"{boundary}\"")?;
        }
        if let Some(name) = &self.name {
            write!(f, "; name=\"{name}\"")?;
        }
        Ok(())
    }
}
