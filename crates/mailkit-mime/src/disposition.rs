//! Content-Disposition header values.

use std::path::Path;

/// Disposition kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DispositionKind {
    /// Not declared.
    #[default]
    Unknown,
    /// `inline`.
    Inline,
    /// `attachment`.
    Attachment,
    /// Any other token, kept verbatim.
    Other(String),
}

impl DispositionKind {
    /// Parses a disposition token, case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            Self::Unknown
        } else if token.eq_ignore_ascii_case("inline") {
            Self::Inline
        } else if token.eq_ignore_ascii_case("attachment") {
            Self::Attachment
        } else {
            Self::Other(token.to_string())
        }
    }

    /// Returns the canonical token, or the raw one for other kinds.
    #[must_use]
    pub fn definition(&self) -> &str {
        match self {
            Self::Unknown => "",
            Self::Inline => "inline",
            Self::Attachment => "attachment",
            Self::Other(token) => token,
        }
    }
}

/// Content disposition of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDisposition {
    /// Disposition kind.
    pub kind: DispositionKind,
    /// `filename` parameter, or the file to read for outbound attachments.
    pub file_name: Option<String>,
}

impl ContentDisposition {
    /// Creates an attachment disposition for a file.
    #[must_use]
    pub fn attachment(file_name: impl Into<String>) -> Self {
        Self {
            kind: DispositionKind::Attachment,
            file_name: Some(file_name.into()),
        }
    }

    /// Checks if the section is an attachment.
    #[must_use]
    pub const fn is_attachment(&self) -> bool {
        matches!(self.kind, DispositionKind::Attachment)
    }

    /// Returns the file name without directories.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        let file_name = self.file_name.as_deref()?;
        Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .or(Some(file_name))
    }

    /// Media type derived from the file name extension.
    ///
    /// Falls back to `application/octet-stream`.
    #[must_use]
    pub fn media_type(&self) -> &'static str {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map_or(OCTET_STREAM, media_type_for_extension)
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("7z", "application/x-7z-compressed"),
    ("avi", "video/x-msvideo"),
    ("bmp", "image/bmp"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("eml", "message/rfc822"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ics", "text/calendar"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("rtf", "application/rtf"),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("txt", "text/plain"),
    ("wav", "audio/wav"),
    ("webp", "image/webp"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
];

fn media_type_for_extension(extension: &str) -> &'static str {
    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(OCTET_STREAM, |&(_, media_type)| media_type)
}
