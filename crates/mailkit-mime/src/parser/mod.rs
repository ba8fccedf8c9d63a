//! Recursive MIME parser.
//!
//! The parser walks the raw text once, top-down: it reads the message
//! headers, resolves the root section (recursing into multipart children)
//! and finally normalizes the tree into the message's body, HTML body and
//! attachments.

mod headers;
mod lines;

pub use headers::read_headers;
pub use lines::LineReader;

use crate::content_type::MediaKind;
use crate::error::{Error, Result};
use crate::message::MimeMessage;
use crate::section::Section;
use crate::token;
use crate::transfer::TransferEncoding;

/// Multipart nesting deeper than this is kept as opaque content.
const MAX_NESTING: usize = 64;

/// Parses a raw RFC 822 / MIME message.
///
/// # Errors
///
/// Returns a structural error if a multipart section has no boundary or its
/// opening boundary line is missing, or a codec error if the body or HTML
/// body cannot be decoded.
pub fn parse(text: &str) -> Result<MimeMessage> {
    let mut reader = LineReader::new(text);
    let message_headers = read_headers(&mut reader);

    let mut message = MimeMessage::default();
    headers::apply_to_message(&mut message, &message_headers);
    if message.id.is_empty() {
        message.id = token::unique_id();
    }

    let mut root = Section::new();
    headers::apply_to_section(&mut root, &message_headers);
    root.headers = message_headers.clone();
    message.headers = message_headers;

    let mut parser = Parser {
        reader,
        boundaries: Vec::new(),
    };
    parser.resolve(&mut root)?;

    let mut normalizer = Normalizer::default();
    normalizer.visit(&mut message, &root)?;
    message.root = root;

    tracing::debug!(
        sections = message.root.sections.len(),
        attachments = message.attachments.len(),
        has_text = !message.body.is_empty(),
        has_html = !message.body_html.is_empty(),
        "Parsed message"
    );

    Ok(message)
}

/// Where a line sits relative to a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Open,
    Close,
}

/// Classifies `line` against `boundary`: `--b` opens, `--b--` closes.
fn delimiter(line: &str, boundary: &str) -> Option<Delimiter> {
    let rest = line.trim_end().strip_prefix("--")?.strip_prefix(boundary)?;
    match rest {
        "" => Some(Delimiter::Open),
        "--" => Some(Delimiter::Close),
        _ => None,
    }
}

struct Parser<'a> {
    reader: LineReader<'a>,
    /// Boundaries of the enclosing multipart sections, innermost last.
    boundaries: Vec<String>,
}

/// Checks if `line` opens or closes any of `boundaries`.
fn is_boundary_line(boundaries: &[String], line: &str) -> bool {
    boundaries.iter().any(|b| delimiter(line, b).is_some())
}

impl Parser<'_> {
    fn is_boundary_line(&self, line: &str) -> bool {
        is_boundary_line(&self.boundaries, line)
    }

    fn resolve(&mut self, section: &mut Section) -> Result<()> {
        if !section.content_type.is_multipart() {
            section.content = self.read_content();
            return Ok(());
        }

        if self.boundaries.len() >= MAX_NESTING {
            tracing::warn!(depth = self.boundaries.len(), "Multipart nesting too deep");
            section.content = self.read_content();
            return Ok(());
        }

        let boundary = section
            .content_type
            .boundary()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or(Error::MissingBoundary)?
            .to_string();

        self.skip_preamble(&boundary)?;

        self.boundaries.push(boundary);
        let result = self.read_children(section);
        self.boundaries.pop();
        result
    }

    /// Consumes lines up to and including the opening boundary.
    fn skip_preamble(&mut self, boundary: &str) -> Result<()> {
        while let Some(line) = self.reader.read_line() {
            if delimiter(line, boundary) == Some(Delimiter::Open) {
                return Ok(());
            }
            if self.is_boundary_line(line) {
                break;
            }
        }
        Err(Error::BoundaryNotFound(boundary.to_string()))
    }

    fn read_children(&mut self, parent: &mut Section) -> Result<()> {
        let Some(boundary) = self.boundaries.last().cloned() else {
            return Ok(());
        };

        loop {
            let mut child = Section::new();
            let boundaries = &self.boundaries;
            let child_headers = headers::read_headers_until(&mut self.reader, |line| {
                is_boundary_line(boundaries, line)
            });
            headers::apply_to_section(&mut child, &child_headers);
            child.headers = child_headers;

            self.resolve(&mut child)?;
            parent.sections.push(child);

            // Epilogue of a nested multipart
            self.skip_to_boundary();

            let Some(line) = self.reader.peek_line() else {
                tracing::debug!(boundary = %boundary, "Multipart ends without closing boundary");
                break;
            };
            match delimiter(line, &boundary) {
                Some(Delimiter::Open) => {
                    self.reader.read_line();
                }
                Some(Delimiter::Close) => {
                    self.reader.read_line();
                    break;
                }
                None => {
                    // An enclosing boundary closes this multipart implicitly
                    tracing::debug!(boundary = %boundary, "Multipart closed by enclosing boundary");
                    break;
                }
            }
        }

        tracing::debug!(
            boundary = %boundary,
            children = parent.sections.len(),
            "Parsed multipart section"
        );
        Ok(())
    }

    /// Reads lines up to, not including, the next boundary line.
    fn read_content(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(line) = self.reader.peek_line() {
            if self.is_boundary_line(line) {
                break;
            }
            lines.push(line);
            self.reader.read_line();
        }
        lines.join("\r\n")
    }

    fn skip_to_boundary(&mut self) {
        while let Some(line) = self.reader.peek_line() {
            if self.is_boundary_line(line) {
                break;
            }
            tracing::trace!(line, "Skipping epilogue line");
            self.reader.read_line();
        }
    }
}

/// Picks the body, HTML body and attachments out of a section tree.
#[derive(Default)]
struct Normalizer {
    has_text: bool,
    has_html: bool,
}

impl Normalizer {
    fn visit(&mut self, message: &mut MimeMessage, section: &Section) -> Result<()> {
        if section.disposition.is_attachment() {
            message.attachments.push(section.clone());
        } else if section.sections.is_empty() {
            match section.content_type.kind {
                MediaKind::Text | MediaKind::Unknown if !self.has_text => {
                    message.body = decoded(section)?;
                    self.has_text = true;
                }
                MediaKind::Html if !self.has_html => {
                    message.body_html = decoded(section)?;
                    self.has_html = true;
                }
                _ => {}
            }
        }

        for child in &section.sections {
            self.visit(message, child)?;
        }
        Ok(())
    }
}

/// Copies a section with its content decoded to plain text.
fn decoded(section: &Section) -> Result<Section> {
    let mut body = section.clone();
    body.content = section.decoded_text()?;
    body.transfer_encoding = TransferEncoding::default();
    Ok(body)
}
