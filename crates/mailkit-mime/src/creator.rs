//! MIME serialization.
//!
//! Produces CRLF-terminated RFC 822 / MIME text. Text parts are always
//! quoted-printable and attachments always base64, whatever the section
//! declared.

use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::Utc;
use mailkit_codec::{BASE64, Codec, Context, QUOTED_PRINTABLE};

use crate::address::Address;
use crate::config::CreateOptions;
use crate::content_type::MediaKind;
use crate::error::{Error, Result};
use crate::header::names;
use crate::message::MimeMessage;
use crate::section::Section;
use crate::token::Boundaries;

const CRLF: &str = "\r\n";

/// Text placed before the first part of the outer multipart.
pub const PREAMBLE: &str = "This is a multi-part message in MIME format.";

/// Headers written from typed fields; never copied from `headers`.
const GENERATED: &[&str] = &[
    names::REPLY_TO,
    names::FROM,
    names::TO,
    names::CC,
    names::BCC,
    names::SUBJECT,
    names::DATE,
    names::X_MAILER,
    names::MIME_VERSION,
    names::CONTENT_TYPE,
    names::CONTENT_TRANSFER_ENCODING,
    names::CONTENT_DISPOSITION,
];

/// Serializes a message.
///
/// # Errors
///
/// Returns [`Error::Io`] if an attachment file cannot be read, or a codec
/// error if an attachment's own content cannot be decoded.
pub fn create(message: &MimeMessage, options: &CreateOptions) -> Result<String> {
    let charset = options.charset.as_str();
    let mut out = String::new();

    write_headers(&mut out, message, options);

    let text = message.body.content.as_str();
    let html = message.body_html.content.as_str();
    let boundaries = Boundaries::generate(&[text, html]);

    let readable = match (text.is_empty(), html.is_empty()) {
        (_, true) => text_part("plain", text, charset),
        (true, false) => text_part("html", html, charset),
        (false, false) => {
            let alternative = multipart(
                "alternative",
                &boundaries.alternative,
                None,
                &[text_part("plain", text, charset), text_part("html", html, charset)],
            );
            multipart("related", &boundaries.related, None, &[alternative])
        }
    };

    let entity = if message.attachments.is_empty() {
        readable
    } else {
        let mut parts = Vec::with_capacity(message.attachments.len() + 1);
        parts.push(readable);
        for attachment in &message.attachments {
            parts.push(attachment_part(attachment, charset)?);
        }
        multipart("mixed", &boundaries.mixed, Some(PREAMBLE), &parts)
    };

    out.push_str(&entity);
    out.push_str(CRLF);

    tracing::debug!(
        size = out.len(),
        attachments = message.attachments.len(),
        "Serialized message"
    );
    Ok(out)
}

fn write_headers(out: &mut String, message: &MimeMessage, options: &CreateOptions) {
    let charset = options.charset.as_str();

    let mut single = |name: &str, address: Option<&Address>| {
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            let _ = write!(out, "{name}: {}{CRLF}", format_address(address, charset));
        }
    };
    single(names::REPLY_TO, message.reply_to.as_ref());
    single(names::FROM, message.from.as_ref());

    for (name, list) in [
        (names::TO, &message.to),
        (names::CC, &message.cc),
        (names::BCC, &message.bcc),
    ] {
        let formatted: Vec<String> = list
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| format_address(a, charset))
            .collect();
        if !formatted.is_empty() {
            let _ = write!(out, "{name}: {}{CRLF}", formatted.join(", "));
        }
    }

    if !message.subject.is_empty() {
        let subject = QUOTED_PRINTABLE.encode(Some(charset), &message.subject, Context::Header);
        let _ = write!(out, "{}: {subject}{CRLF}", names::SUBJECT);
    }

    let date = message
        .date
        .map_or_else(Utc::now, |date| date.with_timezone(&Utc));
    let _ = write!(
        out,
        "{}: {}{CRLF}",
        names::DATE,
        date.format("%a, %d %b %Y %H:%M:%S GMT")
    );
    let _ = write!(out, "{}: {}{CRLF}", names::X_MAILER, options.mailer);

    for header in message
        .headers
        .iter()
        .filter(|h| !h.name.is_empty())
        .filter(|h| !GENERATED.iter().any(|g| g.eq_ignore_ascii_case(&h.name)))
    {
        let value = QUOTED_PRINTABLE.encode(Some(charset), &header.value, Context::Header);
        let _ = write!(out, "{}: {value}", header.name);
        for param in &header.params {
            if param.name == names::UNDEFINED {
                let _ = write!(out, "; {}", param.value);
            } else {
                let _ = write!(out, "; {}={}", param.name, param_value(&param.value));
            }
        }
        out.push_str(CRLF);
    }

    let _ = write!(out, "{}: 1.0{CRLF}", names::MIME_VERSION);
}

/// Formats `"Name" <addr>`, or `=?..?= <addr>` when the name needs encoding.
fn format_address(address: &Address, charset: &str) -> String {
    match address.name.as_deref().filter(|n| !n.is_empty()) {
        None => format!("<{}>", address.email),
        Some(name) => {
            let encoded = QUOTED_PRINTABLE.encode(Some(charset), name, Context::Header);
            if encoded == name {
                format!("{} <{}>", quoted(name), address.email)
            } else {
                format!("{encoded} <{}>", address.email)
            }
        }
    }
}

/// Wraps `text` in double quotes, escaping backslashes and quotes.
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A parameter value, quoted unless it is a bare RFC 2045 token.
fn param_value(value: &str) -> Cow<'_, str> {
    const TSPECIALS: &str = "()<>@,;:\\\"/[]?=";
    let is_token = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !TSPECIALS.contains(c));
    if is_token {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(quoted(value))
    }
}

/// A quoted-printable text part.
fn text_part(subtype: &str, content: &str, charset: &str) -> String {
    let encoded = QUOTED_PRINTABLE.encode(Some(charset), content, Context::Body);
    format!(
        "{}: text/{subtype};{CRLF} charset={charset}{CRLF}\
         {}: quoted-printable{CRLF}{CRLF}{encoded}",
        names::CONTENT_TYPE,
        names::CONTENT_TRANSFER_ENCODING,
    )
}

/// A multipart entity. Parts are separated by a single line break before
/// each boundary line; the result has no trailing line break.
fn multipart(subtype: &str, boundary: &str, preamble: Option<&str>, parts: &[String]) -> String {
    let mut out = format!(
        "{}: multipart/{subtype};{CRLF} boundary=\"{boundary}\"{CRLF}{CRLF}",
        names::CONTENT_TYPE
    );
    if let Some(preamble) = preamble {
        let _ = write!(out, "{preamble}{CRLF}{CRLF}");
    }
    for part in parts {
        let _ = write!(out, "--{boundary}{CRLF}{part}{CRLF}");
    }
    let _ = write!(out, "--{boundary}--");
    out
}

/// A base64 attachment part.
fn attachment_part(section: &Section, charset: &str) -> Result<String> {
    let bytes = attachment_bytes(section)?;

    let file_name = section
        .disposition
        .base_name()
        .or(section.content_type.name.as_deref())
        .unwrap_or("attachment");
    let encoded_name = quoted(&QUOTED_PRINTABLE.encode(Some(charset), file_name, Context::Header));
    let media_type = match &section.content_type.kind {
        MediaKind::Unknown | MediaKind::Base64 => section.disposition.media_type(),
        kind => kind.definition(),
    };

    tracing::debug!(file = file_name, size = bytes.len(), "Encoding attachment");

    Ok(format!(
        "{}: <{}>{CRLF}\
         {}: {media_type};{CRLF} charset={charset};{CRLF} name={encoded_name}{CRLF}\
         {}: base64{CRLF}\
         {}: attachment;{CRLF} filename={encoded_name}{CRLF}{CRLF}{}",
        names::CONTENT_ID,
        section.id(),
        names::CONTENT_TYPE,
        names::CONTENT_TRANSFER_ENCODING,
        names::CONTENT_DISPOSITION,
        BASE64.encode_bytes(None, &bytes, Context::Body),
    ))
}

/// Attachment bytes: the section's own content when present, otherwise the
/// file named by its disposition.
fn attachment_bytes(section: &Section) -> Result<Vec<u8>> {
    if !section.content.is_empty() {
        return section.decode_to_bytes();
    }

    let Some(path) = section.disposition.file_name.as_deref() else {
        return Ok(Vec::new());
    };
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.into(),
        source,
    })
}
