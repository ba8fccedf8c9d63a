//! Header block tokenizing and mapping onto typed fields.

use chrono::{DateTime, FixedOffset};
use mailkit_codec::encoded_word;

use super::lines::LineReader;
use crate::address::{Address, Addresses, unquote};
use crate::content_type::{ContentType, MediaKind};
use crate::disposition::{ContentDisposition, DispositionKind};
use crate::header::{Header, Headers, names};
use crate::message::MimeMessage;
use crate::section::Section;
use crate::transfer::TransferEncoding;

/// Reads a header block up to the first blank line or end of input.
pub fn read_headers(reader: &mut LineReader<'_>) -> Headers {
    read_headers_until(reader, |_| false)
}

/// Reads a header block, stopping without consuming at a line for which
/// `stop` returns true.
pub(crate) fn read_headers_until(
    reader: &mut LineReader<'_>,
    stop: impl Fn(&str) -> bool,
) -> Headers {
    let mut headers = Headers::new();

    while reader.peek_line().is_some_and(|line| !stop(line)) {
        let Some(line) = reader.read_line_continuous() else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }
        match parse_header(&line) {
            Some(header) => headers.push(header),
            None => tracing::trace!(line = %line, "Skipping line without header name"),
        }
    }

    headers
}

/// Splits a logical header line into name, value and parameters.
fn parse_header(line: &str) -> Option<Header> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    if name.eq_ignore_ascii_case(names::SUBJECT) || !value.contains(';') {
        return Some(Header::new(name, value));
    }

    let mut segments = split_params(value).into_iter();
    let mut header = Header::new(name, segments.next().unwrap_or_default());

    for segment in segments.map(str::trim).filter(|s| !s.is_empty()) {
        let param = match segment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Header::new(key, unquote(value.trim()))
            }
            _ => Header::new(names::UNDEFINED, segment),
        };
        header.params.push(param);
    }

    tracing::trace!(name = %header.name, params = header.params.len(), "Parsed header");
    Some(header)
}

/// Splits at `;` outside double-quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (index, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);

    segments
}

/// Maps message-level headers onto the message fields.
pub fn apply_to_message(message: &mut MimeMessage, headers: &Headers) {
    for header in headers {
        let name = header.name.as_str();
        let is = |other: &str| name.eq_ignore_ascii_case(other);

        if is(names::FROM) {
            message.from = Some(decode_address(Address::parse(&header.value)));
        } else if is(names::REPLY_TO) {
            message.reply_to = Some(decode_address(Address::parse(&header.value)));
        } else if is(names::TO) {
            message.to = decode_addresses(&header.value);
        } else if is(names::CC) {
            message.cc = decode_addresses(&header.value);
        } else if is(names::BCC) {
            message.bcc = decode_addresses(&header.value);
        } else if is(names::SUBJECT) {
            message.subject = encoded_word::decode(&header.value);
        } else if is(names::DATE) {
            message.date = parse_date(&header.value);
        } else if is(names::MIME_VERSION) {
            message.mime_version = Some(header.value.clone());
        } else if is(names::MESSAGE_ID) {
            message.id.clone_from(&header.value);
        } else if is(names::CONTENT_TYPE) {
            message.content_type = content_type(header);
            message.charset.clone_from(&message.content_type.charset);
        } else if is(names::CONTENT_TRANSFER_ENCODING) {
            message.transfer_encoding = TransferEncoding::parse(&header.value);
        }
    }
}

/// Maps part-level headers onto the section fields.
pub fn apply_to_section(section: &mut Section, headers: &Headers) {
    for header in headers {
        let name = header.name.as_str();
        if name.eq_ignore_ascii_case(names::CONTENT_TYPE) {
            section.content_type = content_type(header);
        } else if name.eq_ignore_ascii_case(names::CONTENT_TRANSFER_ENCODING) {
            section.transfer_encoding = TransferEncoding::parse(&header.value);
        } else if name.eq_ignore_ascii_case(names::CONTENT_DISPOSITION) {
            section.disposition = disposition(header);
        }
    }

    if section.disposition.file_name.is_none() && section.disposition.is_attachment() {
        section.disposition.file_name.clone_from(&section.content_type.name);
    }
}

fn content_type(header: &Header) -> ContentType {
    let param = |name: &str| header.params.get(name).map(ToString::to_string);
    ContentType {
        kind: MediaKind::parse(&header.value),
        charset: param(names::CHARSET),
        boundary: param(names::BOUNDARY),
        name: param(names::NAME).map(|n| encoded_word::decode(&n)),
    }
}

fn disposition(header: &Header) -> ContentDisposition {
    ContentDisposition {
        kind: DispositionKind::parse(&header.value),
        file_name: header
            .params
            .get(names::FILENAME)
            .map(encoded_word::decode),
    }
}

fn decode_address(mut address: Address) -> Address {
    address.name = address.name.map(|name| encoded_word::decode(&name));
    address
}

fn decode_addresses(value: &str) -> Addresses {
    Addresses::parse(value)
        .into_iter()
        .map(decode_address)
        .collect()
}

/// Parses an RFC 2822 date, ignoring a trailing comment such as `(UTC)`.
fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.split('(').next().unwrap_or_default().trim();
    match DateTime::parse_from_rfc2822(value) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(date = value, error = %e, "Unparseable Date header");
            None
        }
    }
}
