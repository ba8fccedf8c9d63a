//! File helpers for attachment content.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::base64::BASE64;
use crate::codec::{Codec, Context};
use crate::error::{Error, Result};
use crate::kind::EncoderKind;

/// Reads a file and returns its content as wrapped base64.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn encode_file_to_base64(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Encoding file");
    Ok(BASE64.encode_bytes(None, &bytes, Context::Body))
}

/// Decodes body content with the given codec and writes the bytes to a new
/// file.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if the file exists, a decode error if
/// the content is invalid for the codec, or an I/O error if writing fails.
pub fn decode_to_file(
    kind: EncoderKind,
    charset: Option<&str>,
    text: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let bytes = kind.codec().decode_to_bytes(charset, text, Context::Body)?;
    save(&bytes, path)
}

/// Writes bytes to a file that must not already exist.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if the file exists or an I/O error if
/// writing fails.
pub fn save(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(bytes).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Saved file");
    Ok(())
}
