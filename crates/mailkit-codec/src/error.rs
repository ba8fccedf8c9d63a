//! Error types for codec operations.

use std::io;
use std::path::PathBuf;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Codec error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input declared as base64 is not valid base64.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] ::base64::DecodeError),

    /// Target file already exists and would be overwritten.
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O error while reading or writing a file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    ///
    /// `AlreadyExists` errors are mapped to [`Error::AlreadyExists`].
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::AlreadyExists {
            Self::AlreadyExists(path)
        } else {
            Self::Io { path, source }
        }
    }
}
