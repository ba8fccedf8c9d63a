//! Error types for MIME operations.

use std::io;
use std::path::PathBuf;

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Multipart content type without a boundary parameter.
    #[error("Missing boundary in multipart message")]
    MissingBoundary,

    /// The opening boundary line of a multipart section was never found.
    #[error("Boundary not found: {0}")]
    BoundaryNotFound(String),

    /// Codec failure (invalid base64, file helpers).
    #[error(transparent)]
    Codec(#[from] mailkit_codec::Error),

    /// I/O error while reading an attachment.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns true for malformed multipart structure.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::MissingBoundary | Self::BoundaryNotFound(_))
    }
}
