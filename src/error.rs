//! Error types for image checksum extraction.
//!
//! Every collaborator failure (PDF lookup, stream reads, raster decoding) is
//! categorized here so matchers can either report it as a `Result` or turn it
//! into a fatal assertion.

use std::io;
use thiserror::Error;

/// Result type alias for checksum operations.
pub type ChecksumResult<T> = Result<T, ChecksumError>;

/// Failures that prevent a checksum from being computed at all.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// The PDF structure does not hold a usable image where one was expected.
    #[error("invalid PDF document: {message}")]
    InvalidDocument {
        message: String,
        #[source]
        source: Option<lopdf::Error>,
    },

    /// Reading the image byte stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document refuses access to its content.
    #[error("security error: {reason}")]
    Security { reason: String },

    /// A raster file could not be decoded.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The requested digest algorithm is not available.
    #[error("checksum algorithm '{algorithm}' is not available")]
    AlgorithmUnavailable { algorithm: String },
}

impl ChecksumError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
            source: None,
        }
    }
}

impl From<lopdf::Error> for ChecksumError {
    fn from(err: lopdf::Error) -> Self {
        Self::InvalidDocument {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
