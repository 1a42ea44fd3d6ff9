//! Byte-stream sources that can be checksummed.
//!
//! Both image kinds the matchers accept reduce to one capability: produce a
//! readable stream of the bytes that identify the image.

pub mod pdf;
pub mod raster;

pub use pdf::PdfImage;

use crate::checksum::sha1_checksum;
use crate::error::ChecksumResult;
use std::io::Read;

/// Something whose identifying bytes can be read and hashed.
pub trait ImageSource {
    /// Opens a fresh reader over the image bytes.
    ///
    /// Each call returns an independent stream starting at the first byte.
    fn open_stream(&self) -> ChecksumResult<Box<dyn Read + '_>>;

    /// SHA-1 of the stream returned by [`open_stream`](Self::open_stream).
    fn checksum(&self) -> ChecksumResult<String> {
        sha1_checksum(self.open_stream()?)
    }
}
