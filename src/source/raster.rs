//! Decoded raster images.
//!
//! The checksummed bytes are the image's first pixel buffer exactly as it
//! sits in memory, not any encoded file form.

use super::ImageSource;
use crate::error::{ChecksumError, ChecksumResult};
use image::{DynamicImage, ImageBuffer, ImageError, Pixel};
use std::io::{Cursor, Read};
use std::path::Path;

impl ImageSource for DynamicImage {
    fn open_stream(&self) -> ChecksumResult<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.as_bytes())))
    }
}

impl<P> ImageSource for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn open_stream(&self) -> ChecksumResult<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.as_raw().as_slice())))
    }
}

/// Decodes the raster file at `path`.
pub fn load(path: &Path) -> ChecksumResult<DynamicImage> {
    tracing::debug!(path = %path.display(), "decoding raster image");
    image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => ChecksumError::Io(io),
        other => ChecksumError::Decode(other),
    })
}
