//! SHA-1 checksum matchers for images in tests.
//!
//! This library lets tests assert that an image embedded in a PDF, or a
//! decoded raster image, has an expected SHA-1 checksum. Matchers follow the
//! Hamcrest shape: they evaluate a value and describe expectation and
//! mismatch for the failure message.
//!
//! # Architecture
//!
//! - [`checksum`]: streaming SHA-1 hex digests
//! - [`source`]: the [`ImageSource`] capability, for PDF image XObjects and raster images
//! - [`matcher`]: [`Matcher`] protocol, [`ChecksumMatcher`] and [`assert_that`]
//! - [`error`]: error taxonomy for extraction and hashing failures
//!
//! # Quick Start
//!
//! ```
//! use image::DynamicImage;
//! use imgsum::{assert_that, raster_has_checksum};
//!
//! let image = DynamicImage::new_rgb8(0, 0);
//! assert_that(
//!     &image,
//!     &raster_has_checksum("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
//! );
//! ```
//!
//! ## PDF images
//!
//! ```no_run
//! use imgsum::{assert_that, has_checksum, source::pdf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = lopdf::Document::load("scan.pdf")?;
//! let images = pdf::images(&doc)?;
//! assert_that(&images[0], &has_checksum("2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"));
//! # Ok(())
//! # }
//! ```
//!
//! A checksum that cannot be computed at all (missing object, encrypted
//! document, read failure) aborts the test with a panic rather than counting
//! as a mismatch. [`ChecksumMatcher::evaluate`] returns those errors instead.

pub mod checksum;
pub mod error;
pub mod matcher;
pub mod source;

pub use checksum::{sha1_checksum, sha1_hex};
pub use error::{ChecksumError, ChecksumResult};
pub use matcher::{
    assert_that, has_checksum, raster_has_checksum, ChecksumMatcher, Description, Matcher,
};
pub use source::{ImageSource, PdfImage};
