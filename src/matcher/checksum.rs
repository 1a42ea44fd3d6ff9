//! Matchers on the SHA-1 checksum of an image.

use super::{Description, Matcher};
use crate::error::{ChecksumError, ChecksumResult};
use crate::source::{ImageSource, PdfImage};
use image::DynamicImage;
use std::fmt;
use std::marker::PhantomData;

/// Matches an [`ImageSource`] whose SHA-1 equals a fixed hex string.
///
/// Comparison is exact, so the expected value must be lowercase hex.
/// Failing to compute the checksum is not a mismatch: [`Matcher::matches`]
/// panics instead. Use [`evaluate`](Self::evaluate) to get the error back.
pub struct ChecksumMatcher<T: ?Sized> {
    expected: String,
    _source: PhantomData<fn(&T)>,
}

impl<T: ImageSource + ?Sized> ChecksumMatcher<T> {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            _source: PhantomData,
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Compares the checksum of `actual`, returning extraction failures.
    pub fn evaluate(&self, actual: &T) -> ChecksumResult<bool> {
        Ok(actual.checksum()? == self.expected)
    }

    fn feature_value(&self, actual: &T) -> String {
        actual
            .checksum()
            .unwrap_or_else(|err| checksum_error(&err))
    }
}

fn checksum_error(err: &ChecksumError) -> ! {
    tracing::warn!(error = %err, "image checksum could not be computed");
    panic!("Getting an image checksum threw {}", err);
}

impl<T: ImageSource + ?Sized> Matcher<T> for ChecksumMatcher<T> {
    fn matches(&self, actual: &T) -> bool {
        self.feature_value(actual) == self.expected
    }

    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("has checksum ")
            .append_value(&self.expected);
    }

    fn describe_mismatch(&self, actual: &T, description: &mut Description) {
        let checksum = self.feature_value(actual);
        description.append_text("checksum was ").append_value(&checksum);
    }
}

impl<T: ?Sized> Clone for ChecksumMatcher<T> {
    fn clone(&self) -> Self {
        Self {
            expected: self.expected.clone(),
            _source: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ChecksumMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumMatcher")
            .field("expected", &self.expected)
            .finish()
    }
}

/// Checks that a PDF image XObject's raw stream has the given SHA-1.
pub fn has_checksum<'a>(checksum: impl Into<String>) -> ChecksumMatcher<PdfImage<'a>> {
    ChecksumMatcher::new(checksum)
}

/// Checks that a decoded raster image's pixel buffer has the given SHA-1.
pub fn raster_has_checksum(checksum: impl Into<String>) -> ChecksumMatcher<DynamicImage> {
    ChecksumMatcher::new(checksum)
}
