//! Hamcrest-style matchers and the assertion that drives them.
//!
//! A matcher evaluates a value and can describe both what it expects and why
//! a given value fell short, so failures read as
//! `Expected: <description> but: <mismatch>`.

pub mod checksum;

pub use checksum::{has_checksum, raster_has_checksum, ChecksumMatcher};

/// A reusable predicate that can explain itself.
pub trait Matcher<T: ?Sized> {
    /// Evaluates `actual`.
    fn matches(&self, actual: &T) -> bool;

    /// Appends what a matching value looks like.
    fn describe_to(&self, description: &mut Description);

    /// Appends why `actual` does not match.
    fn describe_mismatch(&self, actual: &T, description: &mut Description);
}

/// Accumulates matcher text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Description {
    text: String,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends literal text.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Appends a value in quoted form.
    pub fn append_value(&mut self, value: &str) -> &mut Self {
        self.text.push_str(&format!("{:?}", value));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Builds the standard failure message for a value that did not match.
pub fn failure_message<T, M>(actual: &T, matcher: &M) -> String
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    let mut expected = Description::new();
    matcher.describe_to(&mut expected);
    let mut mismatch = Description::new();
    matcher.describe_mismatch(actual, &mut mismatch);

    format!(
        "\nExpected: {}\n     but: {}",
        expected.as_str(),
        mismatch.as_str()
    )
}

/// Asserts that `actual` satisfies `matcher`.
///
/// # Panics
/// Panics with an `Expected: ... but: ...` message when the value does not
/// match, or with whatever the matcher itself raises.
#[track_caller]
pub fn assert_that<T, M>(actual: &T, matcher: &M)
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if !matcher.matches(actual) {
        panic!("{}", failure_message(actual, matcher));
    }
}
