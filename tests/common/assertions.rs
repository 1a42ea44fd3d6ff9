//! Custom assertions for checksum matcher testing.

use std::panic::{self, AssertUnwindSafe};

/// Runs `f`, asserting that it panics, and returns the panic message.
///
/// # Panics
/// Panics if `f` returns normally.
pub fn panic_message<F, R>(f: F) -> String
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("expected a panic but the call returned normally"),
        Err(payload) => {
            if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else {
                String::from("<non-string panic payload>")
            }
        }
    }
}

/// Asserts that `f` aborts with a fatal checksum error mentioning `cause`.
pub fn assert_fatal_checksum_error<F, R>(f: F, cause: &str)
where
    F: FnOnce() -> R,
{
    let message = panic_message(f);
    assert!(
        message.starts_with("Getting an image checksum threw "),
        "Unexpected panic message: {}",
        message
    );
    assert!(
        message.contains(cause),
        "Panic message '{}' should mention '{}'",
        message,
        cause
    );
}
