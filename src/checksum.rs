//! SHA-1 digests of byte streams.

use crate::error::{ChecksumError, ChecksumResult};
use sha1::{Digest, Sha1};
use std::io::{ErrorKind, Read};

const CHUNK_SIZE: usize = 8192;

/// Name of the only digest algorithm this crate computes.
pub const SHA1: &str = "sha1";

/// Reads `reader` to the end and returns its SHA-1 digest as lowercase hex.
pub fn sha1_checksum<R: Read>(mut reader: R) -> ChecksumResult<String> {
    let mut hasher = Sha1::new();
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0usize;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ChecksumError::Io(e)),
        };
        hasher.update(&buf[..n]);
        total += n;
    }

    let hex = format!("{:x}", hasher.finalize());
    tracing::debug!(bytes = total, checksum = %hex, "computed sha1 checksum");
    Ok(hex)
}

/// SHA-1 of an in-memory buffer.
pub fn sha1_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

/// Checks that `name` is an algorithm this crate can compute.
pub fn ensure_algorithm(name: &str) -> ChecksumResult<()> {
    if name.eq_ignore_ascii_case(SHA1) || name.eq_ignore_ascii_case("sha-1") {
        Ok(())
    } else {
        Err(ChecksumError::AlgorithmUnavailable {
            algorithm: name.to_string(),
        })
    }
}
